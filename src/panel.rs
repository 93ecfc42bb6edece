//! Markup synthesis for the three inserted elements: panel, overlay,
//! toggle button. The ids and classes here are the styling contract — the
//! visual design lives entirely in the host page's stylesheet.

use std::fmt::Write;

use crate::config::TocConfig;
use crate::toc::Toc;

pub const PANEL_ID: &str = "table-of-contents";
pub const TITLE_ID: &str = "toc-main-header";
pub const CLOSE_ID: &str = "toc-close";
pub const OVERLAY_ID: &str = "toc-overlay";
pub const TOGGLE_ID: &str = "toc-toggle";

pub const CLASS_OPEN: &str = "open";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_ACTIVE: &str = "active";
pub const LEVEL_CLASS_PREFIX: &str = "toc-level-";

/// Hamburger icon on the toggle button.
const TOGGLE_ICON: &str = concat!(
    r##"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="#fff" "##,
    r#"stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round" "#,
    r#"style="margin-right: 8px; vertical-align: middle;">"#,
    r#"<line x1="3" y1="12" x2="21" y2="12"></line>"#,
    r#"<line x1="3" y1="6" x2="21" y2="6"></line>"#,
    r#"<line x1="3" y1="18" x2="21" y2="18"></line></svg>"#,
);

/// The collapsible side panel: title, close control, entry list.
pub fn panel_html(toc: &Toc, config: &TocConfig) -> String {
    let mut out = String::with_capacity(256 + toc.len() * 64);
    let _ = write!(
        out,
        r#"<div id="{PANEL_ID}" aria-labelledby="{TITLE_ID}" tabindex="-1">"#
    );
    let _ = write!(
        out,
        r#"<span id="{TITLE_ID}" class="header">{}</span>"#,
        escape_html(&config.panel_title)
    );
    let _ = write!(
        out,
        r#"<button id="{CLOSE_ID}" aria-label="{}">✕</button>"#,
        escape_html(&config.close_label)
    );
    out.push_str("<ul>");
    for entry in toc.entries() {
        let _ = write!(
            out,
            r##"<li class="{LEVEL_CLASS_PREFIX}{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.text)
        );
    }
    out.push_str("</ul></div>");
    out
}

/// Translucent click-to-close backdrop.
pub fn overlay_html() -> String {
    format!(r#"<div id="{OVERLAY_ID}"></div>"#)
}

/// The floating open button. Starts collapsed: `aria-expanded="false"`.
pub fn toggle_html(config: &TocConfig) -> String {
    format!(
        r#"<button id="{TOGGLE_ID}" aria-label="{}" aria-expanded="false" aria-controls="{PANEL_ID}">{TOGGLE_ICON}{}</button>"#,
        escape_html(&config.open_label),
        escape_html(&config.toggle_caption)
    )
}

/// Minimal escape for text and attribute positions.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
