//! Static insertion: splice generated ids and the three panel elements
//! into the source document in one pass over sorted byte offsets.
//!
//! Placement mirrors the live behavior: panel as first child of the mount
//! container, else first child of `<body>`; overlay and toggle appended at
//! the end of `<body>`. A document with neither anchor gets everything at
//! EOF — degrade, don't fail.

use crate::config::TocConfig;
use crate::panel;
use crate::scan::ScanResult;
use crate::toc::Toc;

/// Produce the spliced document. The caller is expected to skip calling
/// this when nothing matched; passing an empty TOC still works and only
/// inserts the (empty-list) panel chrome.
pub fn inject(html: &[u8], scan: &ScanResult, toc: &Toc, config: &TocConfig) -> Vec<u8> {
    let tail = scan.body_close_at.unwrap_or(html.len());
    let panel_at = scan.mount_at.or(scan.body_at).unwrap_or(tail);

    // (offset, sequence-ordered text); stable sort keeps panel before
    // overlay before toggle when offsets collide.
    let mut inserts: Vec<(usize, String)> = Vec::with_capacity(toc.assigned().len() + 3);
    for (idx, id) in toc.assigned() {
        let heading = &scan.headings[*idx];
        inserts.push((heading.id_insert_at, format!(" id=\"{id}\"")));
    }
    inserts.push((panel_at, panel::panel_html(toc, config)));
    inserts.push((tail, panel::overlay_html()));
    inserts.push((tail, panel::toggle_html(config)));
    inserts.sort_by_key(|(at, _)| *at);

    let grown: usize = inserts.iter().map(|(_, s)| s.len()).sum();
    let mut out = Vec::with_capacity(html.len() + grown);
    let mut pos = 0;
    for (at, text) in &inserts {
        out.extend_from_slice(&html[pos..*at]);
        out.extend_from_slice(text.as_bytes());
        pos = *at;
    }
    out.extend_from_slice(&html[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelRange;

    fn run(html: &str, levels: (u8, u8)) -> String {
        let config = TocConfig::page();
        let levels = LevelRange::new(levels.0, levels.1).unwrap();
        let scan = crate::scan::scan(html.as_bytes(), levels, &config.mount_id);
        let toc = crate::toc::build(&scan.headings).expect("headings expected");
        String::from_utf8(inject(html.as_bytes(), &scan, &toc, &config)).unwrap()
    }

    #[test]
    fn panel_prepended_into_mount_container() {
        let html = r#"<body><div id="toc"></div><h2 id="a">A</h2><h3>B</h3></body>"#;
        let out = run(html, (2, 3));
        assert!(out.contains(r#"<div id="toc"><div id="table-of-contents""#));
        // overlay and toggle land at the end of body, toggle last
        let overlay = out.find(r#"<div id="toc-overlay">"#).unwrap();
        let toggle = out.find(r#"<button id="toc-toggle""#).unwrap();
        assert!(overlay < toggle);
        assert!(out.ends_with(r#"</button></body>"#));
    }

    #[test]
    fn generated_id_spliced_into_heading_tag() {
        let html = r#"<body><h2 id="a">A</h2><h3>B</h3></body>"#;
        let out = run(html, (2, 3));
        assert!(out.contains(r#"<h3 id="toc-header-1">B</h3>"#));
        assert!(out.contains(r#"<h2 id="a">A</h2>"#)); // existing id untouched
        assert!(out.contains(r##"<a href="#toc-header-1">B</a>"##));
    }

    #[test]
    fn falls_back_to_body_when_mount_missing() {
        let html = "<body><h1>Intro</h1></body>";
        let out = run(html, (1, 3));
        assert!(out.contains(r#"<body><div id="table-of-contents""#));
    }

    #[test]
    fn bodyless_fragment_gets_everything_at_eof() {
        let html = "<h2>Only</h2>";
        let out = run(html, (2, 3));
        assert!(out.starts_with(r#"<h2 id="toc-header-0">Only</h2>"#));
        assert!(out.contains(r#"<div id="table-of-contents""#));
        assert!(out.ends_with("</button>"));
    }

    #[test]
    fn no_headings_leaves_document_untouched() {
        // The zero-heading guard lives in the caller: toc::build returns
        // None and injection is never reached.
        let html = "<body><p>prose</p></body>";
        let config = TocConfig::page();
        let scan = crate::scan::scan(html.as_bytes(), config.levels, &config.mount_id);
        assert!(crate::toc::build(&scan.headings).is_none());
    }
}
