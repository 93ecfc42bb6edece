use serde::Serialize;

/// One entry in the generated table of contents. Entries are 1:1 with
/// matched headings and keep their document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading rank (1–6) — drives the `toc-level-<n>` class.
    pub level: u8,
    /// Anchor target: the heading's existing id, or the generated one.
    pub id: String,
    /// Display text, tags stripped and whitespace collapsed.
    pub text: String,
}

/// Where the panel lands in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mount {
    /// First child of the element carrying the configured mount id.
    Container,
    /// First child of `<body>` — fallback when no container matched.
    Body,
}

/// Prefix for ids assigned to headings that have none: `toc-header-<i>`,
/// `<i>` being the heading's zero-based position among matched headings.
pub const GENERATED_ID_PREFIX: &str = "toc-header-";

/// Truncate to `max` bytes at a char boundary.
pub fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
