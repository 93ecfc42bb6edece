//! TOC construction: one entry per matched heading, 1:1, document order.
//! Headings without an id get `toc-header-<i>` (zero-based position among
//! the matched headings); existing ids are never touched.

use crate::scan::RawHeading;
use crate::types::{GENERATED_ID_PREFIX, TocEntry};

#[derive(Debug, Clone)]
pub struct Toc {
    entries: Vec<TocEntry>,
    /// (heading index, generated id) for headings that had none.
    assigned: Vec<(usize, String)>,
}

/// Build the TOC. `None` when nothing matched — the whole feature is a
/// silent no-op on heading-less pages.
pub fn build(headings: &[RawHeading]) -> Option<Toc> {
    if headings.is_empty() {
        return None;
    }

    let mut entries = Vec::with_capacity(headings.len());
    let mut assigned = Vec::new();

    for (i, heading) in headings.iter().enumerate() {
        let id = match &heading.id {
            Some(id) => id.clone(),
            None => {
                let id = format!("{GENERATED_ID_PREFIX}{i}");
                assigned.push((i, id.clone()));
                id
            }
        };
        entries.push(TocEntry {
            level: heading.rank,
            id,
            text: heading.text.clone(),
        });
    }

    Some(Toc { entries, assigned })
}

impl Toc {
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn assigned(&self) -> &[(usize, String)] {
        &self.assigned
    }

    /// Entry index whose anchor target is `id`, if any.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(rank: u8, id: Option<&str>, text: &str) -> RawHeading {
        RawHeading {
            rank,
            id: id.map(String::from),
            text: text.to_string(),
            id_insert_at: 0,
        }
    }

    #[test]
    fn empty_scan_builds_nothing() {
        assert!(build(&[]).is_none());
    }

    #[test]
    fn entries_keep_document_order() {
        let toc = build(&[
            heading(2, Some("a"), "A"),
            heading(3, None, "B"),
            heading(2, None, "C"),
        ])
        .unwrap();
        let ids: Vec<&str> = toc.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "toc-header-1", "toc-header-2"]);
    }

    #[test]
    fn generated_ids_use_matched_position() {
        // Index counts matched headings, with-id ones included
        let toc = build(&[heading(2, Some("a"), "A"), heading(3, None, "B")]).unwrap();
        assert_eq!(
            toc.entries(),
            [
                TocEntry { level: 2, id: "a".into(), text: "A".into() },
                TocEntry { level: 3, id: "toc-header-1".into(), text: "B".into() },
            ]
        );
        assert_eq!(toc.assigned(), [(1, "toc-header-1".to_string())]);
    }

    #[test]
    fn position_of_resolves_targets() {
        let toc = build(&[heading(2, Some("a"), "A"), heading(3, None, "B")]).unwrap();
        assert_eq!(toc.position_of("a"), Some(0));
        assert_eq!(toc.position_of("toc-header-1"), Some(1));
        assert_eq!(toc.position_of("missing"), None);
    }
}
