use std::fmt::Write;
use std::path::Path;

use crate::toc::Toc;
use crate::types::truncate_str;

/// Build the standard header line: `# path/to/page.html (N headings)`
pub fn outline_header(path: &Path, heading_count: usize) -> String {
    format!("# {} ({heading_count} headings)", path.display())
}

/// Full outline listing: header, then one line per entry, indented two
/// spaces per rank below the shallowest matched rank.
pub fn outline(path: &Path, toc: &Toc) -> String {
    let min = toc.entries().iter().map(|e| e.level).min().unwrap_or(1);

    let mut out = outline_header(path, toc.len());
    out.push_str("\n\n");
    for entry in toc.entries() {
        let indent = "  ".repeat(usize::from(entry.level - min));
        let text = if entry.text.len() > 80 {
            format!("{}...", truncate_str(&entry.text, 77))
        } else {
            entry.text.clone()
        };
        let _ = writeln!(out, "{indent}{text}  #{}", entry.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::RawHeading;
    use std::path::PathBuf;

    fn heading(rank: u8, id: Option<&str>, text: &str) -> RawHeading {
        RawHeading {
            rank,
            id: id.map(String::from),
            text: text.to_string(),
            id_insert_at: 0,
        }
    }

    #[test]
    fn outline_indents_below_shallowest_rank() {
        let toc = crate::toc::build(&[
            heading(2, Some("a"), "Alpha"),
            heading(3, None, "Beta"),
        ])
        .unwrap();
        let text = outline(&PathBuf::from("page.html"), &toc);
        assert!(text.starts_with("# page.html (2 headings)\n\n"));
        assert!(text.contains("\nAlpha  #a\n"));
        assert!(text.contains("\n  Beta  #toc-header-1\n"));
    }

    #[test]
    fn long_labels_are_truncated() {
        let long = "x".repeat(120);
        let toc = crate::toc::build(&[heading(2, Some("l"), &long)]).unwrap();
        let text = outline(&PathBuf::from("p.html"), &toc);
        assert!(text.contains(&format!("{}...  #l", "x".repeat(77))));
    }
}
