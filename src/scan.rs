//! HTML heading scan via memchr byte search — no DOM parser needed.
//! Finds `<h1>`…`<h6>` open tags, pulls out rank, id attribute and text
//! content, and records the byte offsets the injector needs. Headings
//! inside `<script>`, `<style>` and comments don't count.
//!
//! This is a scanner, not a parser: malformed markup degrades (a heading
//! with no close tag runs to the next heading or EOF) and never fails.

use memchr::{memchr, memmem};

use crate::config::LevelRange;

/// One heading as found in the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeading {
    /// 1–6, from the tag name.
    pub rank: u8,
    /// Existing `id` attribute value, verbatim.
    pub id: Option<String>,
    /// Text content: tags stripped, entities decoded, whitespace collapsed.
    pub text: String,
    /// Byte offset right after the tag name — where a generated id goes.
    pub id_insert_at: usize,
}

/// Scan output: matched headings plus the structural anchors injection
/// splices at.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub headings: Vec<RawHeading>,
    /// Right after the open tag of the first element with the mount id.
    pub mount_at: Option<usize>,
    /// Right after the `<body …>` open tag.
    pub body_at: Option<usize>,
    /// Offset of `</body>`.
    pub body_close_at: Option<usize>,
}

/// Single pass over the document. `levels` filters which ranks participate;
/// `mount_id` is the container the panel prefers to mount into.
pub fn scan(html: &[u8], levels: LevelRange, mount_id: &str) -> ScanResult {
    // Lowercased shadow buffer: tag and attribute names match
    // case-insensitively, offsets line up 1:1 with the original.
    let lower = html.to_ascii_lowercase();

    let mut result = ScanResult {
        body_close_at: memmem::find(&lower, b"</body>"),
        ..ScanResult::default()
    };

    let mut pos = 0;
    while let Some(i) = memchr(b'<', &lower[pos..]) {
        let at = pos + i;

        // Comments hide their content entirely.
        if lower[at..].starts_with(b"<!--") {
            pos = match memmem::find(&lower[at + 4..], b"-->") {
                Some(j) => at + 4 + j + 3,
                None => break,
            };
            continue;
        }

        // Close tags, doctype, processing instructions — skip over.
        match lower.get(at + 1).copied() {
            Some(b'/' | b'!' | b'?') => {
                pos = match tag_end(&lower, at) {
                    Some(after) => after,
                    None => break,
                };
                continue;
            }
            Some(b) if b.is_ascii_alphabetic() => {}
            _ => {
                // Stray '<' in text.
                pos = at + 1;
                continue;
            }
        }

        let name_end = tag_name_end(&lower, at);
        let name = &lower[at + 1..name_end];

        // Script and style content is opaque — jump past the close tag.
        if name == b"script" || name == b"style" {
            let close: &[u8] = if name == b"script" { b"</script" } else { b"</style" };
            pos = match memmem::find(&lower[at..], close) {
                Some(j) => tag_end(&lower, at + j).unwrap_or(lower.len()),
                None => lower.len(),
            };
            continue;
        }

        let Some(after_tag) = tag_end(&lower, at) else {
            break; // truncated tag at EOF
        };

        let id = attr_value(&lower, html, name_end, after_tag - 1, b"id");

        if result.mount_at.is_none() && id.as_deref() == Some(mount_id) {
            result.mount_at = Some(after_tag);
        }
        if result.body_at.is_none() && name == b"body" {
            result.body_at = Some(after_tag);
        }

        if let Some(rank) = heading_rank(name) {
            if levels.contains(rank) {
                let content_end = heading_content_end(&lower, after_tag, rank);
                result.headings.push(RawHeading {
                    rank,
                    id,
                    text: extract_text(&html[after_tag..content_end]),
                    id_insert_at: name_end,
                });
                pos = content_end;
                continue;
            }
        }

        pos = after_tag;
    }

    result
}

/// `h1`…`h6` → rank, anything else → None.
fn heading_rank(name: &[u8]) -> Option<u8> {
    match name {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

/// End of a heading's content: its close tag, or — when the markup never
/// closes it — the next heading open tag, or EOF.
fn heading_content_end(lower: &[u8], from: usize, rank: u8) -> usize {
    let close = [b'<', b'/', b'h', b'0' + rank];
    if let Some(j) = memmem::find(&lower[from..], &close) {
        return from + j;
    }
    next_heading_open(lower, from).unwrap_or(lower.len())
}

/// Next `<h1>`…`<h6>` open tag at or after `from`.
fn next_heading_open(lower: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = memchr(b'<', &lower[pos..]) {
        let at = pos + i;
        if let Some(&[b'h', b'1'..=b'6', delim]) = lower.get(at + 1..at + 4) {
            if delim == b'>' || delim == b'/' || delim.is_ascii_whitespace() {
                return Some(at);
            }
        }
        pos = at + 1;
    }
    None
}

/// Offset just past the '>' closing the tag that starts at `from`.
/// Quote-aware: '>' inside quoted attribute values doesn't end the tag.
fn tag_end(buf: &[u8], from: usize) -> Option<usize> {
    let mut i = from + 1;
    while i < buf.len() {
        match buf[i] {
            b'>' => return Some(i + 1),
            q @ (b'"' | b'\'') => {
                i += 1;
                i += memchr(q, &buf[i..])?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// End of the tag name: first byte after `<` that isn't alphanumeric.
fn tag_name_end(buf: &[u8], from: usize) -> usize {
    let mut i = from + 1;
    while i < buf.len() && buf[i].is_ascii_alphanumeric() {
        i += 1;
    }
    i
}

/// Find an attribute's value inside `start..end` (the attribute region of
/// an open tag). Names compare against the lowercased buffer, the value is
/// sliced from the original so its case survives. Handles double-quoted,
/// single-quoted and unquoted values.
fn attr_value(lower: &[u8], orig: &[u8], start: usize, end: usize, want: &[u8]) -> Option<String> {
    let mut i = start;
    while i < end {
        // Skip whitespace and the '/' of a self-closing tag.
        while i < end && (lower[i].is_ascii_whitespace() || lower[i] == b'/') {
            i += 1;
        }
        if i >= end {
            break;
        }

        let name_start = i;
        while i < end && !lower[i].is_ascii_whitespace() && lower[i] != b'=' && lower[i] != b'/' {
            i += 1;
        }
        let name = &lower[name_start..i];

        while i < end && lower[i].is_ascii_whitespace() {
            i += 1;
        }

        if i >= end || lower[i] != b'=' {
            // Bare attribute, no value.
            if name == want {
                return Some(String::new());
            }
            continue;
        }

        i += 1;
        while i < end && lower[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= end {
            break;
        }

        let (value_start, value_end) = match lower[i] {
            q @ (b'"' | b'\'') => {
                let vs = i + 1;
                let ve = match memchr(q, &lower[vs..end]) {
                    Some(j) => vs + j,
                    None => end,
                };
                i = ve + 1;
                (vs, ve)
            }
            _ => {
                let vs = i;
                while i < end && !lower[i].is_ascii_whitespace() {
                    i += 1;
                }
                (vs, i)
            }
        };

        if name == want {
            return Some(String::from_utf8_lossy(&orig[value_start..value_end]).into_owned());
        }
    }
    None
}

/// Strip nested tags, decode the basic entities, collapse whitespace.
fn extract_text(content: &[u8]) -> String {
    let mut raw = Vec::with_capacity(content.len());
    let mut pos = 0;
    while let Some(i) = memchr(b'<', &content[pos..]) {
        raw.extend_from_slice(&content[pos..pos + i]);
        pos = match tag_end(content, pos + i) {
            Some(after) => after,
            None => content.len(),
        };
    }
    raw.extend_from_slice(&content[pos..]);

    let decoded = decode_entities(&String::from_utf8_lossy(&raw));
    let words: Vec<&str> = decoded.split_whitespace().collect();
    words.join(" ")
}

const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&apos;", '\''),
];

/// Left-to-right single pass, so "&amp;lt;" decodes to the literal "&lt;".
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];
        match ENTITIES.iter().find(|(ent, _)| rest.starts_with(ent)) {
            Some((ent, ch)) => {
                out.push(*ch);
                rest = &rest[ent.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
