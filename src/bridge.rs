//! Host event bridge — line-delimited JSON over stdio.
//!
//! The host (a page shim, a test harness, an embedding viewer) writes one
//! event per line and reads one reply per line: `{"commands": [...]}` on
//! success, `{"error": "..."}` for unparseable input. Stdout carries only
//! protocol lines; diagnostics go through `log` to stderr. EOF ends the
//! session.

use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::view::{Command, HostEvent, TocView};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Reply {
    Commands { commands: Vec<Command> },
    Error { error: String },
}

/// Run the bridge until EOF. `None` means the page had no matching
/// headings — every event then answers an empty command list, the
/// feature's silent no-op.
pub fn run(mut view: Option<TocView>) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let reply = handle_line(view.as_mut(), &line);
        serde_json::to_writer(&mut stdout, &reply)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_line(view: Option<&mut TocView>, line: &str) -> Reply {
    let event: HostEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("unparseable host event: {e}");
            return Reply::Error {
                error: format!("parse error: {e}"),
            };
        }
    };

    log::debug!("host event: {event:?}");
    let commands = match view {
        Some(view) => view.handle(event),
        None => Vec::new(),
    };
    Reply::Commands { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TocConfig;
    use crate::scan::RawHeading;
    use crate::types::Mount;

    fn view() -> TocView {
        let toc = crate::toc::build(&[RawHeading {
            rank: 2,
            id: Some("a".into()),
            text: "A".into(),
            id_insert_at: 0,
        }])
        .unwrap();
        TocView::new(toc, TocConfig::page(), Mount::Body)
    }

    #[test]
    fn event_line_yields_commands() {
        let mut v = view();
        let reply = handle_line(Some(&mut v), r#"{"event":"toggle-click"}"#);
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.starts_with(r#"{"commands":[{"op":"add-class""#));
        assert!(v.is_open());
    }

    #[test]
    fn malformed_line_yields_error_reply() {
        let mut v = view();
        let reply = handle_line(Some(&mut v), "{nope");
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.starts_with(r#"{"error":"parse error"#));
    }

    #[test]
    fn headingless_session_answers_empty() {
        let reply = handle_line(None, r#"{"event":"toggle-click"}"#);
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"commands":[]}"#);
    }
}
