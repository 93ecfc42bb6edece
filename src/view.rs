//! Interaction state machine behind the panel.
//!
//! The host environment owns the real view and the event sources; this
//! side owns the state — panel open/closed, which entry is active — and
//! answers every event with the ordered list of mutations to apply. Two
//! invariants: at most one entry is active at any instant, and the
//! toggle's aria-expanded always matches the open flag.

use serde::{Deserialize, Serialize};

use crate::band::ActivationBand;
use crate::config::TocConfig;
use crate::panel::{self, CLASS_ACTIVE, CLASS_OPEN, CLASS_VISIBLE};
use crate::toc::Toc;
use crate::types::Mount;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// UI events delivered by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum HostEvent {
    /// First event of a session — carries what only the host knows.
    #[serde(rename_all = "camelCase")]
    Init { viewport_height: u32 },
    ToggleClick,
    CloseClick,
    OverlayClick,
    /// Click on an anchor inside the generated list.
    AnchorClick { href: String },
    /// Intersection notification for one observed heading.
    #[serde(rename_all = "camelCase")]
    Intersection {
        id: String,
        is_intersecting: bool,
        ratio: f64,
    },
}

/// Mutations the host applies in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command {
    AssignId { heading: usize, id: String },
    InsertPanel { mount: Mount, html: String },
    AppendOverlay { html: String },
    AppendToggle { html: String },
    #[serde(rename_all = "camelCase")]
    Observe { ids: Vec<String>, root_margin: String },
    AddClass { target: Target, class: String },
    RemoveClass { target: Target, class: String },
    SetAttribute { target: Target, name: String, value: String },
    Focus { target: Target },
    PreventDefault,
    ScrollTo { id: String, behavior: ScrollBehavior },
}

/// Inserted elements and list entries, addressed structurally — the host
/// keeps the element references, we keep the indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    Panel,
    Overlay,
    Toggle,
    Entry(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollBehavior {
    Smooth,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// The component. Construct once per page view, feed it events.
#[derive(Debug)]
pub struct TocView {
    toc: Toc,
    config: TocConfig,
    mount: Mount,
    open: bool,
    active: Option<usize>,
}

impl TocView {
    #[must_use]
    pub fn new(toc: Toc, config: TocConfig, mount: Mount) -> Self {
        Self {
            toc,
            config,
            mount,
            open: false,
            active: None,
        }
    }

    pub fn handle(&mut self, event: HostEvent) -> Vec<Command> {
        match event {
            HostEvent::Init { viewport_height } => self.init(viewport_height),
            HostEvent::ToggleClick => self.open_panel(),
            HostEvent::CloseClick | HostEvent::OverlayClick => self.close_panel(),
            HostEvent::AnchorClick { href } => self.anchor_click(&href),
            HostEvent::Intersection {
                id,
                is_intersecting,
                ratio,
            } => self.intersection(&id, is_intersecting, ratio),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Setup: id assignments, element insertion, observer registration.
    /// Re-init resets state and replays the same commands.
    fn init(&mut self, viewport_height: u32) -> Vec<Command> {
        self.open = false;
        self.active = None;

        let mut cmds = Vec::with_capacity(self.toc.assigned().len() + 4);
        for (idx, id) in self.toc.assigned() {
            cmds.push(Command::AssignId {
                heading: *idx,
                id: id.clone(),
            });
        }
        cmds.push(Command::InsertPanel {
            mount: self.mount,
            html: panel::panel_html(&self.toc, &self.config),
        });
        cmds.push(Command::AppendOverlay {
            html: panel::overlay_html(),
        });
        cmds.push(Command::AppendToggle {
            html: panel::toggle_html(&self.config),
        });

        let band = ActivationBand::new(self.config.offset_px, viewport_height);
        cmds.push(Command::Observe {
            ids: self.toc.entries().iter().map(|e| e.id.clone()).collect(),
            root_margin: band.margin(),
        });
        cmds
    }

    fn open_panel(&mut self) -> Vec<Command> {
        self.open = true;
        vec![
            Command::AddClass {
                target: Target::Panel,
                class: CLASS_OPEN.into(),
            },
            Command::AddClass {
                target: Target::Overlay,
                class: CLASS_VISIBLE.into(),
            },
            Command::SetAttribute {
                target: Target::Toggle,
                name: "aria-expanded".into(),
                value: "true".into(),
            },
            Command::Focus {
                target: Target::Panel,
            },
        ]
    }

    /// Unconditional, like the source: closing a closed panel re-emits the
    /// same idempotent mutations.
    fn close_panel(&mut self) -> Vec<Command> {
        self.open = false;
        vec![
            Command::RemoveClass {
                target: Target::Panel,
                class: CLASS_OPEN.into(),
            },
            Command::RemoveClass {
                target: Target::Overlay,
                class: CLASS_VISIBLE.into(),
            },
            Command::SetAttribute {
                target: Target::Toggle,
                name: "aria-expanded".into(),
                value: "false".into(),
            },
        ]
    }

    /// Default navigation is always suppressed; everything after that is
    /// skipped when the fragment doesn't resolve to a known heading.
    fn anchor_click(&mut self, href: &str) -> Vec<Command> {
        let mut cmds = vec![Command::PreventDefault];

        let Some(id) = href.strip_prefix('#').filter(|s| !s.is_empty()) else {
            return cmds;
        };
        if self.toc.position_of(id).is_none() {
            return cmds;
        }

        cmds.push(Command::ScrollTo {
            id: id.to_string(),
            behavior: ScrollBehavior::Smooth,
        });
        if self.open {
            cmds.extend(self.close_panel());
        }
        cmds
    }

    /// Single-winner active marker: clear the previous holder, then mark
    /// the entry targeting the heading that entered the band. A heading
    /// with no entry (stale observer) clears without re-marking.
    fn intersection(&mut self, id: &str, is_intersecting: bool, ratio: f64) -> Vec<Command> {
        if !is_intersecting || ratio <= 0.0 {
            return Vec::new();
        }

        let mut cmds = Vec::with_capacity(2);
        if let Some(prev) = self.active.take() {
            cmds.push(Command::RemoveClass {
                target: Target::Entry(prev),
                class: CLASS_ACTIVE.into(),
            });
        }
        if let Some(i) = self.toc.position_of(id) {
            cmds.push(Command::AddClass {
                target: Target::Entry(i),
                class: CLASS_ACTIVE.into(),
            });
            self.active = Some(i);
        }
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::RawHeading;

    fn view() -> TocView {
        let toc = crate::toc::build(&[
            RawHeading {
                rank: 2,
                id: Some("a".into()),
                text: "A".into(),
                id_insert_at: 10,
            },
            RawHeading {
                rank: 3,
                id: None,
                text: "B".into(),
                id_insert_at: 30,
            },
        ])
        .unwrap();
        TocView::new(toc, TocConfig::article(), Mount::Container)
    }

    fn intersect(id: &str) -> HostEvent {
        HostEvent::Intersection {
            id: id.into(),
            is_intersecting: true,
            ratio: 0.4,
        }
    }

    #[test]
    fn init_emits_setup_in_order() {
        let mut v = view();
        let cmds = v.handle(HostEvent::Init {
            viewport_height: 900,
        });
        assert_eq!(
            cmds[0],
            Command::AssignId {
                heading: 1,
                id: "toc-header-1".into()
            }
        );
        assert!(matches!(
            cmds[1],
            Command::InsertPanel {
                mount: Mount::Container,
                ..
            }
        ));
        assert!(matches!(cmds[2], Command::AppendOverlay { .. }));
        assert!(matches!(cmds[3], Command::AppendToggle { .. }));
        assert_eq!(
            cmds[4],
            Command::Observe {
                ids: vec!["a".into(), "toc-header-1".into()],
                root_margin: "-99px 0px -800px 0px".into(),
            }
        );
    }

    #[test]
    fn toggle_opens_and_close_reverses() {
        let mut v = view();
        let open = v.handle(HostEvent::ToggleClick);
        assert!(v.is_open());
        assert!(open.contains(&Command::SetAttribute {
            target: Target::Toggle,
            name: "aria-expanded".into(),
            value: "true".into(),
        }));
        assert!(open.contains(&Command::Focus {
            target: Target::Panel
        }));

        let close = v.handle(HostEvent::CloseClick);
        assert!(!v.is_open());
        assert!(close.contains(&Command::SetAttribute {
            target: Target::Toggle,
            name: "aria-expanded".into(),
            value: "false".into(),
        }));
        assert!(close.contains(&Command::RemoveClass {
            target: Target::Overlay,
            class: "visible".into(),
        }));
    }

    #[test]
    fn overlay_click_closes_too() {
        let mut v = view();
        v.handle(HostEvent::ToggleClick);
        v.handle(HostEvent::OverlayClick);
        assert!(!v.is_open());
    }

    #[test]
    fn anchor_click_scrolls_and_closes_open_panel() {
        let mut v = view();
        v.handle(HostEvent::ToggleClick);
        let cmds = v.handle(HostEvent::AnchorClick { href: "#a".into() });
        assert_eq!(cmds[0], Command::PreventDefault);
        assert_eq!(
            cmds[1],
            Command::ScrollTo {
                id: "a".into(),
                behavior: ScrollBehavior::Smooth,
            }
        );
        assert!(!v.is_open()); // mobile presentation closes after selection
    }

    #[test]
    fn anchor_click_with_closed_panel_only_scrolls() {
        let mut v = view();
        let cmds = v.handle(HostEvent::AnchorClick { href: "#a".into() });
        assert_eq!(cmds.len(), 2); // prevent-default + scroll, no close
        assert!(!v.is_open());
    }

    #[test]
    fn stale_anchor_target_skips_silently() {
        let mut v = view();
        v.handle(HostEvent::ToggleClick);
        let cmds = v.handle(HostEvent::AnchorClick {
            href: "#gone".into(),
        });
        assert_eq!(cmds, [Command::PreventDefault]);
        assert!(v.is_open()); // interaction was abandoned before the close
    }

    #[test]
    fn active_marker_has_a_single_winner() {
        let mut v = view();
        let first = v.handle(intersect("a"));
        assert_eq!(
            first,
            [Command::AddClass {
                target: Target::Entry(0),
                class: "active".into(),
            }]
        );

        let second = v.handle(intersect("toc-header-1"));
        assert_eq!(
            second,
            [
                Command::RemoveClass {
                    target: Target::Entry(0),
                    class: "active".into(),
                },
                Command::AddClass {
                    target: Target::Entry(1),
                    class: "active".into(),
                },
            ]
        );
        assert_eq!(v.active(), Some(1));
    }

    #[test]
    fn non_intersecting_notifications_are_ignored() {
        let mut v = view();
        v.handle(intersect("a"));
        let cmds = v.handle(HostEvent::Intersection {
            id: "a".into(),
            is_intersecting: false,
            ratio: 0.0,
        });
        assert!(cmds.is_empty());
        assert_eq!(v.active(), Some(0)); // leaving the band keeps the marker
    }

    #[test]
    fn unknown_intersection_id_clears_without_marking() {
        let mut v = view();
        v.handle(intersect("a"));
        let cmds = v.handle(intersect("not-observed"));
        assert_eq!(
            cmds,
            [Command::RemoveClass {
                target: Target::Entry(0),
                class: "active".into(),
            }]
        );
        assert_eq!(v.active(), None);
    }

    #[test]
    fn reinit_resets_state() {
        let mut v = view();
        v.handle(HostEvent::ToggleClick);
        v.handle(intersect("a"));
        v.handle(HostEvent::Init {
            viewport_height: 600,
        });
        assert!(!v.is_open());
        assert_eq!(v.active(), None);
    }

    #[test]
    fn events_deserialize_from_protocol_json() {
        let e: HostEvent =
            serde_json::from_str(r#"{"event":"init","viewportHeight":720}"#).unwrap();
        assert!(matches!(e, HostEvent::Init { viewport_height: 720 }));

        let e: HostEvent = serde_json::from_str(
            r#"{"event":"intersection","id":"a","isIntersecting":true,"ratio":0.25}"#,
        )
        .unwrap();
        assert!(matches!(e, HostEvent::Intersection { .. }));

        let e: HostEvent = serde_json::from_str(r#"{"event":"toggle-click"}"#).unwrap();
        assert!(matches!(e, HostEvent::ToggleClick));
    }

    #[test]
    fn commands_serialize_tagged() {
        let json = serde_json::to_string(&Command::ScrollTo {
            id: "a".into(),
            behavior: ScrollBehavior::Smooth,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"scroll-to","id":"a","behavior":"smooth"}"#);

        let json = serde_json::to_string(&Command::AddClass {
            target: Target::Entry(2),
            class: "active".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"add-class","target":{"entry":2},"class":"active"}"#);
    }
}
