//! pagetoc — auto-generated, navigable table of contents for web pages.
//!
//! Scans a page for heading elements, builds a collapsible side panel of
//! anchor links, and tracks which heading is in view while the reader
//! scrolls. The page is an explicit input (a file, scanned byte-wise) and
//! the browser's event surface is an explicit protocol: a host delivers UI
//! events, the component answers with the mutations to apply. See
//! [`view::TocView`] for the state machine and [`bridge`] for the wire
//! form.

pub mod band;
pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod inject;
pub mod panel;
pub mod scan;
pub mod toc;
pub mod types;
pub mod view;
