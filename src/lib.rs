//! Orbit Browser: a native client for a semantic-network query server.
//!
//! The server answers every query with a tagged envelope; each tag maps
//! to a view pairing a structured document with a perspective-projected
//! graph canvas. The layers below the binary are GUI-free:
//!
//! - `model`: node/edge data model and the 7-member relation taxonomy
//! - `wire`: reply envelope and mode-specific payloads
//! - `net`: blocking HTTP client
//! - `render`: world-space scene recording, projection, egui replay
//! - `panel`: per-mode builders and the tag dispatcher

pub mod error;
pub mod model;
pub mod net;
pub mod panel;
pub mod render;
pub mod wire;
