#![forbid(unsafe_code)]

//! Roadmap semantic model + hierarchy normalizer (headless).
//!
//! The input is a loosely-typed nested record (`serde_json::Value`) produced by whatever
//! document parser sits upstream. This crate turns it into a canonical [`Node`] tree and owns
//! the configuration shared by the layout pipeline.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;

pub use config::{ColorMode, RoadmapConfig};
pub use error::{Error, Result};
pub use model::{Node, Side, Status, Visibility};
pub use normalize::{
    Diagnostic, DiagnosticKind, Normalized, normalize_roadmap, normalize_roadmap_with_diagnostics,
};
