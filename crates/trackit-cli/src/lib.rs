//! CLI library components for the TRACK-IT exporter.

pub mod logging;
pub mod pipeline;
pub mod types;
