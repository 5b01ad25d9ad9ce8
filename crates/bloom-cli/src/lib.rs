//! CLI library components for the Bloom authoring tool.

pub mod logging;
pub mod workspace;
