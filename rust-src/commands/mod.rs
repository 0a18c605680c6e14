//! CLI command implementations.

pub mod render;
