//! Typed errors raised at the configuration boundary.
//!
//! Rendering itself never fails; anything that can be wrong about a chart is
//! rejected here, before a chart is configured.

use thiserror::Error;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown metric '{0}' (expected hits, visitors or bytes)")]
    UnknownMetric(String),

    #[error("Unknown projection '{0}' (expected mercator or orthographic)")]
    UnknownProjection(String),

    #[error("Unknown value format '{0}' (expected str, bytes or number)")]
    UnknownFormat(String),

    #[error("Invalid accessor '{0}'")]
    InvalidAccessor(String),

    #[error("Invalid chart size {width}x{height}: margins leave no drawing area")]
    EmptyDrawingArea { width: f64, height: f64 },
}
