//! Configuration and settings for trafficviz.

mod settings;

#[allow(unused_imports)]
pub use settings::*;
