//! Data access layer for traffic records and world geometry.

mod loader;

#[allow(unused_imports)]
pub use loader::{
    load_features,
    load_map_data,
    load_series_data,
    parse_features,
    parse_map_data,
    parse_series_data,
};
