//! Aggregation layer: raw records shaped for the charts.

mod regions;
mod series;

#[allow(unused_imports)]
pub use regions::{build_lookup, flatten_regions};
pub use series::normalize_series;
