//! Data models for traffic records and chart configuration.

mod chart_config;
mod datum;

#[allow(unused_imports)]
pub use chart_config::{
    Accessor,
    AxisFormats,
    AxisLabels,
    ChartConfig,
    ChartOpts,
    FormatKind,
    MapConfig,
    MapOpts,
    Margin,
    ProjectionType,
    DEFAULT_MAP_HEIGHT,
};
pub use datum::{Category, Counter, MapDatum, Metric, SeriesDatum};
