//! Chart defaults, palette and path constants.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;


/// Default outer chart width (pixels).
pub const DEFAULT_WIDTH: f64 = 760.0;

/// Default outer chart height (pixels).
pub const DEFAULT_HEIGHT: f64 = 170.0;

/// Default margins: top, right, bottom, left.
pub const DEFAULT_MARGIN: (f64, f64, f64, f64) = (20.0, 50.0, 40.0, 50.0);

/// Target number of x-axis category ticks.
pub const DEFAULT_CATEGORY_TICKS: usize = 10;

/// Number of y-axis ticks requested from the linear scales.
pub const VALUE_TICKS: usize = 3;

/// Average glyph width used to truncate x-axis labels.
pub const GLYPH_WIDTH: f64 = 7.0;


/// Series colors (primary, secondary).
pub const SERIES_COLORS: [&str; 2] = ["#447fb3", "#ff6854"];

/// Quantile palette for the world map, lightest to darkest.
pub const MAP_PALETTE: [&str; 5] = ["#ffffcc", "#c2e699", "#78c679", "#31a354", "#006837"];

/// Fill for countries without data.
pub const NO_DATA_FILL: &str = "#cccccc";

/// Ocean backdrop for the orthographic globe.
pub const OCEAN_FILL: &str = "#d8e8f5";

/// Graticule stroke.
pub const GRATICULE_STROKE: &str = "#b0b0b0";

/// Grid and axis stroke.
pub const GRID_STROKE: &str = "#e2e2e2";

/// Opacity of a series while the other one is emphasized.
pub const DIMMED_OPACITY: f64 = 0.1;


/// Fill transition on map updates (ms).
pub const MAP_FILL_TRANSITION_MS: u32 = 500;

/// Sphere and graticule fade (ms).
pub const GLOBE_FADE_MS: u32 = 500;

/// Initial line dash sweep (ms).
pub const LINE_SWEEP_MS: u32 = 2000;

/// Bar growth duration (ms).
pub const BAR_GROW_MS: u32 = 500;

/// Total stagger budget spread across all bars (ms).
pub const BAR_STAGGER_MS: u32 = 1000;

/// Marks moving to new values on a re-render (ms).
pub const UPDATE_TRANSITION_MS: u32 = 500;


/// Mercator base scale used when the map is narrower than `NARROW_MAP_WIDTH`.
pub const NARROW_MAP_SCALE: f64 = 150.0;

/// Inner width below which the map falls back to `NARROW_MAP_SCALE`.
pub const NARROW_MAP_WIDTH: f64 = 400.0;

/// Maximum zoom relative to the fitted mercator view.
pub const MERCATOR_MAX_ZOOM: f64 = 6.0;

/// Maximum zoom relative to the fitted globe.
pub const ORTHOGRAPHIC_MAX_ZOOM: f64 = 2.0;

/// Latitude bound used for clamping; mercator diverges at the poles.
pub const MAX_VISIBLE_LATITUDE: f64 = 84.0;

/// Globe rotation in degrees per dragged pixel.
pub const ROTATION_SENSITIVITY: f64 = 0.25;

/// Minimum change in gesture scale that counts as a zoom.
pub const ZOOM_EPSILON: f64 = 1e-3;

/// Height of the map legend strip below the map.
pub const LEGEND_HEIGHT: f64 = 30.0;


/// Tooltip template id used by all charts.
pub const TOOLTIP_TEMPLATE_ID: &str = "tpl-chart-tooltip";

/// Built-in tooltip template: title line then one line per value.
pub const DEFAULT_TOOLTIP_TEMPLATE: &str =
    r#"<div class="chart-tooltip"><b>{0}</b><div>{1}</div><div>{2}</div></div>"#;


/// Get the default output directory for rendered charts.
pub fn get_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trafficviz")
}


/// Load a JSON configuration file into `T`.
pub fn load_json_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config in {}", path.display()))
}
