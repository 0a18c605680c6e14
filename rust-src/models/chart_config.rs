//! Chart configuration value objects.
//!
//! A chart is configured by handing it a whole config value; there are no
//! per-field setters. All types deserialize from JSON with the same defaults
//! a freshly created chart uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{
    DEFAULT_CATEGORY_TICKS, DEFAULT_HEIGHT, DEFAULT_MARGIN, DEFAULT_WIDTH,
};
use crate::error::ConfigError;
use crate::models::{Category, Metric};


/// Default map height; the map needs more room than the series charts.
pub const DEFAULT_MAP_HEIGHT: f64 = 350.0;


/// Map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectionType {
    #[default]
    Mercator,
    Orthographic,
}


impl FromStr for ProjectionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mercator" => Ok(Self::Mercator),
            "orthographic" => Ok(Self::Orthographic),
            _ => Err(ConfigError::UnknownProjection(s.to_string())),
        }
    }
}


impl TryFrom<String> for ProjectionType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}


impl From<ProjectionType> for String {
    fn from(value: ProjectionType) -> Self {
        value.to_string()
    }
}


impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mercator => f.write_str("mercator"),
            Self::Orthographic => f.write_str("orthographic"),
        }
    }
}


/// How a value is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatKind {
    Str,
    Bytes,
    Number,
}


impl FromStr for FormatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" => Ok(Self::Str),
            "bytes" => Ok(Self::Bytes),
            "number" | "numeric" => Ok(Self::Number),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}


impl TryFrom<String> for FormatKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}


impl From<FormatKind> for String {
    fn from(value: FormatKind) -> Self {
        match value {
            FormatKind::Str => "str",
            FormatKind::Bytes => "bytes",
            FormatKind::Number => "number",
        }
        .to_string()
    }
}


/// Maps a raw record to one of its fields.
///
/// `Index(n)` reads the n-th element of an array record; `Field` walks a
/// dotted path (`"hits.count"`) through nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessorRepr")]
pub enum Accessor {
    Index(usize),
    Field(Vec<String>),
}


#[derive(Deserialize)]
#[serde(untagged)]
enum AccessorRepr {
    Index(usize),
    Path(String),
}


impl TryFrom<AccessorRepr> for Accessor {
    type Error = ConfigError;

    fn try_from(value: AccessorRepr) -> Result<Self, Self::Error> {
        match value {
            AccessorRepr::Index(i) => Ok(Self::Index(i)),
            AccessorRepr::Path(path) => path.parse(),
        }
    }
}


impl FromStr for Accessor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Ok(Self::Index(index));
        }

        let segments: Vec<String> = s.split('.').map(String::from).collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(ConfigError::InvalidAccessor(s.to_string()));
        }
        Ok(Self::Field(segments))
    }
}


impl Accessor {
    /// Look the field up in a raw record.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Index(i) => record.get(*i),
            Self::Field(path) => path.iter().try_fold(record, |node, seg| match node {
                Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => node.get(seg.as_str()),
            }),
        }
    }

    /// Resolve the field as a category label.
    pub fn category(&self, record: &Value) -> Option<Category> {
        match self.resolve(record)? {
            Value::String(s) => Some(Category::parse(s)),
            Value::Number(n) => Some(Category::parse(&n.to_string())),
            _ => None,
        }
    }

    /// Resolve the field as a number; numeric strings are accepted.
    pub fn number(&self, record: &Value) -> Option<f64> {
        match self.resolve(record)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}


impl Default for Margin {
    fn default() -> Self {
        let (top, right, bottom, left) = DEFAULT_MARGIN;
        Self { top, right, bottom, left }
    }
}


/// Value formatter per axis; `None` falls back to a thousands-separated number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxisFormats {
    pub x: Option<FormatKind>,
    pub y0: Option<FormatKind>,
    pub y1: Option<FormatKind>,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabels {
    pub x: String,
    pub y0: String,
    pub y1: String,
}


impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x: "Unnamed".to_string(),
            y0: "Unnamed".to_string(),
            y1: "Unnamed".to_string(),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChartOpts {
    /// Plot `y1` as a second series against its own axis.
    #[serde(rename = "dualYaxis", alias = "dual_y_axis")]
    pub dual_y_axis: bool,
}


/// Configuration shared by the area and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub opts: ChartOpts,
    pub format: AxisFormats,
    pub labels: AxisLabels,
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    pub n_ticks: usize,
    pub x: Accessor,
    pub y0: Accessor,
    pub y1: Accessor,
}


impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            opts: ChartOpts::default(),
            format: AxisFormats::default(),
            labels: AxisLabels::default(),
            margin: Margin::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            n_ticks: DEFAULT_CATEGORY_TICKS,
            x: Accessor::Index(0),
            y0: Accessor::Index(1),
            y1: Accessor::Index(2),
        }
    }
}


/// Positive, finite inner size; NaN and infinity fail.
fn has_drawing_area(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}


impl ChartConfig {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Reject sizes that leave no drawing area.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !has_drawing_area(self.inner_width(), self.inner_height()) {
            return Err(ConfigError::EmptyDrawingArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOpts {
    /// Draw the quantile legend below the map.
    pub legend: bool,
    /// Graticule spacing in degrees.
    pub graticule_step: f64,
}


impl Default for MapOpts {
    fn default() -> Self {
        Self { legend: true, graticule_step: 10.0 }
    }
}


/// Configuration of the world map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub metric: Metric,
    pub opts: MapOpts,
    pub margin: Margin,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "projectionType", alias = "projection")]
    pub projection: ProjectionType,
}


impl Default for MapConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            opts: MapOpts::default(),
            margin: Margin { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 },
            width: DEFAULT_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            projection: ProjectionType::default(),
        }
    }
}


impl MapConfig {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !has_drawing_area(self.inner_width(), self.inner_height()) {
            return Err(ConfigError::EmptyDrawingArea {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
