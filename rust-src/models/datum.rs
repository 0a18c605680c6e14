//! Traffic data records consumed by the charts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;


/// Counter selected to color the world map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Hits,
    Visitors,
    Bytes,
}


impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hits => "hits",
            Self::Visitors => "visitors",
            Self::Bytes => "bytes",
        }
    }
}


impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hits" => Ok(Self::Hits),
            "visitors" => Ok(Self::Visitors),
            "bytes" => Ok(Self::Bytes),
            _ => Err(ConfigError::UnknownMetric(s.to_string())),
        }
    }
}


impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// A named counter as it appears in the raw data (`{"count": 10}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Counter {
    #[serde(default)]
    pub count: f64,
}


/// A country or region record, optionally holding sub-regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MapDatum {
    pub data: String,
    #[serde(default)]
    pub hits: Counter,
    #[serde(default)]
    pub visitors: Counter,
    #[serde(default)]
    pub bytes: Counter,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MapDatum>,
    /// Label of the parent record once flattened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}


impl MapDatum {
    /// Value of `metric`, never negative.
    pub fn value(&self, metric: Metric) -> f64 {
        let raw = match metric {
            Metric::Hits => self.hits.count,
            Metric::Visitors => self.visitors.count,
            Metric::Bytes => self.bytes.count,
        };
        if raw.is_finite() { raw.max(0.0) } else { 0.0 }
    }

    /// Lookup key: the first whitespace-delimited token of the label.
    pub fn key(&self) -> &str {
        self.data.split_whitespace().next().unwrap_or("")
    }
}


/// An x-axis category: free text or a day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Label(String),
    Day(NaiveDate),
}


impl Category {
    /// Parse a raw category; `YYYYMMDD` strings become day buckets.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y%m%d") {
                return Self::Day(date);
            }
        }
        Self::Label(raw.to_string())
    }

    /// Stable key used to identify elements bound to this category.
    pub fn key(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Day(date) => date.format("%Y%m%d").to_string(),
        }
    }
}


impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Day(date) => write!(f, "{}", date.format("%d/%b/%Y")),
        }
    }
}


/// One normalized point of an area or bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDatum {
    pub category: Category,
    pub y0: f64,
    pub y1: Option<f64>,
}


impl SeriesDatum {
    pub fn new(category: Category, y0: f64, y1: Option<f64>) -> Self {
        Self { category, y0, y1 }
    }
}
