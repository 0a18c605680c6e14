//! Country polygons as a GeoJSON feature collection.

use serde::Deserialize;
use serde_json::{Map, Value};


/// A lon/lat ring, degrees.
pub type Ring = Vec<[f64; 2]>;


#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}


#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}


/// Supported geometries; anything else is carried as `Unsupported` and skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}


impl Geometry {
    /// All polygons as lists of rings (outer ring first).
    pub fn polygons(&self) -> Vec<Vec<Ring>> {
        match self {
            Self::Polygon { coordinates } => vec![to_rings(coordinates)],
            Self::MultiPolygon { coordinates } => coordinates.iter().map(|p| to_rings(p)).collect(),
            Self::Unsupported => Vec::new(),
        }
    }
}


fn to_rings(rings: &[Vec<Vec<f64>>]) -> Vec<Ring> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| [pos[0], pos[1]])
                .collect()
        })
        .collect()
}


const NAME_PROPERTIES: [&str; 4] = ["name", "NAME", "admin", "ADMIN"];
const CODE_PROPERTIES: [&str; 4] = ["iso_a2", "ISO_A2", "iso_a3", "ISO_A3"];


impl Feature {
    /// Stable identifier used as the element key for this country.
    pub fn country_id(&self) -> Option<String> {
        if let Some(id) = self.id.as_ref().and_then(value_to_string) {
            return Some(id);
        }
        CODE_PROPERTIES
            .iter()
            .chain(NAME_PROPERTIES.iter())
            .find_map(|key| self.properties.get(*key).and_then(value_to_string))
    }

    /// Display name, if the feature carries one.
    pub fn name(&self) -> Option<&str> {
        NAME_PROPERTIES
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(Value::as_str))
    }

    /// Keys a data record may use to refer to this country.
    pub fn match_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(id) = self.id.as_ref().and_then(value_to_string) {
            keys.push(id);
        }
        for key in CODE_PROPERTIES {
            if let Some(code) = self.properties.get(key).and_then(value_to_string) {
                keys.push(code);
            }
        }
        if let Some(name) = self.name() {
            keys.push(name.to_string());
            if let Some(first) = name.split_whitespace().next() {
                keys.push(first.to_string());
            }
        }
        keys.dedup();
        keys
    }

    pub fn polygons(&self) -> Vec<Vec<Ring>> {
        self.geometry.as_ref().map(Geometry::polygons).unwrap_or_default()
    }
}


fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
