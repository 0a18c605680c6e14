//! Loaders for map records, chart records and country features.
//!
//! Input is validated here so the render path never has to fail. Records may
//! be given as one JSON array or as JSON lines.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::geo::FeatureCollection;
use crate::models::MapDatum;


/// Read map records from a file.
pub fn load_map_data(path: &Path) -> Result<Vec<MapDatum>> {
    let content = read(path)?;
    parse_map_data(&content).with_context(|| format!("Invalid map data in {}", path.display()))
}


pub fn parse_map_data(content: &str) -> Result<Vec<MapDatum>> {
    parse_records(content)
}


/// Read raw chart records from a file.
pub fn load_series_data(path: &Path) -> Result<Vec<Value>> {
    let content = read(path)?;
    parse_series_data(&content).with_context(|| format!("Invalid chart data in {}", path.display()))
}


/// Raw records stay untyped; the chart accessors pick the fields.
pub fn parse_series_data(content: &str) -> Result<Vec<Value>> {
    parse_records(content)
}


/// Read a GeoJSON feature collection.
pub fn load_features(path: &Path) -> Result<FeatureCollection> {
    let content = read(path)?;
    parse_features(&content).with_context(|| format!("Invalid GeoJSON in {}", path.display()))
}


pub fn parse_features(content: &str) -> Result<FeatureCollection> {
    let collection: FeatureCollection =
        serde_json::from_str(content).context("Failed to parse feature collection")?;

    let unnamed = collection
        .features
        .iter()
        .filter(|f| f.country_id().is_none())
        .count();
    if unnamed > 0 {
        warn!(unnamed, "features without an id or name will not be drawn");
    }

    Ok(collection)
}


fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}


/// A JSON array, or one JSON value per line (malformed lines are skipped).
fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        let array_err = match serde_json::from_str(trimmed) {
            Ok(records) => return Ok(records),
            Err(e) => e,
        };
        // Rows that are arrays themselves, one per line
        let first_line = trimmed.lines().next().unwrap_or_default();
        if serde_json::from_str::<T>(first_line.trim()).is_err() {
            return Err(array_err).context("Failed to parse JSON array");
        }
    }

    let mut records = Vec::new();
    let mut malformed = 0;

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                malformed += 1;
                warn!(line = line_num + 1, error = %e, "skipping malformed record");
            }
        }
    }

    if records.is_empty() && malformed > 0 {
        bail!("No valid records found ({malformed} malformed lines)");
    }

    Ok(records)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use serde_json::json;

    use crate::models::Metric;

    #[test]
    fn test_parse_map_array() {
        let content = r#"[{"data":"Brazil","hits":{"count":100},"visitors":{"count":40},"bytes":{"count":5000}}]"#;
        let records = parse_map_data(content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(Metric::Visitors), 40.0);
    }

    #[test]
    fn test_parse_json_lines_skips_malformed() {
        let content = "[\"Jan\", 10, 2]\nnot json\n\n[\"Feb\", 20, 5]\n";
        let records = parse_series_data(content).unwrap();
        assert_eq!(records, vec![json!(["Jan", 10, 2]), json!(["Feb", 20, 5])]);

        let content = "{\"d\":\"Jan\"}\nnot json\n{\"d\":\"Feb\"}\n";
        let records = parse_series_data(content).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_array_rows_as_json_lines() {
        let records = parse_series_data("[\"Jan\", 10, 2]\n[\"Feb\", 20, 5]\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], json!(["Feb", 20, 5]));

        // A single array spread over several lines is still one document
        let records = parse_series_data("[\n  [\"Jan\", 10, 2],\n  [\"Feb\", 20, 5]\n]\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_broken_array_fails() {
        let err = parse_map_data("[{\"data\":\"Brazil\"},\n{\"data\":").unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON array"));
    }

    #[test]
    fn test_parse_all_malformed_fails() {
        assert!(parse_map_data("nope\nstill nope").is_err());
        assert!(parse_map_data("   ").unwrap().is_empty());
    }

    #[test]
    fn test_load_features_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","id":"BRA","properties":{{"name":"Brazil"}},"geometry":{{"type":"Polygon","coordinates":[[[-60,-10],[-40,-10],[-40,-20],[-60,-20],[-60,-10]]]}}}}]}}"#
        )
        .unwrap();

        let collection = load_features(file.path()).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].country_id().as_deref(), Some("BRA"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_map_data(Path::new("/nonexistent/map.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
