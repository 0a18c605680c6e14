//! Raw chart records normalized into series points.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::models::{Accessor, SeriesDatum};


/// Resolve each raw record through the accessors.
///
/// Records whose category cannot be resolved are skipped; missing, negative
/// or non-finite values count as 0. `y1` is read only when `y1` is given.
/// Repeated categories are summed into the first point with that category.
pub fn normalize_series(
    raw: &[Value],
    x: &Accessor,
    y0: &Accessor,
    y1: Option<&Accessor>,
) -> Vec<SeriesDatum> {
    let mut points: Vec<SeriesDatum> = Vec::with_capacity(raw.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for (index, record) in raw.iter().enumerate() {
        let Some(category) = x.category(record) else {
            warn!(index, "skipping record without a category");
            continue;
        };

        let value0 = non_negative(y0.number(record));
        let value1 = y1.map(|accessor| non_negative(accessor.number(record)));

        let key = category.key();
        if let Some(&slot) = slots.get(&key) {
            warn!(index, category = %key, "merging repeated category");
            let point = &mut points[slot];
            point.y0 += value0;
            point.y1 = match (point.y1, value1) {
                (Some(a), Some(b)) => Some(a + b),
                (a, b) => a.or(b),
            };
            continue;
        }

        slots.insert(key, points.len());
        points.push(SeriesDatum::new(category, value0, value1));
    }

    points
}


fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => 0.0,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::models::Category;

    #[test]
    fn test_normalize_arrays() {
        let raw = vec![json!(["Jan", 10, 2]), json!(["Feb", 20, 5])];
        let points = normalize_series(
            &raw,
            &Accessor::Index(0),
            &Accessor::Index(1),
            Some(&Accessor::Index(2)),
        );

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], SeriesDatum::new(Category::Label("Jan".into()), 10.0, Some(2.0)));
        assert_eq!(points[1].y1, Some(5.0));
    }

    #[test]
    fn test_normalize_objects_with_paths() {
        let raw = vec![json!({"data": "20261019", "hits": {"count": 12}, "visitors": {"count": "4"}})];
        let x: Accessor = "data".parse().unwrap();
        let y0: Accessor = "hits.count".parse().unwrap();
        let y1: Accessor = "visitors.count".parse().unwrap();

        let points = normalize_series(&raw, &x, &y0, Some(&y1));
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(points[0], SeriesDatum::new(Category::Day(day), 12.0, Some(4.0)));
    }

    #[test]
    fn test_normalize_clamps_and_skips() {
        let raw = vec![json!(["A", -3, null]), json!([null, 1, 1]), json!(["B"])];
        let points = normalize_series(
            &raw,
            &Accessor::Index(0),
            &Accessor::Index(1),
            Some(&Accessor::Index(2)),
        );

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].y0, 0.0);
        assert_eq!(points[0].y1, Some(0.0));
        assert_eq!(points[1].y0, 0.0);
    }

    #[test]
    fn test_normalize_merges_repeated_categories() {
        let raw = vec![json!(["Jan", 10, 2]), json!(["Jan", 5, 1]), json!(["Feb", 20, 5])];
        let points = normalize_series(
            &raw,
            &Accessor::Index(0),
            &Accessor::Index(1),
            Some(&Accessor::Index(2)),
        );

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], SeriesDatum::new(Category::Label("Jan".into()), 15.0, Some(3.0)));
        assert_eq!(points[1].category, Category::Label("Feb".into()));
    }

    #[test]
    fn test_normalize_without_second_series() {
        let raw = vec![json!(["A", 1, 9])];
        let points = normalize_series(&raw, &Accessor::Index(0), &Accessor::Index(1), None);
        assert_eq!(points[0].y1, None);
    }
}
