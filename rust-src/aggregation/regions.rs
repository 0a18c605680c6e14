//! Hierarchical map records flattened into a per-country lookup.

use std::collections::HashMap;

use crate::models::MapDatum;


/// Flatten records with `items` into leaves.
///
/// Children carry their parent's label in `region`; a record without
/// children is a leaf itself.
pub fn flatten_regions(records: &[MapDatum]) -> Vec<MapDatum> {
    let mut leaves = Vec::new();
    for record in records {
        collect_leaves(record, None, &mut leaves);
    }
    leaves
}


fn collect_leaves(record: &MapDatum, region: Option<&str>, leaves: &mut Vec<MapDatum>) {
    if record.items.is_empty() {
        let mut leaf = record.clone();
        if leaf.region.is_none() {
            leaf.region = region.map(str::to_string);
        }
        leaves.push(leaf);
        return;
    }

    for child in &record.items {
        collect_leaves(child, Some(&record.data), leaves);
    }
}


/// Index leaves by the first whitespace token of their label.
///
/// When two leaves share a key the first one is kept.
pub fn build_lookup(leaves: &[MapDatum]) -> HashMap<String, MapDatum> {
    let mut lookup = HashMap::with_capacity(leaves.len());
    for leaf in leaves {
        let key = leaf.key();
        if key.is_empty() {
            continue;
        }
        lookup.entry(key.to_string()).or_insert_with(|| leaf.clone());
    }
    lookup
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Counter, Metric};

    fn datum(label: &str, hits: f64) -> MapDatum {
        MapDatum {
            data: label.to_string(),
            hits: Counter { count: hits },
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_keeps_flat_records() {
        let leaves = flatten_regions(&[datum("Brazil", 100.0), datum("Chile", 5.0)]);
        assert_eq!(leaves.len(), 2);
        assert!(leaves.iter().all(|l| l.region.is_none()));
    }

    #[test]
    fn test_flatten_nested_regions() {
        let mut americas = datum("Americas", 0.0);
        americas.items = vec![datum("BR Brazil", 100.0), datum("AR Argentina", 7.0)];
        let mut europe = datum("Europe", 0.0);
        let mut west = datum("Western", 0.0);
        west.items = vec![datum("FR France", 3.0)];
        europe.items = vec![west];

        let leaves = flatten_regions(&[americas, europe]);
        let labels: Vec<&str> = leaves.iter().map(|l| l.data.as_str()).collect();
        assert_eq!(labels, vec!["BR Brazil", "AR Argentina", "FR France"]);
        assert_eq!(leaves[0].region.as_deref(), Some("Americas"));
        assert_eq!(leaves[2].region.as_deref(), Some("Western"));
        assert_eq!(leaves[0].value(Metric::Hits), 100.0);
    }

    #[test]
    fn test_lookup_by_first_token() {
        let leaves = vec![datum("BR Brazil", 100.0), datum("BR Duplicate", 1.0), datum("  ", 1.0)];
        let lookup = build_lookup(&leaves);

        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup["BR"].data, "BR Brazil");
    }
}
