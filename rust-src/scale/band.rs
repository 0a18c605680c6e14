//! Ordinal band scale for category axes.

use std::collections::HashMap;


/// Splits a continuous range into equal bands, one per domain key.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: [f64; 2],
    padding_inner: f64,
}


impl BandScale {
    /// Repeated keys keep the band of their first occurrence.
    pub fn new(keys: Vec<String>, range: [f64; 2]) -> Self {
        let mut domain = Vec::with_capacity(keys.len());
        let mut index = HashMap::with_capacity(keys.len());
        for key in keys {
            if !index.contains_key(&key) {
                index.insert(key.clone(), domain.len());
                domain.push(key);
            }
        }

        Self {
            domain,
            index,
            range,
            padding_inner: 0.0,
        }
    }

    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let [r0, r1] = self.range;
        (r1 - r0) / (n - self.padding_inner).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band at `index`.
    pub fn position_at(&self, index: usize) -> f64 {
        let n = self.domain.len() as f64;
        let [r0, r1] = self.range;
        let step = self.step();
        let start = r0 + (r1 - r0 - step * (n - self.padding_inner)) * 0.5;
        start + step * index as f64
    }

    /// Start of the band for `key`, `None` if the key is not in the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.position_at(i))
    }

    /// Center of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth() / 2.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_band_without_padding() {
        let scale = BandScale::new(keys(&["a", "b", "c", "d"]), [0.0, 400.0]);
        assert_eq!(scale.step(), 100.0);
        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.position("a"), Some(0.0));
        assert_eq!(scale.position("d"), Some(300.0));
        assert_eq!(scale.center("b"), Some(150.0));
        assert_eq!(scale.position("z"), None);
    }

    #[test]
    fn test_band_with_inner_padding() {
        let scale = BandScale::new(keys(&["a", "b"]), [0.0, 190.0]).padding_inner(0.1);
        // step = 190 / (2 - 0.1)
        assert!((scale.step() - 100.0).abs() < 1e-9);
        assert!((scale.bandwidth() - 90.0).abs() < 1e-9);
        assert!((scale.position_at(1) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_repeated_keys_share_first_band() {
        let scale = BandScale::new(keys(&["Jan", "Jan", "Feb"]), [0.0, 660.0]);
        assert_eq!(scale.domain(), &["Jan".to_string(), "Feb".to_string()]);
        assert_eq!(scale.step(), 330.0);
        assert_eq!(scale.position("Jan"), Some(0.0));
        assert_eq!(scale.position("Feb"), Some(330.0));
    }

    #[test]
    fn test_band_empty_domain() {
        let scale = BandScale::new(Vec::new(), [0.0, 100.0]);
        assert_eq!(scale.step(), 100.0);
        assert!(scale.domain().is_empty());
    }
}
