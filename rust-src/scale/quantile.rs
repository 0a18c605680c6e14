//! Quantile scale: maps values to discrete buckets of equal population.

/// Sorted sample domain split into `range.len()` equal-population buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale<T> {
    domain: Vec<f64>,
    range: Vec<T>,
    thresholds: Vec<f64>,
}


impl<T> QuantileScale<T> {
    /// Build a scale from sample values; non-finite samples are ignored.
    pub fn new(values: impl IntoIterator<Item = f64>, range: Vec<T>) -> Self {
        let mut domain: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        domain.sort_by(|a, b| a.total_cmp(b));

        let thresholds = if domain.is_empty() || range.is_empty() {
            Vec::new()
        } else {
            let n = range.len();
            (1..n).map(|i| quantile_sorted(&domain, i as f64 / n as f64)).collect()
        };

        Self { domain, range, thresholds }
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[T] {
        &self.range
    }

    /// Bucket boundaries; bucket `i` holds values in `[t[i-1], t[i])`.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Bucket index for `value`, `None` for an empty scale.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if self.domain.is_empty() || self.range.is_empty() || !value.is_finite() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }

    pub fn scale(&self, value: f64) -> Option<&T> {
        self.bucket(value).and_then(|i| self.range.get(i))
    }

    /// Lower bound of every bucket, starting with the domain minimum.
    pub fn bucket_lower_bounds(&self) -> Vec<f64> {
        match self.domain.first() {
            Some(&min) => std::iter::once(min).chain(self.thresholds.iter().copied()).collect(),
            None => Vec::new(),
        }
    }
}


/// Linear-interpolated quantile of sorted data (the R-7 definition).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if p <= 0.0 || n == 1 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }

    let i = (n - 1) as f64 * p;
    let i0 = i.floor() as usize;
    let lo = sorted[i0];
    let hi = sorted[(i0 + 1).min(n - 1)];
    lo + (hi - lo) * (i - i0 as f64)
}
