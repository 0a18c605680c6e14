//! Category tick selection for the x-axis.

/// Indices of the categories that get an x-axis tick.
///
/// Fewer categories than `target` show every category. Otherwise up to
/// `target` indices are spread evenly over the domain; the returned indices
/// are strictly increasing and always in bounds.
pub fn category_tick_indices(len: usize, target: usize) -> Vec<usize> {
    if len == 0 || target == 0 {
        return Vec::new();
    }
    if len < target {
        return (0..len).collect();
    }
    if target == 1 {
        return vec![0];
    }

    let stride = (len - 1) as f64 / (target - 1) as f64;
    let mut indices: Vec<usize> = Vec::with_capacity(target);
    for i in 0..target {
        let index = (i as f64 * stride).round() as usize;
        if index >= len {
            continue;
        }
        if indices.last().is_some_and(|&last| last >= index) {
            continue;
        }
        indices.push(index);
    }
    indices
}


/// The categories that get an x-axis tick, in domain order.
pub fn category_ticks<T: Clone>(domain: &[T], target: usize) -> Vec<T> {
    category_tick_indices(domain.len(), target)
        .into_iter()
        .map(|i| domain[i].clone())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_domain_shows_everything() {
        let domain = vec!["Jan", "Feb"];
        assert_eq!(category_ticks(&domain, 10), domain);
    }

    #[test]
    fn test_large_domain_sampled() {
        let indices = category_tick_indices(31, 10);
        assert_eq!(indices.len(), 10);
        assert_eq!(indices.first(), Some(&0));
        assert_eq!(indices.last(), Some(&30));
    }

    #[test]
    fn test_sampling_properties_hold_for_many_sizes() {
        for target in 1..15 {
            for len in 0..200 {
                let indices = category_tick_indices(len, target);
                if len < target {
                    assert_eq!(indices, (0..len).collect::<Vec<_>>());
                    continue;
                }
                assert_eq!(indices.len(), target.min(len), "len={len} target={target}");
                assert!(indices.windows(2).all(|w| w[0] < w[1]));
                assert!(indices.iter().all(|&i| i < len));
            }
        }
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(category_tick_indices(10, 10), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_target() {
        assert!(category_tick_indices(5, 0).is_empty());
    }
}
