//! Dispersion statistics over populations and containers.

use crate::dense_map::DenseMap;
use crate::indexed::Indexed;
use crate::numeric::Numeric;

/// Gini coefficient of a population.
///
/// Ogwang (2000), "A convenient method of computing the Gini index and its
/// standard error": `G = (2/n) * sum(i * x_i) / sum(x_i) - 1 + 1/n` over
/// the sorted values. Zero for uniform or zero-mass populations.
#[must_use]
pub fn gini(values: &[f64]) -> f64 {
    gini_with_offset(values, 0.0)
}

/// Gini with every value shifted by `offset` first, for populations that
/// include negative values.
#[must_use]
pub fn gini_with_offset(values: &[f64], offset: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len() as f64;
    let mut top = 0.0;
    let mut bottom = 0.0;
    for (i, value) in sorted.iter().enumerate() {
        top += i as f64 * (value + offset);
        bottom += value + offset;
    }
    if bottom == 0.0 {
        return 0.0;
    }
    (2.0 / n) * (top / bottom) - 1.0 + 1.0 / n
}

/// Gini over a container's member values.
#[must_use]
pub fn gini_of<K: Indexed, V: Numeric>(map: &DenseMap<K, V>) -> f64 {
    let values: Vec<f64> = map.iter().map(|(_, v)| v.to_f64()).collect();
    gini(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_population_has_zero_dispersion() {
        assert_eq!(gini(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_empty_and_zero_mass_populations() {
        assert_eq!(gini(&[]), 0.0);
        assert_eq!(gini(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_skewed_populations_order_by_dispersion() {
        let mild = gini(&[4.0, 5.0, 5.0, 6.0]);
        let strong = gini(&[1.0, 1.0, 1.0, 17.0]);
        assert!(mild > 0.0);
        assert!(strong > mild);
        assert!(strong < 1.0);
    }

    #[test]
    fn test_offset_handles_negative_values() {
        // shifted population has the same ordering of dispersion
        let g = gini_with_offset(&[-1.0, 0.0, 1.0], 2.0);
        assert!(g > 0.0);
    }
}
