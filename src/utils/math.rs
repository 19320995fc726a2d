//! Mathematical utility functions

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population coefficient of variation (stddev / mean).
/// Returns 0.0 with fewer than two samples or a zero mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mu = mean(values);
    if mu == 0.0 {
        tracing::debug!("coefficient_of_variation: zero mean over {} samples", values.len());
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / mu
}

/// Round half away from zero and clamp into `[lo, hi]`
pub fn round_clamp(value: f64, lo: i32, hi: i32) -> i32 {
    (value.round() as i32).clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_handles_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn cv_of_constant_series_is_zero() {
        assert_eq!(coefficient_of_variation(&[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[5.0]), 0.0);
    }

    #[test]
    fn cv_matches_population_formula() {
        // mean 2, population stddev 1
        let cv = coefficient_of_variation(&[1.0, 3.0]);
        assert!((cv - 0.5).abs() < 1e-9);
    }

    #[test]
    fn round_clamp_bounds() {
        assert_eq!(round_clamp(85.5, 20, 95), 86);
        assert_eq!(round_clamp(120.0, 20, 95), 95);
        assert_eq!(round_clamp(-3.0, 20, 95), 20);
    }
}
