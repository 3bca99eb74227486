//! Trend / residual separation.
//!
//! The trend carries process change; the residual carries the sensor's own
//! noise characteristics and feeds the noise and DFA metrics.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{median_filter, savgol_filter};
use crate::config::{defaults, SensorConfig};

/// Smooth trend plus residual; `trend[i] + residual[i] == cleaned[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Split a cleaned sequence into trend and residual.
///
/// Sequences shorter than `config.min_data_points` are returned unchanged as
/// the trend with an all-zero residual.
pub fn decompose(cleaned: &[f64], config: &SensorConfig) -> Decomposition {
    let n = cleaned.len();
    if n < config.min_data_points {
        return Decomposition {
            trend: cleaned.to_vec(),
            residual: vec![0.0; n],
        };
    }

    let window = odd_at_most(n.min(defaults::TREND_WINDOW_MAX)).max(3);
    let order = if window <= defaults::TREND_POLY_ORDER {
        window - 1
    } else {
        defaults::TREND_POLY_ORDER
    };

    let trend = match savgol_filter(cleaned, window, order) {
        Ok(trend) => trend,
        Err(e) => {
            let kernel = odd_at_most(n.min(defaults::FALLBACK_MEDIAN_WINDOW_MAX));
            warn!(error = %e, window, order, kernel, "Savitzky-Golay filter failed, using median filter fallback");
            median_filter(cleaned, kernel)
        }
    };

    let residual = cleaned.iter().zip(&trend).map(|(c, t)| c - t).collect();
    Decomposition { trend, residual }
}

fn odd_at_most(n: usize) -> usize {
    if n % 2 == 0 {
        n.saturating_sub(1)
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_ramp(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 0.02 * i as f64 + 0.3 * ((i * 7 % 11) as f64 - 5.0) / 5.0)
            .collect()
    }

    #[test]
    fn test_trend_plus_residual_reconstructs() {
        let data = noisy_ramp(200);
        let parts = decompose(&data, &SensorConfig::default());
        assert_eq!(parts.trend.len(), data.len());
        for i in 0..data.len() {
            assert!((parts.trend[i] + parts.residual[i] - data[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_short_input_passthrough() {
        let data = vec![1.0, 2.0, 3.0];
        let parts = decompose(&data, &SensorConfig::default());
        assert_eq!(parts.trend, data);
        assert_eq!(parts.residual, vec![0.0; 3]);
    }

    #[test]
    fn test_linear_input_has_zero_residual() {
        let data: Vec<f64> = (0..120).map(|i| 3.0 + 0.5 * i as f64).collect();
        let parts = decompose(&data, &SensorConfig::default());
        assert!(parts.residual.iter().all(|r| r.abs() < 1e-8));
    }

    #[test]
    fn test_small_min_points_uses_small_window() {
        let config = SensorConfig {
            min_data_points: 3,
            ..SensorConfig::default()
        };
        let data = vec![1.0, 5.0, 2.0, 4.0];
        let parts = decompose(&data, &config);
        for i in 0..data.len() {
            assert!((parts.trend[i] + parts.residual[i] - data[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_median_fallback_when_window_exceeds_input() {
        // Two samples cannot hold the minimum 3-point window, so the
        // Savitzky-Golay fit fails and the kernel-1 median takes over.
        let config = SensorConfig {
            min_data_points: 2,
            ..SensorConfig::default()
        };
        let data = vec![1.0, 3.0];
        let parts = decompose(&data, &config);
        assert_eq!(parts.trend, data);
        assert_eq!(parts.residual, vec![0.0, 0.0]);
        for i in 0..data.len() {
            assert_eq!(parts.trend[i] + parts.residual[i], data[i]);
        }
    }

    #[test]
    fn test_odd_at_most() {
        assert_eq!(odd_at_most(51), 51);
        assert_eq!(odd_at_most(50), 49);
        assert_eq!(odd_at_most(0), 0);
    }
}
