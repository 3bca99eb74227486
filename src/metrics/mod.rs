//! Metric engine: bias, slope, noise, SNR, hysteresis and DFA.
//!
//! Every analyzer is total. Short or degenerate inputs produce the documented
//! neutral value instead of an error, so a bundle is always complete.

mod dfa;
mod hysteresis;
mod snr;
pub mod stats;

pub use dfa::{dfa, dfa_with_order, DfaResult};
pub use hysteresis::{hysteresis, HysteresisResult};
pub use snr::snr_db;

use tracing::debug;

use crate::types::MetricBundle;

/// Fraction of the sequence used as the reference / current window for bias.
const BIAS_WINDOW_FRACTION: f64 = 0.1;

/// Mean of the last 10% minus mean of the first 10% (at least one sample each).
///
/// Fewer than 10 samples → 0.0.
pub fn bias(cleaned: &[f64]) -> f64 {
    let n = cleaned.len();
    if n < 10 {
        return 0.0;
    }
    let n_ref = ((n as f64 * BIAS_WINDOW_FRACTION) as usize).max(1);
    stats::mean(&cleaned[n - n_ref..]) - stats::mean(&cleaned[..n_ref])
}

/// Least-squares slope of value against sample index. Fewer than 2 samples → 0.0.
pub fn slope(trend: &[f64]) -> f64 {
    stats::linregress_index(trend).map_or(0.0, |fit| fit.slope)
}

/// Population standard deviation of the residual.
pub fn noise_std(residual: &[f64]) -> f64 {
    stats::population_std(residual)
}

/// Run all analyzers and assemble the bundle.
///
/// Bias, SNR and hysteresis read the cleaned sequence; slope reads the trend;
/// noise and DFA read the residual.
pub fn compute_metrics(cleaned: &[f64], trend: &[f64], residual: &[f64]) -> MetricBundle {
    let hyst = hysteresis(cleaned);
    let fluct = dfa(residual);

    let bundle = MetricBundle {
        bias: bias(cleaned),
        slope: slope(trend),
        noise_std: noise_std(residual),
        snr_db: snr_db(cleaned),
        hysteresis: hyst.score,
        hysteresis_rising: hyst.rising,
        hysteresis_falling: hyst.falling,
        hurst: fluct.hurst,
        hurst_r2: fluct.r_squared,
        dfa_scales: fluct.scales,
        dfa_fluctuations: fluct.fluctuations,
        trend: trend.to_vec(),
        residuals: residual.to_vec(),
    };

    debug!(
        bias = bundle.bias,
        slope = bundle.slope,
        noise_std = bundle.noise_std,
        snr_db = bundle.snr_db,
        hysteresis = bundle.hysteresis,
        hurst = bundle.hurst,
        hurst_r2 = bundle.hurst_r2,
        "Metrics computed"
    );

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_first_and_last_tenth() {
        let mut data = vec![0.0];
        data.extend(vec![5.0; 8]);
        data.push(10.0);
        assert!((bias(&data) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_bias_short_input() {
        assert_eq!(bias(&[0.0, 100.0, 200.0]), 0.0);
    }

    #[test]
    fn test_bias_constant() {
        assert_eq!(bias(&[7.5; 80]), 0.0);
    }

    #[test]
    fn test_slope_of_ramp() {
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert!((slope(&data) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_slope_degenerate() {
        assert_eq!(slope(&[]), 0.0);
        assert_eq!(slope(&[3.0]), 0.0);
        assert_eq!(slope(&[3.0; 20]), 0.0);
    }

    #[test]
    fn test_noise_std_of_residual() {
        assert!((noise_std(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(noise_std(&[]), 0.0);
    }

    #[test]
    fn test_compute_metrics_reads_the_right_inputs() {
        let cleaned: Vec<f64> = (0..100).map(|i| i as f64 * 0.5).collect();
        let trend = vec![2.0; 100];
        let residual = vec![0.0; 100];
        let bundle = compute_metrics(&cleaned, &trend, &residual);
        // Slope comes from the (flat) trend, bias from the (rising) cleaned data.
        assert_eq!(bundle.slope, 0.0);
        assert!(bundle.bias > 40.0);
        assert_eq!(bundle.noise_std, 0.0);
        assert_eq!(bundle.hurst, 0.5);
        assert_eq!(bundle.hurst_r2, 0.0);
        assert_eq!(bundle.trend, trend);
    }
}
