//! Detrended Fluctuation Analysis (DFA).
//!
//! Measures long-range correlation of the residual:
//! - H < 0.5: anti-persistent (mean-reverting)
//! - H = 0.5: uncorrelated
//! - H > 0.5: persistent (drift / memory)
//!
//! Alongside the Hurst exponent the R² of the log-log fit is returned, so the
//! scorer can ignore an exponent derived from a poor power law.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::stats::{linregress, polyfit};
use crate::processing::{ProcessingError, ProcessingResult};

/// Minimum profile length for a meaningful scale sweep.
const MIN_PROFILE_LEN: usize = 20;
const MIN_SCALE: usize = 4;
const LOG_SCALE_COUNT: usize = 20;
const MIN_FLUCTUATION: f64 = 1e-10;
const MIN_VALID_SCALES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfaResult {
    pub hurst: f64,
    pub r_squared: f64,
    pub scales: Vec<usize>,
    pub fluctuations: Vec<f64>,
}

impl DfaResult {
    /// Hurst 0.5, R² 0.0, no scales.
    pub fn neutral() -> Self {
        Self {
            hurst: 0.5,
            r_squared: 0.0,
            scales: Vec::new(),
            fluctuations: Vec::new(),
        }
    }
}

impl Default for DfaResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Order-1 DFA.
pub fn dfa(data: &[f64]) -> DfaResult {
    dfa_with_order(data, 1)
}

/// DFA with per-segment polynomial detrending of degree `order`.
///
/// Degenerate input (too short, too few usable scales, flat profile) and any
/// numerical failure yield [`DfaResult::neutral`]; failures are logged.
pub fn dfa_with_order(data: &[f64], order: usize) -> DfaResult {
    match run_dfa(data, order) {
        Ok(Some(result)) => result,
        Ok(None) => DfaResult::neutral(),
        Err(e) => {
            warn!(error = %e, len = data.len(), order, "DFA calculation failed, using neutral result");
            DfaResult::neutral()
        }
    }
}

/// `Ok(None)` is a documented degenerate case, `Err` an unexpected failure.
fn run_dfa(data: &[f64], order: usize) -> ProcessingResult<Option<DfaResult>> {
    if data.is_empty() {
        return Ok(None);
    }

    let mean = super::stats::mean(data);
    let profile: Vec<f64> = data
        .iter()
        .scan(0.0, |acc, &x| {
            *acc += x - mean;
            Some(*acc)
        })
        .collect();

    let n = profile.len();
    if n < MIN_PROFILE_LEN {
        return Ok(None);
    }

    let max_scale = n / 4;
    if max_scale < MIN_SCALE {
        return Ok(None);
    }

    let scales = select_scales(MIN_SCALE, max_scale, order);
    if scales.len() < 2 {
        return Ok(None);
    }

    let mut valid_scales = Vec::with_capacity(scales.len());
    let mut fluctuations = Vec::with_capacity(scales.len());
    for &scale in &scales {
        let f = fluctuation(&profile, scale, order)?;
        if f > MIN_FLUCTUATION {
            valid_scales.push(scale);
            fluctuations.push(f);
        }
    }

    if valid_scales.len() < MIN_VALID_SCALES {
        return Ok(None);
    }

    let log_scales: Vec<f64> = valid_scales.iter().map(|&s| (s as f64).ln()).collect();
    let log_flucts: Vec<f64> = fluctuations.iter().map(|f| f.ln()).collect();
    let fit = linregress(&log_scales, &log_flucts)?;

    if !fit.slope.is_finite() || !fit.r_squared.is_finite() {
        return Err(ProcessingError::NonFinite("DFA log-log fit"));
    }

    Ok(Some(DfaResult {
        hurst: fit.slope,
        r_squared: fit.r_squared,
        scales: valid_scales,
        fluctuations,
    }))
}

/// Candidate window sizes between `min_scale` and `max_scale`.
///
/// Twenty log-spaced values truncated to integers, deduplicated and kept only
/// when larger than `order + 2`. With fewer than three survivors the set is
/// regenerated linearly (`min_scale`, step `(max - min) / 5`, `max` excluded).
fn select_scales(min_scale: usize, max_scale: usize, order: usize) -> Vec<usize> {
    let floor = order + 2;
    let lo = (min_scale as f64).log10();
    let hi = (max_scale as f64).log10();
    let step = (hi - lo) / (LOG_SCALE_COUNT - 1) as f64;

    let mut scales: Vec<usize> = (0..LOG_SCALE_COUNT)
        .map(|i| {
            let exponent = if i == LOG_SCALE_COUNT - 1 {
                hi
            } else {
                lo + step * i as f64
            };
            10f64.powf(exponent) as usize
        })
        .collect();
    scales.sort_unstable();
    scales.dedup();
    scales.retain(|&s| s > floor);

    if scales.len() < MIN_VALID_SCALES {
        let stride = ((max_scale - min_scale) / 5).max(1);
        scales = (min_scale..max_scale)
            .step_by(stride)
            .filter(|&s| s > floor)
            .collect();
    }

    scales
}

/// RMS deviation of the profile from per-segment polynomial trends.
fn fluctuation(profile: &[f64], scale: usize, order: usize) -> ProcessingResult<f64> {
    let segments = profile.len() / scale;
    let x: Vec<f64> = (0..scale).map(|i| i as f64).collect();

    let mut total_sq = 0.0;
    for segment in profile.chunks_exact(scale) {
        let poly = polyfit(&x, segment, order)?;
        total_sq += segment
            .iter()
            .zip(&x)
            .map(|(&y, &xi)| (y - poly.eval(xi)).powi(2))
            .sum::<f64>();
    }

    Ok((total_sq / (segments * scale) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic xorshift noise in [-0.5, 0.5).
    fn white_noise(n: usize, mut state: u64) -> Vec<f64> {
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
            })
            .collect()
    }

    #[test]
    fn test_short_input_is_neutral() {
        let r = dfa(&[0.1; 19]);
        assert_eq!(r, DfaResult::neutral());
        assert!(r.scales.is_empty() && r.fluctuations.is_empty());
    }

    #[test]
    fn test_empty_input_is_neutral() {
        assert_eq!(dfa(&[]), DfaResult::neutral());
    }

    #[test]
    fn test_constant_input_is_neutral() {
        assert_eq!(dfa(&[2.0; 500]), DfaResult::neutral());
    }

    #[test]
    fn test_white_noise_near_half() {
        let noise = white_noise(4096, 0x9E37_79B9_7F4A_7C15);
        let r = dfa(&noise);
        assert!(r.hurst > 0.35 && r.hurst < 0.65, "hurst = {}", r.hurst);
        assert!(r.r_squared > 0.9, "r2 = {}", r.r_squared);
        assert_eq!(r.scales.len(), r.fluctuations.len());
        assert!(r.scales.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_random_walk_is_persistent() {
        let steps = white_noise(4096, 42);
        let walk: Vec<f64> = steps
            .iter()
            .scan(0.0, |acc, &s| {
                *acc += s;
                Some(*acc)
            })
            .collect();
        let r = dfa(&walk);
        assert!(r.hurst > 1.2, "hurst = {}", r.hurst);
    }

    #[test]
    fn test_select_scales_log_spaced() {
        let scales = select_scales(4, 250, 1);
        assert!(scales.len() >= 3);
        assert!(scales.iter().all(|&s| s > 3 && s <= 250));
        assert!(*scales.last().unwrap_or(&0) >= 249);
    }

    #[test]
    fn test_select_scales_linear_fallback() {
        // Log spacing over 4..5 collapses to at most two integers.
        let scales = select_scales(4, 5, 1);
        assert_eq!(scales, vec![4]);
    }
}
