use serde::{Deserialize, Serialize};

use super::stats::{mean, peak_to_peak, population_std};
use crate::processing::moving_average_centered;

const SMOOTHING_WINDOW: usize = 5;
const EDGE_THRESHOLD_FACTOR: f64 = 0.5;

/// Hysteresis score with the samples that formed each phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HysteresisResult {
    pub score: f64,
    /// Values at indices where the smoothed signal was rising.
    pub rising: Vec<f64>,
    /// Values at indices where the smoothed signal was falling.
    pub falling: Vec<f64>,
}

/// Difference between the average level during rising and falling phases,
/// normalized by the data range.
///
/// The signal is smoothed with a centered 5-sample moving average; a step is
/// "rising" when its first difference exceeds half the standard deviation of
/// all differences, "falling" when below the negative of that.
/// Fewer than 5 samples, or no rising or no falling step → score 0.0 with
/// empty arrays.
pub fn hysteresis(data: &[f64]) -> HysteresisResult {
    if data.len() < SMOOTHING_WINDOW {
        return HysteresisResult::default();
    }

    let smooth = moving_average_centered(data, SMOOTHING_WINDOW);
    let diffs: Vec<f64> = smooth.windows(2).map(|w| w[1] - w[0]).collect();
    let threshold = population_std(&diffs) * EDGE_THRESHOLD_FACTOR;

    let rising: Vec<f64> = diffs
        .iter()
        .zip(data)
        .filter(|(d, _)| **d > threshold)
        .map(|(_, v)| *v)
        .collect();
    let falling: Vec<f64> = diffs
        .iter()
        .zip(data)
        .filter(|(d, _)| **d < -threshold)
        .map(|(_, v)| *v)
        .collect();

    if rising.is_empty() || falling.is_empty() {
        return HysteresisResult::default();
    }

    let range = match peak_to_peak(data) {
        r if r > 0.0 => r,
        _ => 1.0,
    };

    HysteresisResult {
        score: (mean(&rising) - mean(&falling)).abs() / range,
        rising,
        falling,
    }
}
