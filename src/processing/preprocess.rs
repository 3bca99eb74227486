//! Reading cleanup: bounded gap interpolation followed by spike removal.
//!
//! The sequence carries no timestamps, so the gap limit is expressed in
//! samples under the uniform-sampling assumption.

use tracing::debug;

use super::{median_filter, AnalysisError};
use crate::config::{defaults, SensorConfig};

/// Clean a raw reading sequence.
///
/// 1. Length check against `config.min_data_points`
/// 2. Gap fill (see [`fill_gaps`])
/// 3. Median filter, window 3
///
/// Non-finite readings are treated as missing. An input with no usable
/// sample fails with `count` set to the number of usable samples (0) and
/// `required` at least 1; an empty input that meets a zero requirement
/// yields an empty sequence.
pub fn preprocess(readings: &[f64], config: &SensorConfig) -> Result<Vec<f64>, AnalysisError> {
    let required = config.min_data_points;
    if readings.len() < required {
        return Err(AnalysisError::InsufficientData {
            count: readings.len(),
            required,
        });
    }

    if readings.is_empty() {
        return Ok(Vec::new());
    }

    let missing = readings.iter().filter(|v| !v.is_finite()).count();
    let filled = fill_gaps(readings, defaults::MAX_INTERPOLATED_GAP).ok_or(
        AnalysisError::InsufficientData {
            count: 0,
            required: required.max(1),
        },
    )?;

    if missing > 0 {
        debug!(missing, total = readings.len(), "Filled missing readings");
    }

    Ok(median_filter(&filled, defaults::SPIKE_FILTER_WINDOW))
}

/// Fill missing samples.
///
/// Each interior run of missing samples gets its first `limit` entries
/// linearly interpolated between the bounding valid samples. Whatever is still
/// missing is back-filled from the next valid sample, then forward-filled from
/// the previous one; leading runs therefore take the first valid value and
/// trailing runs the last.
///
/// Returns `None` when no sample is valid.
pub fn fill_gaps(readings: &[f64], limit: usize) -> Option<Vec<f64>> {
    let valid: Vec<usize> = readings
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, _)| i)
        .collect();

    let first = *valid.first()?;
    let last = *valid.last()?;
    let mut out: Vec<Option<f64>> = readings
        .iter()
        .map(|v| v.is_finite().then_some(*v))
        .collect();

    for pair in valid.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo <= 1 {
            continue;
        }
        let (a, b) = (readings[lo], readings[hi]);
        let span = (hi - lo) as f64;
        for (step, slot) in out[(lo + 1)..hi].iter_mut().enumerate().take(limit) {
            let k = (step + 1) as f64;
            *slot = Some(a + (b - a) * k / span);
        }
    }

    // Trailing run: interpolation clamps to the last valid value.
    out[(last + 1)..].fill(Some(readings[last]));

    let mut next_valid = readings[last];
    for slot in out[first..=last].iter_mut().rev() {
        match slot {
            Some(v) => next_valid = *v,
            None => *slot = Some(next_valid),
        }
    }
    out[..first].fill(Some(readings[first]));

    out.into_iter().collect()
}
