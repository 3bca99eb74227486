//! Remaining-useful-life projection.
//!
//! Extrapolates the trend line to the critical bias band around the initial
//! trend value. One sample is taken as one second.

use crate::config::SensorConfig;
use crate::metrics::stats::linregress_index;

pub const RUL_STABLE: &str = "Stable (> 1 year)";
pub const RUL_EXCEEDED: &str = "Critical Threshold Exceeded";

const MIN_SLOPE: f64 = 1e-6;
const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_DAY: f64 = SECS_PER_HOUR * 24.0;
const SECS_PER_YEAR: f64 = SECS_PER_DAY * 365.0;

/// Project the time until the trend leaves `initial ± bias_critical`.
pub fn project_rul(trend: &[f64], slope: f64, config: &SensorConfig) -> String {
    if slope.abs() < MIN_SLOPE {
        return RUL_STABLE.to_string();
    }

    let n = trend.len();
    let initial = trend.first().copied().unwrap_or(0.0);
    let intercept = linregress_index(trend).map_or(initial, |fit| fit.intercept);
    let current = slope * n.saturating_sub(1) as f64 + intercept;

    let distance = if slope > 0.0 {
        initial + config.bias_critical - current
    } else {
        current - (initial - config.bias_critical)
    };

    if distance <= 0.0 {
        return RUL_EXCEEDED.to_string();
    }

    format_duration(distance / slope.abs())
}

fn format_duration(seconds: f64) -> String {
    if seconds > SECS_PER_YEAR {
        RUL_STABLE.to_string()
    } else if seconds > SECS_PER_DAY {
        format!("{} days", (seconds / SECS_PER_DAY) as u64)
    } else if seconds > SECS_PER_HOUR {
        format!("{} hours", (seconds / SECS_PER_HOUR) as u64)
    } else {
        format!("{} mins", (seconds / 60.0) as u64)
    }
}
