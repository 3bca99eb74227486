//! System-wide default constants.
//!
//! Threshold defaults for `SensorConfig` plus the fixed heuristics that are
//! deliberately not operator-tunable. Grouped by pipeline stage.

// ============================================================================
// SensorConfig defaults
// ============================================================================

pub const SLOPE_WARNING: f64 = 0.05;
pub const SLOPE_CRITICAL: f64 = 0.1;
pub const BIAS_WARNING: f64 = 1.0;
pub const BIAS_CRITICAL: f64 = 2.0;
pub const HYSTERESIS_CRITICAL: f64 = 0.5;
/// Hurst exponent above which the residual is considered persistent.
pub const DFA_CRITICAL: f64 = 0.8;
pub const MIN_DATA_POINTS: usize = 50;

// ============================================================================
// Preprocessing
// ============================================================================

/// Longest run of missing samples that is linearly interpolated.
pub const MAX_INTERPOLATED_GAP: usize = 5;

/// Median filter window for spike suppression.
pub const SPIKE_FILTER_WINDOW: usize = 3;

// ============================================================================
// Decomposition
// ============================================================================

/// Upper bound on the Savitzky-Golay window (samples, odd).
pub const TREND_WINDOW_MAX: usize = 51;

/// Savitzky-Golay polynomial order.
pub const TREND_POLY_ORDER: usize = 3;

/// Upper bound on the median-filter fallback window.
pub const FALLBACK_MEDIAN_WINDOW_MAX: usize = 11;

// ============================================================================
// Health scoring heuristics (not part of SensorConfig)
// ============================================================================

/// Residual std below which a steep trend is read as a process change.
pub const CLEAN_NOISE_STD: f64 = 0.5;

/// Residual std above which the sensor is flagged as critically noisy.
pub const CRITICAL_NOISE_STD: f64 = 2.0;

pub const SNR_CRITICAL_DB: f64 = 10.0;
pub const SNR_WARNING_DB: f64 = 20.0;

/// DFA fits below this R² are reported but not scored.
pub const DFA_MIN_R_SQUARED: f64 = 0.9;

pub const DFA_ANTIPERSISTENCE_HURST: f64 = 0.2;
