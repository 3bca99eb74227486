use serde::{Deserialize, Serialize};

/// Diagnostic metrics for one analysis.
///
/// Scalars drive the health scorer; the arrays are carried for external
/// reporting (plots of trend, residual, DFA log-log fit, hysteresis phases).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    /// Mean of the last 10% minus mean of the first 10%
    pub bias: f64,
    /// Least-squares slope of the trend (units per sample)
    pub slope: f64,
    /// Population standard deviation of the residual
    pub noise_std: f64,
    pub snr_db: f64,
    pub hysteresis: f64,
    #[serde(default)]
    pub hysteresis_rising: Vec<f64>,
    #[serde(default)]
    pub hysteresis_falling: Vec<f64>,
    /// DFA exponent of the residual
    pub hurst: f64,
    /// R² of the DFA log-log fit
    pub hurst_r2: f64,
    #[serde(default)]
    pub dfa_scales: Vec<usize>,
    #[serde(default)]
    pub dfa_fluctuations: Vec<f64>,
    #[serde(default)]
    pub trend: Vec<f64>,
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl Default for MetricBundle {
    /// Neutral values of every analyzer's degenerate case.
    fn default() -> Self {
        Self {
            bias: 0.0,
            slope: 0.0,
            noise_std: 0.0,
            snr_db: 0.0,
            hysteresis: 0.0,
            hysteresis_rising: Vec::new(),
            hysteresis_falling: Vec::new(),
            hurst: 0.5,
            hurst_r2: 0.0,
            dfa_scales: Vec::new(),
            dfa_fluctuations: Vec::new(),
            trend: Vec::new(),
            residuals: Vec::new(),
        }
    }
}

/// Scalar subset of [`MetricBundle`] for compact reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub bias: f64,
    pub slope: f64,
    pub noise_std: f64,
    pub snr_db: f64,
    pub hysteresis: f64,
    pub hurst: f64,
    pub hurst_r2: f64,
}

impl From<&MetricBundle> for MetricSummary {
    fn from(m: &MetricBundle) -> Self {
        Self {
            bias: m.bias,
            slope: m.slope,
            noise_std: m.noise_std,
            snr_db: m.snr_db,
            hysteresis: m.hysteresis,
            hurst: m.hurst,
            hurst_r2: m.hurst_r2,
        }
    }
}
