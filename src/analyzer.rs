//! Sensor Analyzer - the composed analysis entry point
//!
//! Pipeline:
//! 1. Preprocess (gap fill, spike removal, length check)
//! 2. Decompose into trend and residual (Savitzky-Golay)
//! 3. Compute metrics (bias, slope, noise, SNR, hysteresis, DFA)
//! 4. Score health (rule-based penalties)
//! 5. Project remaining useful life from the trend

use tracing::debug;

use crate::config::SensorConfig;
use crate::metrics;
use crate::processing::{self, AnalysisError, Decomposition};
use crate::types::{Analysis, HealthVerdict, MetricBundle};

/// Run the full pipeline on one reading sequence.
///
/// Only a too-short (or entirely missing) input fails; every numerical
/// degeneracy downstream resolves to a neutral metric value.
pub fn analyze(readings: &[f64], config: &SensorConfig) -> Result<Analysis, AnalysisError> {
    let cleaned = processing::preprocess(readings, config)?;
    debug!(points = cleaned.len(), "Preprocessed readings");

    let Decomposition { trend, residual } = processing::decompose(&cleaned, config);

    let metrics = metrics::compute_metrics(&cleaned, &trend, &residual);
    let health = processing::score_health(&metrics, config);
    debug!(
        score = health.score,
        status = %health.status,
        flags = health.flags.len(),
        "Scored sensor health"
    );

    let prediction = processing::project_rul(&trend, metrics.slope, config);
    debug!(prediction = %prediction, "Projected remaining useful life");

    Ok(Analysis {
        metrics,
        health,
        prediction,
    })
}

/// Analyzer bound to one configuration.
///
/// Holds no mutable state; a single instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SensorAnalyzer {
    config: SensorConfig,
}

impl SensorAnalyzer {
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn preprocess(&self, readings: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        processing::preprocess(readings, &self.config)
    }

    pub fn decompose(&self, cleaned: &[f64]) -> Decomposition {
        processing::decompose(cleaned, &self.config)
    }

    pub fn compute_metrics(&self, cleaned: &[f64], trend: &[f64], residual: &[f64]) -> MetricBundle {
        metrics::compute_metrics(cleaned, trend, residual)
    }

    pub fn score_health(&self, metrics: &MetricBundle) -> HealthVerdict {
        processing::score_health(metrics, &self.config)
    }

    pub fn project_rul(&self, trend: &[f64], slope: f64) -> String {
        processing::project_rul(trend, slope, &self.config)
    }

    pub fn analyze(&self, readings: &[f64]) -> Result<Analysis, AnalysisError> {
        analyze(readings, &self.config)
    }
}
