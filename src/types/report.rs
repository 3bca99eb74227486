use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HealthFlag, HealthStatus, HealthVerdict, MetricBundle, MetricSummary};

/// Result of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub metrics: MetricBundle,
    pub health: HealthVerdict,
    /// Remaining-useful-life estimate
    pub prediction: String,
}

/// Per-request record returned to the surrounding system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sensor_id: String,
    pub sensor_type: String,
    pub timestamp: DateTime<Utc>,
    pub health_score: f64,
    pub status: HealthStatus,
    pub metrics: MetricSummary,
    pub flags: Vec<HealthFlag>,
    pub recommendation: String,
    /// Diagnoses joined with "; "
    pub diagnosis: String,
    pub prediction: Option<String>,
}

impl AnalysisReport {
    pub fn from_analysis(sensor_id: &str, sensor_type: &str, analysis: &Analysis) -> Self {
        Self {
            sensor_id: sensor_id.to_string(),
            sensor_type: sensor_type.to_string(),
            timestamp: Utc::now(),
            health_score: analysis.health.score,
            status: analysis.health.status,
            metrics: MetricSummary::from(&analysis.metrics),
            flags: analysis.health.flags.clone(),
            recommendation: analysis.health.recommendation.clone(),
            diagnosis: analysis.health.diagnosis_text(),
            prediction: Some(analysis.prediction.clone()),
        }
    }
}
