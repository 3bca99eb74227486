//! Health Scoring Module
//!
//! Deterministic, rule-based health score for a single sensor. The score starts
//! at 100 and each rule subtracts a fixed penalty, so identical metrics always
//! produce an identical verdict.
//!
//! Slope is judged together with residual noise: a steep but clean trend is a
//! deliberate process change, a steep and noisy one is sensor drift.

use crate::config::{defaults, SensorConfig};
use crate::types::{HealthFlag, HealthStatus, HealthVerdict, MetricBundle};

const PENALTY_PROCESS_CHANGE: f64 = 10.0;
const PENALTY_DRIFT_CRITICAL: f64 = 25.0;
const PENALTY_DRIFT_WARNING: f64 = 15.0;
const PENALTY_BIAS_CRITICAL: f64 = 20.0;
const PENALTY_BIAS_WARNING: f64 = 10.0;
const PENALTY_NOISE_CRITICAL: f64 = 20.0;
const PENALTY_SNR_CRITICAL: f64 = 15.0;
const PENALTY_SNR_WARNING: f64 = 5.0;
const PENALTY_HYSTERESIS: f64 = 10.0;
const PENALTY_DFA_PERSISTENCE: f64 = 30.0;
const PENALTY_DFA_ANTIPERSISTENCE: f64 = 10.0;

pub const DEFAULT_RECOMMENDATION: &str = "System operating normally.";
pub const NORMAL_DIAGNOSIS: &str = "System Normal";

/// Accumulates penalties, diagnoses and flags in rule order.
struct Scorecard {
    score: f64,
    diagnosis: Vec<String>,
    flags: Vec<HealthFlag>,
    recommendation: String,
}

impl Scorecard {
    fn new() -> Self {
        Self {
            score: 100.0,
            diagnosis: Vec::new(),
            flags: Vec::new(),
            recommendation: DEFAULT_RECOMMENDATION.to_string(),
        }
    }

    fn hit(&mut self, penalty: f64, diagnosis: &str, flag: HealthFlag) {
        self.score -= penalty;
        self.diagnosis.push(diagnosis.to_string());
        self.flags.push(flag);
    }

    fn recommend(&mut self, text: &str) {
        self.recommendation = text.to_string();
    }

    fn finish(mut self) -> HealthVerdict {
        let score = self.score.clamp(0.0, 100.0);
        if self.diagnosis.is_empty() {
            self.diagnosis.push(NORMAL_DIAGNOSIS.to_string());
        }
        HealthVerdict {
            score,
            status: HealthStatus::from_score(score),
            diagnosis: self.diagnosis,
            flags: self.flags,
            recommendation: self.recommendation,
        }
    }
}

/// Map a metric bundle to a health verdict.
///
/// Rule order (later recommendations overwrite earlier ones):
/// 1. Trend slope, split by residual noise into process change vs drift
/// 2. Bias shift
/// 3. Noise level / SNR
/// 4. Hysteresis
/// 5. DFA persistence, only when the log-log fit is reliable
pub fn score_health(metrics: &MetricBundle, config: &SensorConfig) -> HealthVerdict {
    let mut card = Scorecard::new();

    let slope = metrics.slope.abs();
    let noise_std = metrics.noise_std;
    let clean_signal = noise_std < defaults::CLEAN_NOISE_STD;

    if slope > config.slope_critical {
        if clean_signal {
            card.hit(
                PENALTY_PROCESS_CHANGE,
                "Process Parameter Change Detected",
                HealthFlag::ProcessChange,
            );
            card.recommend("Verify process settings.");
        } else {
            card.hit(
                PENALTY_DRIFT_CRITICAL,
                "Critical Drift (Unstable)",
                HealthFlag::DriftCritical,
            );
            card.recommend("Immediate calibration required.");
        }
    } else if slope > config.slope_warning {
        if clean_signal {
            card.hit(0.0, "Minor Process Variation", HealthFlag::ProcessVar);
        } else {
            card.hit(
                PENALTY_DRIFT_WARNING,
                "Moderate Trend Drift",
                HealthFlag::DriftWarning,
            );
            card.recommend("Schedule maintenance check.");
        }
    }

    let bias = metrics.bias.abs();
    if bias > config.bias_critical {
        card.hit(
            PENALTY_BIAS_CRITICAL,
            "Significant Bias Shift",
            HealthFlag::BiasCritical,
        );
    } else if bias > config.bias_warning {
        card.hit(PENALTY_BIAS_WARNING, "Minor Bias Shift", HealthFlag::BiasWarning);
    }

    if noise_std > defaults::CRITICAL_NOISE_STD {
        card.hit(
            PENALTY_NOISE_CRITICAL,
            "High Sensor Noise",
            HealthFlag::NoiseCritical,
        );
    } else if metrics.snr_db < defaults::SNR_CRITICAL_DB {
        card.hit(
            PENALTY_SNR_CRITICAL,
            "Critical Signal Quality (SNR)",
            HealthFlag::LowSnrCritical,
        );
    } else if metrics.snr_db < defaults::SNR_WARNING_DB {
        card.hit(PENALTY_SNR_WARNING, "Noisy Signal", HealthFlag::LowSnrWarning);
    }

    if metrics.hysteresis > config.hysteresis_critical {
        card.hit(
            PENALTY_HYSTERESIS,
            "Hysteresis Detected",
            HealthFlag::Hysteresis,
        );
    }

    if metrics.hurst_r2 < defaults::DFA_MIN_R_SQUARED {
        card.hit(0.0, "DFA Unreliable (Low R2)", HealthFlag::DfaUnreliable);
    } else if metrics.hurst > config.dfa_critical {
        card.hit(
            PENALTY_DFA_PERSISTENCE,
            "Strong Persistence (Drift/Memory)",
            HealthFlag::DfaPersistence,
        );
    } else if metrics.hurst < defaults::DFA_ANTIPERSISTENCE_HURST {
        card.hit(
            PENALTY_DFA_ANTIPERSISTENCE,
            "Strong Anti-persistence",
            HealthFlag::DfaAntipersistence,
        );
    }

    card.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral() -> MetricBundle {
        MetricBundle {
            bias: 0.0,
            slope: 0.0,
            noise_std: 0.0,
            snr_db: 50.0,
            hysteresis: 0.0,
            hurst: 0.5,
            hurst_r2: 0.95,
            ..MetricBundle::default()
        }
    }

    #[test]
    fn test_neutral_metrics_are_green() {
        let verdict = score_health(&neutral(), &SensorConfig::default());
        assert_eq!(verdict.score, 100.0);
        assert_eq!(verdict.status, HealthStatus::Green);
        assert_eq!(verdict.diagnosis, vec!["System Normal".to_string()]);
        assert!(verdict.flags.is_empty());
        assert_eq!(verdict.recommendation, DEFAULT_RECOMMENDATION);
    }

    #[test]
    fn test_custom_bias_threshold() {
        let metrics = MetricBundle {
            bias: 1.5,
            ..neutral()
        };
        let config = SensorConfig {
            bias_critical: 1.0,
            ..SensorConfig::default()
        };
        let verdict = score_health(&metrics, &config);
        assert_eq!(verdict.score, 80.0);
        assert_eq!(verdict.flags, vec![HealthFlag::BiasCritical]);
        assert_eq!(verdict.status, HealthStatus::Yellow);
    }

    #[test]
    fn test_critical_metrics_are_red() {
        let metrics = MetricBundle {
            bias: 5.0,
            slope: 0.2,
            noise_std: 2.0,
            snr_db: 5.0,
            hysteresis: 1.0,
            hurst: 0.9,
            hurst_r2: 0.95,
            ..MetricBundle::default()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        // 100 - 25 (drift) - 20 (bias) - 15 (snr) - 10 (hyst) - 30 (dfa) = 0
        assert_eq!(verdict.score, 0.0);
        assert!(verdict.score < 60.0);
        assert_eq!(verdict.status, HealthStatus::Red);
        assert_eq!(
            verdict.flags,
            vec![
                HealthFlag::DriftCritical,
                HealthFlag::BiasCritical,
                HealthFlag::LowSnrCritical,
                HealthFlag::Hysteresis,
                HealthFlag::DfaPersistence,
            ]
        );
        assert_eq!(verdict.recommendation, "Immediate calibration required.");
    }

    #[test]
    fn test_clean_steep_slope_is_process_change() {
        let metrics = MetricBundle {
            slope: -0.3,
            noise_std: 0.1,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.score, 90.0);
        assert_eq!(verdict.flags, vec![HealthFlag::ProcessChange]);
        assert_eq!(verdict.recommendation, "Verify process settings.");
    }

    #[test]
    fn test_minor_process_variation_has_no_penalty() {
        let metrics = MetricBundle {
            slope: 0.07,
            noise_std: 0.2,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.score, 100.0);
        assert_eq!(verdict.flags, vec![HealthFlag::ProcessVar]);
        assert_eq!(verdict.diagnosis, vec!["Minor Process Variation".to_string()]);
    }

    #[test]
    fn test_moderate_drift() {
        let metrics = MetricBundle {
            slope: 0.07,
            noise_std: 0.8,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.score, 85.0);
        assert_eq!(verdict.status, HealthStatus::Green);
        assert_eq!(verdict.flags, vec![HealthFlag::DriftWarning]);
        assert_eq!(verdict.recommendation, "Schedule maintenance check.");
    }

    #[test]
    fn test_high_noise_takes_precedence_over_snr() {
        let metrics = MetricBundle {
            noise_std: 2.5,
            snr_db: 3.0,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.flags, vec![HealthFlag::NoiseCritical]);
        assert_eq!(verdict.score, 80.0);
    }

    #[test]
    fn test_snr_warning_band() {
        let metrics = MetricBundle {
            snr_db: 15.0,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.flags, vec![HealthFlag::LowSnrWarning]);
        assert_eq!(verdict.score, 95.0);
    }

    #[test]
    fn test_unreliable_dfa_is_not_scored() {
        let metrics = MetricBundle {
            hurst: 1.4,
            hurst_r2: 0.5,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.score, 100.0);
        assert_eq!(verdict.flags, vec![HealthFlag::DfaUnreliable]);
        assert_eq!(verdict.diagnosis, vec!["DFA Unreliable (Low R2)".to_string()]);
    }

    #[test]
    fn test_antipersistence() {
        let metrics = MetricBundle {
            hurst: 0.1,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.flags, vec![HealthFlag::DfaAntipersistence]);
        assert_eq!(verdict.score, 90.0);
    }

    #[test]
    fn test_bias_warning_uses_absolute_value() {
        let metrics = MetricBundle {
            bias: -1.5,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(verdict.flags, vec![HealthFlag::BiasWarning]);
        assert_eq!(verdict.score, 90.0);
    }

    #[test]
    fn test_diagnosis_text_joins_entries() {
        let metrics = MetricBundle {
            bias: 3.0,
            hysteresis: 0.9,
            ..neutral()
        };
        let verdict = score_health(&metrics, &SensorConfig::default());
        assert_eq!(
            verdict.diagnosis_text(),
            "Significant Bias Shift; Hysteresis Detected"
        );
        assert_eq!(verdict.score, 70.0);
        assert_eq!(verdict.status, HealthStatus::Yellow);
    }
}
