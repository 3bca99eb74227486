use serde::{Deserialize, Serialize};
use std::fmt;

/// Score below which a sensor is Red.
pub const RED_BELOW: f64 = 60.0;
/// Score below which a sensor is Yellow.
pub const YELLOW_BELOW: f64 = 85.0;

/// Categorical health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score < RED_BELOW {
            Self::Red
        } else if score < YELLOW_BELOW {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable code for each health rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthFlag {
    ProcessChange,
    DriftCritical,
    ProcessVar,
    DriftWarning,
    BiasCritical,
    BiasWarning,
    NoiseCritical,
    LowSnrCritical,
    LowSnrWarning,
    Hysteresis,
    DfaUnreliable,
    DfaPersistence,
    DfaAntipersistence,
}

impl HealthFlag {
    pub const fn code(self) -> &'static str {
        match self {
            Self::ProcessChange => "PROCESS_CHANGE",
            Self::DriftCritical => "DRIFT_CRITICAL",
            Self::ProcessVar => "PROCESS_VAR",
            Self::DriftWarning => "DRIFT_WARNING",
            Self::BiasCritical => "BIAS_CRITICAL",
            Self::BiasWarning => "BIAS_WARNING",
            Self::NoiseCritical => "NOISE_CRITICAL",
            Self::LowSnrCritical => "LOW_SNR_CRITICAL",
            Self::LowSnrWarning => "LOW_SNR_WARNING",
            Self::Hysteresis => "HYSTERESIS",
            Self::DfaUnreliable => "DFA_UNRELIABLE",
            Self::DfaPersistence => "DFA_PERSISTENCE",
            Self::DfaAntipersistence => "DFA_ANTIPERSISTENCE",
        }
    }
}

impl fmt::Display for HealthFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of the health rules for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthVerdict {
    /// 0-100, 100 = healthy
    pub score: f64,
    pub status: HealthStatus,
    /// Diagnoses in rule order; "System Normal" when no rule fired
    pub diagnosis: Vec<String>,
    /// Flags in rule order
    pub flags: Vec<HealthFlag>,
    pub recommendation: String,
}

impl HealthVerdict {
    /// Diagnoses joined with "; ".
    pub fn diagnosis_text(&self) -> String {
        self.diagnosis.join("; ")
    }

    pub fn has_flag(&self, flag: HealthFlag) -> bool {
        self.flags.contains(&flag)
    }
}
