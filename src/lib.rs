//! QorSense: sensor health analysis
//!
//! Turns a sequence of raw readings from one industrial sensor into a health
//! verdict, a set of signal-quality metrics and a remaining-useful-life
//! estimate.
//!
//! ## Pipeline
//!
//! - **Processing**: gap fill, spike removal, Savitzky-Golay trend/residual split
//! - **Metrics**: bias, slope, noise, SNR, hysteresis, DFA Hurst exponent
//! - **Health Scoring**: rule-based 0-100 score with flags and diagnoses
//! - **RUL**: linear trend projection to the critical bias band
//!
//! ```ignore
//! let config = qorsense::SensorConfig::default();
//! let analysis = qorsense::analyze(&readings, &config)?;
//! println!("{} ({})", analysis.health.score, analysis.health.status);
//! ```

pub mod analyzer;
pub mod config;
pub mod metrics;
pub mod processing;
pub mod synthetic;
pub mod types;

pub use analyzer::{analyze, SensorAnalyzer};

pub use config::{ConfigError, SensorConfig};

pub use processing::{AnalysisError, Decomposition, ProcessingError};

pub use types::{
    Analysis, AnalysisReport, HealthFlag, HealthStatus, HealthVerdict, MetricBundle,
    MetricSummary,
};

pub use synthetic::{SignalProfile, SyntheticError, SyntheticSignal};
