//! Shared data structures for the sensor health pipeline
//!
//! - `MetricBundle`: all diagnostic metrics for one analysis
//! - `HealthVerdict`: score, status, diagnosis, flags, recommendation
//! - `Analysis`: the composed result of a single `analyze` call
//! - `AnalysisReport`: the per-request record handed to outer layers

mod health;
mod metrics;
mod report;

pub use health::*;
pub use metrics::*;
pub use report::*;
