//! Signal processing stages: cleaning, decomposition, health scoring, RUL.

mod decompose;
mod filters;
mod health_scoring;
mod preprocess;
mod rul;

pub use decompose::{decompose, Decomposition};
pub use filters::{median_filter, moving_average_centered, savgol_filter};
pub use health_scoring::score_health;
pub use preprocess::{fill_gaps, preprocess};
pub use rul::project_rul;

use thiserror::Error;

/// The only failure that crosses the analysis boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// `count` is the number of usable (finite) readings when the input
    /// was long enough but every reading was missing.
    #[error("Insufficient data: {count} points provided, minimum {required} required")]
    InsufficientData { count: usize, required: usize },
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Internal numerical failures. Absorbed by the metric analyzers and the
/// decomposer; never returned from [`crate::analyze`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Insufficient points: need {needed}, have {available}")]
    InsufficientPoints { needed: usize, available: usize },

    #[error("Singular system: {0}")]
    SingularSystem(String),

    #[error("Non-finite result in {0}")]
    NonFinite(&'static str),

    #[error("Invalid filter parameters: window {window}, order {order}")]
    InvalidFilter { window: usize, order: usize },
}
