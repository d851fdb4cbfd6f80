//! Unified error hierarchy for paceplan
//!
//! Library operations return these typed errors; the binary wraps them in
//! `anyhow` at the I/O boundary and reports them through `PacePlanError`.

use thiserror::Error;
use tracing::{error, warn};

/// Top-level error type for all paceplan operations
#[derive(Debug, Error)]
pub enum PacePlanError {
    /// Activity analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Notation decoder construction errors
    #[error("Notation error: {0}")]
    Notation(#[from] NotationError),

    /// Plan preview errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Input is not the JSON shape we expect
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Every record failed the validity filter
    #[error("No valid running data found")]
    NoValidRuns,
}

/// Decoder errors
#[derive(Debug, Error)]
pub enum NotationError {
    /// A rewrite rule's pattern failed to compile
    #[error("Invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Plan preview errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Plan entry start is not a YYYY-MM-DD date
    #[error("Invalid plan date: {value}")]
    InvalidDate { value: String },
}

/// Result type alias for paceplan operations
pub type Result<T> = std::result::Result<T, PacePlanError>;

impl PacePlanError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PacePlanError::Analysis(AnalysisError::NoValidRuns) => ErrorSeverity::Warning,
            PacePlanError::Plan(_) => ErrorSeverity::Warning,
            PacePlanError::Notation(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PacePlanError::Analysis(AnalysisError::NoValidRuns) => {
                "No runs longer than 0.5 km and 1 minute were found in the input.".to_string()
            }
            PacePlanError::Json(e) => {
                format!("Input is not valid activity or plan JSON: {}", e)
            }
            PacePlanError::Plan(PlanError::InvalidDate { value }) => {
                format!("Plan entry has an unreadable date: {}", value)
            }
            PacePlanError::Configuration(detail) => {
                format!("Configuration could not be loaded: {}", detail)
            }
            _ => self.to_string(),
        }
    }

    /// Emit the error as a tracing event at its severity level
    pub fn log(&self) {
        let level = self.severity().to_tracing_level();
        if level == tracing::Level::ERROR {
            error!(error = %self, "{}", self.user_message());
        } else {
            warn!(error = %self, "{}", self.user_message());
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
