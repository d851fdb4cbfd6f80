// Library interface for paceplan modules
// The CLI in main.rs and the integration tests both go through here

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod format;
pub mod locale;
pub mod logging;
pub mod models;
pub mod notation;
pub mod plan;
pub mod recommendations;
pub mod report;

// Re-export commonly used types for convenience
pub use aggregator::analyze;
pub use classifier::{classify, Characteristics, DistanceBucket, FrequencyBucket, PaceBucket};
pub use error::{AnalysisError, PacePlanError, Result};
pub use locale::Locale;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{ActivityPayload, ActivityRecord, DayAggregate, PeriodStatistics};
pub use notation::{NotationDecoder, WorkoutToken};
pub use plan::{PlanEntry, PlanPayload};
pub use recommendations::{recommend, Recommendation};
pub use report::{analyze_activities, AnalysisOutcome, AnalysisReport};
