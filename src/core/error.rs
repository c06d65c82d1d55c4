//! Planning precondition errors.

use thiserror::Error;

use super::MAX_CYCLE_WEEKS;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised when local state does not allow an operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// No cycle has been created yet.
    #[error("No active cycle - create one with `studiocycle cycle create`")]
    NoActiveCycle,

    /// The requested week is not part of the cycle.
    #[error("Week {week} is not part of cycle '{cycle}'")]
    WeekNotFound { week: u32, cycle: String },

    /// No studios to plan for.
    #[error("No studios configured - add one with `studiocycle studio add`")]
    NoStudios,

    /// Unknown studio id.
    #[error("Studio not found: {0}")]
    StudioNotFound(String),

    /// Cycle duration outside the supported range.
    #[error("Cycle duration must be between 1 and {MAX_CYCLE_WEEKS} weeks, got {0}")]
    InvalidDuration(u32),
}
