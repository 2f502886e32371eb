//! Error types for freqsched
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while managing run frequencies
#[derive(Debug, Error)]
pub enum FreqError {
    /// Expanded run times overlap an existing schedule
    #[error("Schedule conflict: {time} already used by schedule {existing}")]
    ScheduleConflict {
        /// Prefix id of the schedule that already runs at `time`
        existing: String,
        /// First overlapping run time, unpadded
        time: String,
    },

    /// Frequency bucket already holds the maximum number of schedules
    #[error("Quota exceeded: {class} already has {count} schedules (limit {limit})")]
    QuotaExceeded {
        /// Frequency class label
        class: String,
        /// Schedules already in the class
        count: usize,
        /// Configured limit
        limit: usize,
    },

    /// Frequency has no prefix base or could not be parsed
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Every compared field matches an existing schedule
    #[error("Duplicate schedule: identical to {0}")]
    DuplicateSchedule(String),

    /// Schedule fields are out of range or inconsistent
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// No schedule with this id
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    /// No trigger with this id
    #[error("Trigger not found: {0}")]
    TriggerNotFound(String),

    /// Same trigger already registered
    #[error("Duplicate trigger: identical to {0}")]
    DuplicateTrigger(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for freqsched operations
pub type Result<T> = std::result::Result<T, FreqError>;
