//! Event-driven run rules kept alongside calendar schedules.

use serde::{Deserialize, Serialize};

use crate::id::generate_trigger_id;

/// Dataset event that starts the job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetCondition {
    Created,
    Updated,
    Closed,
}

/// Run the job when a dataset (or file) changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTrigger {
    pub id: String,
    pub dataset_name: String,
    pub condition: DatasetCondition,
}

impl DatasetTrigger {
    pub fn new(dataset_name: impl Into<String>, condition: DatasetCondition) -> Self {
        Self {
            id: generate_trigger_id(),
            dataset_name: dataset_name.into(),
            condition,
        }
    }

    /// Same dataset and condition, ignoring id.
    pub fn same_rule(&self, other: &DatasetTrigger) -> bool {
        self.dataset_name == other.dataset_name && self.condition == other.condition
    }
}

/// Predecessor job outcome that starts the job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatusCondition {
    Success,
    Failure,
    Completion,
}

/// Run the job after another job finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTrigger {
    pub id: String,
    pub job_name: String,
    pub on_status: JobStatusCondition,
}

impl JobTrigger {
    pub fn new(job_name: impl Into<String>, on_status: JobStatusCondition) -> Self {
        Self {
            id: generate_trigger_id(),
            job_name: job_name.into(),
            on_status,
        }
    }

    /// Same predecessor and status, ignoring id.
    pub fn same_rule(&self, other: &JobTrigger) -> bool {
        self.job_name == other.job_name && self.on_status == other.on_status
    }
}
