//! freqsched - run-frequency scheduling core
//!
//! Calendar schedules for batch job requests: expanding a schedule's submit
//! time and repeat interval into run times, rejecting schedules whose run
//! times collide, and allocating per-frequency-class schedule ids.

pub mod config;
pub mod domain;
pub mod error;
pub mod id;
pub mod scheduler;
pub mod store;

pub use error::{FreqError, Result};
