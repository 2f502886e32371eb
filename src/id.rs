//! ID generation utilities for freqsched
//!
//! Opaque identifiers for schedules and triggers. These are distinct from the
//! human-facing schedule prefix id, which is allocated per frequency class.

use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a unique schedule ID
///
/// Format: `sch-{timestamp_ms}-{random_hex}`
/// Example: `sch-1738300800123-a1b2c3d4`
pub fn generate_schedule_id() -> String {
    let random: u32 = rand::rng().random();
    format!("sch-{}-{:08x}", now_ms(), random)
}

/// Generate a trigger ID
///
/// Format: `trg-{timestamp_ms}-{random_hex}`
pub fn generate_trigger_id() -> String {
    let random: u32 = rand::rng().random();
    format!("trg-{}-{:08x}", now_ms(), random)
}
