//! Schedule prefix id allocation.
//!
//! A prefix id is the frequency class base (Daily=10, Weekly=20, Monthly=30,
//! Annually=40) plus a per-class offset. Ids are never renumbered when a
//! sibling is removed.

use std::collections::HashSet;

use crate::domain::{FrequencyClass, Schedule};
use crate::error::{FreqError, Result};

/// Schedules allowed per frequency class unless configured otherwise.
pub const DEFAULT_QUOTA_PER_CLASS: usize = 9;

/// Offsets available below the next class base.
pub const MAX_OFFSETS_PER_CLASS: usize = 10;

/// Allocate the prefix id for a new schedule in `class`.
///
/// The offset is the number of schedules already in the class. If a live
/// sibling still holds that offset (after an earlier removal), the next free
/// offset is taken, wrapping within the class.
pub fn allocate_prefix_id(class: FrequencyClass, existing: &[Schedule], quota: usize) -> Result<String> {
    let base = class
        .prefix_base()
        .ok_or_else(|| FreqError::InvalidFrequency(class.to_string()))?;

    let siblings: Vec<&Schedule> = existing.iter().filter(|s| s.frequency_class() == class).collect();
    let count = siblings.len();
    let limit = quota.min(MAX_OFFSETS_PER_CLASS);

    if count >= limit {
        return Err(FreqError::QuotaExceeded {
            class: class.to_string(),
            count,
            limit,
        });
    }

    let used: HashSet<u32> = siblings
        .iter()
        .filter_map(|s| s.schedule_prefix_id.parse::<u32>().ok())
        .filter_map(|id| id.checked_sub(base))
        .collect();

    let offset = (0..MAX_OFFSETS_PER_CLASS)
        .map(|step| ((count + step) % MAX_OFFSETS_PER_CLASS) as u32)
        .find(|offset| !used.contains(offset))
        .ok_or_else(|| FreqError::QuotaExceeded {
            class: class.to_string(),
            count,
            limit,
        })?;

    Ok((base + offset).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, FrequencySelector, ScheduleDraft};
    use chrono::Utc;

    fn stored(frequency: FrequencySelector, prefix: &str) -> Schedule {
        Schedule {
            id: format!("sch-{}", prefix),
            schedule_prefix_id: prefix.to_string(),
            definition: ScheduleDraft::new(frequency, ClockTime::new(1, 0)),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_id_is_class_base() {
        assert_eq!(allocate_prefix_id(FrequencyClass::Daily, &[], 9).unwrap(), "10");
        assert_eq!(allocate_prefix_id(FrequencyClass::Weekly, &[], 9).unwrap(), "20");
        assert_eq!(allocate_prefix_id(FrequencyClass::Monthly, &[], 9).unwrap(), "30");
        assert_eq!(allocate_prefix_id(FrequencyClass::Annually, &[], 9).unwrap(), "40");
    }

    #[test]
    fn test_offset_counts_same_class_only() {
        let existing = vec![
            stored(FrequencySelector::Weekly, "20"),
            stored(FrequencySelector::Daily, "10"),
            stored(FrequencySelector::Daily, "11"),
        ];
        assert_eq!(allocate_prefix_id(FrequencyClass::Weekly, &existing, 9).unwrap(), "21");
        assert_eq!(allocate_prefix_id(FrequencyClass::Daily, &existing, 9).unwrap(), "12");
    }

    #[test]
    fn test_quota_boundary() {
        let mut existing: Vec<Schedule> = (0..8)
            .map(|i| stored(FrequencySelector::Monthly, &(30 + i).to_string()))
            .collect();
        assert_eq!(allocate_prefix_id(FrequencyClass::Monthly, &existing, 9).unwrap(), "38");

        existing.push(stored(FrequencySelector::Monthly, "38"));
        let err = allocate_prefix_id(FrequencyClass::Monthly, &existing, 9).unwrap_err();
        assert!(matches!(err, FreqError::QuotaExceeded { count: 9, limit: 9, .. }));
    }

    #[test]
    fn test_quota_of_ten_uses_last_offset() {
        let existing: Vec<Schedule> = (0..9)
            .map(|i| stored(FrequencySelector::Annually, &(40 + i).to_string()))
            .collect();
        assert_eq!(allocate_prefix_id(FrequencyClass::Annually, &existing, 10).unwrap(), "49");
        assert!(allocate_prefix_id(FrequencyClass::Annually, &existing, 9).is_err());
    }

    #[test]
    fn test_quota_never_exceeds_offset_space() {
        let existing: Vec<Schedule> = (0..10)
            .map(|i| stored(FrequencySelector::Daily, &(10 + i).to_string()))
            .collect();
        assert!(matches!(
            allocate_prefix_id(FrequencyClass::Daily, &existing, 50),
            Err(FreqError::QuotaExceeded { limit: 10, .. })
        ));
    }

    #[test]
    fn test_holiday_class_has_no_prefix() {
        let err = allocate_prefix_id(FrequencyClass::HolidayBased, &[], 9).unwrap_err();
        assert!(matches!(err, FreqError::InvalidFrequency(ref s) if s == "HolidayBased"));
    }

    #[test]
    fn test_removed_sibling_does_not_cause_collision() {
        // "20" was removed; "21" is still live and must not be handed out again
        let existing = vec![stored(FrequencySelector::Weekly, "21")];
        assert_eq!(allocate_prefix_id(FrequencyClass::Weekly, &existing, 9).unwrap(), "22");
    }

    #[test]
    fn test_removed_last_sibling_reuses_count_offset() {
        // "21" was removed; count is 1 and offset 1 is free again
        let existing = vec![stored(FrequencySelector::Weekly, "20")];
        assert_eq!(allocate_prefix_id(FrequencyClass::Weekly, &existing, 9).unwrap(), "21");
    }
}
