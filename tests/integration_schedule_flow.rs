//! Schedule admission integration tests
//!
//! Drives the dialog state, expansion, conflict detection and id allocation
//! together through the public API.

use freqsched::domain::{ClockTime, FrequencySelector, HolidayAction, IntervalSpec, RepeatType, ScheduleDraft};
use freqsched::error::{FreqError, Result};
use freqsched::scheduler::{ALL_MONTHS, DisclosureState, WEEK_DAYS, conflicts, expand_tokens};
use freqsched::store::{FrequencyStore, StoreLimits, load_session, save_session};
use tempfile::TempDir;

fn draft(frequency: FrequencySelector, hour: u32, minute: u32) -> ScheduleDraft {
    ScheduleDraft::new(frequency, ClockTime::new(hour, minute))
}

/// Integration test: first and second weekly schedules get 20 and 21
#[test]
fn test_weekly_prefix_ids() -> Result<()> {
    let mut store = FrequencyStore::new();
    assert_eq!(store.add_schedule(draft(FrequencySelector::Weekly, 9, 0))?.schedule_prefix_id, "20");
    assert_eq!(store.add_schedule(draft(FrequencySelector::Weekly, 9, 30))?.schedule_prefix_id, "21");
    Ok(())
}

/// Integration test: same daily time twice is rejected
#[test]
fn test_same_time_conflict() -> Result<()> {
    let mut store = FrequencyStore::new();
    store.add_schedule(draft(FrequencySelector::Daily, 9, 0).with_run_days(["Monday"]))?;

    let err = store
        .add_schedule(draft(FrequencySelector::Daily, 9, 0).with_run_days(["Tuesday"]))
        .unwrap_err();
    assert!(matches!(err, FreqError::ScheduleConflict { ref time, .. } if time == "9:0"));
    assert_eq!(store.schedules().len(), 1);
    Ok(())
}

/// Integration test: different minutes in different classes do not conflict
#[test]
fn test_non_conflicting_classes_tracked_separately() -> Result<()> {
    let mut store = FrequencyStore::new();
    let daily = store.add_schedule(draft(FrequencySelector::Daily, 9, 0))?.schedule_prefix_id.clone();
    let weekly = store
        .add_schedule(draft(FrequencySelector::Weekly, 9, 5).with_run_days(["Monday"]))?
        .schedule_prefix_id
        .clone();
    assert_eq!(daily, "10");
    assert_eq!(weekly, "20");
    Ok(())
}

/// Integration test: ninth schedule in a class is accepted, tenth is not
#[test]
fn test_quota_boundary() -> Result<()> {
    let mut store = FrequencyStore::new();
    for hour in 0..8 {
        store.add_schedule(draft(FrequencySelector::Monthly, hour, 0))?;
    }

    let ninth = store.add_schedule(draft(FrequencySelector::Monthly, 8, 0))?;
    assert_eq!(ninth.schedule_prefix_id, "38");

    let err = store.add_schedule(draft(FrequencySelector::Monthly, 9, 0)).unwrap_err();
    assert!(matches!(err, FreqError::QuotaExceeded { count: 9, .. }));

    // Other classes are unaffected
    assert_eq!(store.add_schedule(draft(FrequencySelector::Annually, 9, 0))?.schedule_prefix_id, "40");
    Ok(())
}

/// Integration test: a quota of ten admits a tenth schedule
#[test]
fn test_configured_quota_of_ten() -> Result<()> {
    let mut store = FrequencyStore::with_limits(StoreLimits {
        quota_per_class: 10,
        min_interval_minutes: 0,
    });
    for hour in 0..10 {
        store.add_schedule(draft(FrequencySelector::Weekly, hour, 0))?;
    }
    assert_eq!(store.schedules().last().map(|s| s.schedule_prefix_id.as_str()), Some("29"));
    assert!(store.add_schedule(draft(FrequencySelector::Weekly, 11, 0)).is_err());
    Ok(())
}

/// Integration test: dialog with an hourly clock interval expands and blocks overlaps
#[test]
fn test_dialog_interval_flow() -> Result<()> {
    let mut state = DisclosureState::new();
    state.select_frequency(FrequencySelector::Daily);
    state.set_submit_time(ClockTime::new(8, 0));
    state.toggle_intervals(true);
    state.set_interval_end(ClockTime::new(10, 0));
    state.set_interval_step(1, 0);
    state.set_repeat_type(RepeatType::Clock);

    let interval_draft = state.to_draft()?;
    assert_eq!(interval_draft.interval.as_ref().map(IntervalSpec::start), Some(ClockTime::new(8, 0)));
    assert_eq!(interval_draft.run_days, WEEK_DAYS.to_vec());
    assert_eq!(expand_tokens(&interval_draft)?, vec!["8:0", "9:0", "10:0"]);

    let mut store = FrequencyStore::new();
    store.add_schedule(interval_draft)?;

    let err = store.add_schedule(draft(FrequencySelector::Weekly, 10, 0)).unwrap_err();
    assert!(matches!(err, FreqError::ScheduleConflict { ref existing, ref time } if existing == "10" && time == "10:0"));

    assert!(store.add_schedule(draft(FrequencySelector::Weekly, 10, 1)).is_ok());
    Ok(())
}

/// Integration test: monthly selection defaults to all months before submit
#[test]
fn test_monthly_dialog_defaults() -> Result<()> {
    let mut state = DisclosureState::new();
    state.select_frequency(FrequencySelector::Monthly);
    assert_eq!(state.run_months, vec![ALL_MONTHS]);

    state.set_submit_time(ClockTime::new(2, 30));
    state.set_holiday_action("do-not-run:after-holiday".parse::<HolidayAction>()?);
    let draft = state.to_draft()?;
    assert_eq!(draft.run_months, vec![ALL_MONTHS]);
    assert_eq!(draft.holiday_action.map(|a| a.to_string()).as_deref(), Some("do-not-run:after-holiday"));
    Ok(())
}

/// Integration test: conflict detection is symmetric across interval and plain schedules
#[test]
fn test_conflict_symmetry() -> Result<()> {
    let a = draft(FrequencySelector::Daily, 6, 0).with_interval(
        IntervalSpec::starting_at(ClockTime::new(6, 0))
            .with_end(ClockTime::new(7, 0))
            .with_step(0, 20),
    );
    let b = draft(FrequencySelector::Weekly, 6, 40);
    assert!(conflicts(&a, &b)?);
    assert!(conflicts(&b, &a)?);
    Ok(())
}

/// Integration test: a session survives save and reload with ids intact
#[test]
fn test_session_persistence() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("session.jsonl");

    {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Weekly, 9, 0))?;
        store.add_schedule(draft(FrequencySelector::Weekly, 10, 0))?;
        store.remove_schedule("20")?;
        save_session(&store, &path)?;
    }

    let mut store = load_session(&path, StoreLimits::default())?;
    assert_eq!(store.schedules().len(), 1);
    assert_eq!(store.schedules()[0].schedule_prefix_id, "21");

    // The reloaded session still rejects conflicts and avoids live ids
    assert!(store.add_schedule(draft(FrequencySelector::Daily, 10, 0)).is_err());
    assert_eq!(store.add_schedule(draft(FrequencySelector::Weekly, 11, 0))?.schedule_prefix_id, "22");
    Ok(())
}

/// Integration test: YAML drafts in the boundary encoding parse and expand
#[test]
fn test_yaml_draft() {
    let yaml = r#"
frequency: Weekly
submitHour: "07"
submitMinute: "05"
holidayAction: "run-on-holiday:dayBeforeHoliday"
hasIntervals: true
interval:
  startHour: "07"
  startMinute: "05"
  endHour: "08"
  endMinute: "00"
  repeatType: clock
  stepHour: "00"
  stepMinute: "15"
runDays: ["Mon-Fri"]
"#;
    let draft: ScheduleDraft = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        expand_tokens(&draft).unwrap(),
        vec!["7:5", "7:20", "7:35", "7:50"]
    );
}
