//! In-memory store of the run-frequency rules collected in one wizard session.
//!
//! Every mutation either fully succeeds or leaves the store untouched.

use chrono::Utc;

use crate::domain::{DatasetTrigger, FrequencyClass, JobTrigger, Schedule, ScheduleDraft};
use crate::error::{FreqError, Result};
use crate::id::generate_schedule_id;
use crate::scheduler::{DEFAULT_QUOTA_PER_CLASS, allocate_prefix_id, find_conflict, find_duplicate};
use crate::store::session::SessionEntry;

/// Limits applied when schedules are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    /// Maximum schedules per frequency class
    pub quota_per_class: usize,
    /// Shortest accepted interval step; 0 only rejects zero steps
    pub min_interval_minutes: u32,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            quota_per_class: DEFAULT_QUOTA_PER_CLASS,
            min_interval_minutes: 0,
        }
    }
}

/// Schedules and triggers for one job request
#[derive(Debug, Clone, Default)]
pub struct FrequencyStore {
    limits: StoreLimits,
    schedules: Vec<Schedule>,
    dataset_triggers: Vec<DatasetTrigger>,
    job_triggers: Vec<JobTrigger>,
}

impl FrequencyStore {
    /// Create an empty store with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom limits.
    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Rebuild a store from saved entries without re-running admission checks.
    pub fn restore<I>(limits: StoreLimits, entries: I) -> Self
    where
        I: IntoIterator<Item = SessionEntry>,
    {
        let mut store = Self::with_limits(limits);
        for entry in entries {
            match entry {
                SessionEntry::Schedule(s) => store.schedules.push(s),
                SessionEntry::DatasetTrigger(t) => store.dataset_triggers.push(t),
                SessionEntry::JobTrigger(t) => store.job_triggers.push(t),
            }
        }
        store
    }

    /// All entries in saving order: schedules, dataset triggers, job triggers.
    pub fn entries(&self) -> Vec<SessionEntry> {
        self.schedules
            .iter()
            .cloned()
            .map(SessionEntry::Schedule)
            .chain(self.dataset_triggers.iter().cloned().map(SessionEntry::DatasetTrigger))
            .chain(self.job_triggers.iter().cloned().map(SessionEntry::JobTrigger))
            .collect()
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Run every admission check for a new schedule.
    ///
    /// Order: field validation, exact duplicate, run-time conflict, then
    /// frequency class and quota. Returns the prefix id the draft would get.
    pub fn check_schedule(&self, draft: &ScheduleDraft) -> Result<String> {
        draft.validate(self.limits.min_interval_minutes)?;

        if let Some(existing) = find_duplicate(draft, &self.schedules) {
            return Err(FreqError::DuplicateSchedule(existing.schedule_prefix_id.clone()));
        }

        if let Some(conflict) = find_conflict(draft, &self.schedules)? {
            return Err(conflict.into());
        }

        allocate_prefix_id(draft.frequency_class(), &self.schedules, self.limits.quota_per_class)
    }

    /// Admit a new schedule and assign its identifiers.
    pub fn add_schedule(&mut self, draft: ScheduleDraft) -> Result<&Schedule> {
        let prefix_id = match self.check_schedule(&draft) {
            Ok(prefix_id) => prefix_id,
            Err(e) => {
                tracing::debug!(frequency = %draft.frequency, error = %e, "Schedule rejected");
                return Err(e);
            }
        };

        let schedule = Schedule {
            id: generate_schedule_id(),
            schedule_prefix_id: prefix_id,
            definition: draft,
            created_at: Utc::now(),
        };
        tracing::info!(
            id = %schedule.id,
            prefix_id = %schedule.schedule_prefix_id,
            class = %schedule.frequency_class(),
            "Schedule added"
        );

        let index = self.schedules.len();
        self.schedules.push(schedule);
        Ok(&self.schedules[index])
    }

    /// Replace a schedule's definition wholesale.
    ///
    /// Identifiers and creation time are kept, so the frequency class must not
    /// change; move a schedule to another class by removing and re-adding it.
    /// The replacement must not duplicate another schedule. Run-time conflicts
    /// are only checked on add.
    pub fn update_schedule(&mut self, id: &str, draft: ScheduleDraft) -> Result<&Schedule> {
        let index = self
            .schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FreqError::ScheduleNotFound(id.to_string()))?;

        let current = self.schedules[index].frequency_class();
        if draft.frequency_class() != current {
            return Err(FreqError::InvalidSchedule(format!(
                "cannot change frequency class of schedule {} from {} to {}",
                self.schedules[index].schedule_prefix_id,
                current,
                draft.frequency_class()
            )));
        }

        draft.validate(self.limits.min_interval_minutes)?;

        let siblings = self.schedules.iter().filter(|s| s.id != id);
        if let Some(existing) = find_duplicate(&draft, siblings) {
            return Err(FreqError::DuplicateSchedule(existing.schedule_prefix_id.clone()));
        }

        let schedule = &mut self.schedules[index];
        schedule.definition = draft;
        tracing::info!(id = %schedule.id, prefix_id = %schedule.schedule_prefix_id, "Schedule updated");
        Ok(&self.schedules[index])
    }

    /// Remove a schedule. Remaining prefix ids are not renumbered.
    pub fn remove_schedule(&mut self, id: &str) -> Result<Schedule> {
        let index = self
            .schedules
            .iter()
            .position(|s| s.id == id || s.schedule_prefix_id == id)
            .ok_or_else(|| FreqError::ScheduleNotFound(id.to_string()))?;

        let removed = self.schedules.remove(index);
        tracing::info!(id = %removed.id, prefix_id = %removed.schedule_prefix_id, "Schedule removed");
        Ok(removed)
    }

    /// Look up a schedule by opaque id or prefix id.
    pub fn get_schedule(&self, id: &str) -> Option<&Schedule> {
        self.schedules
            .iter()
            .find(|s| s.id == id || s.schedule_prefix_id == id)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn schedules_in_class(&self, class: FrequencyClass) -> Vec<&Schedule> {
        self.schedules
            .iter()
            .filter(|s| s.frequency_class() == class)
            .collect()
    }

    pub fn add_dataset_trigger(&mut self, trigger: DatasetTrigger) -> Result<&DatasetTrigger> {
        if let Some(existing) = self.dataset_triggers.iter().find(|t| t.same_rule(&trigger)) {
            return Err(FreqError::DuplicateTrigger(existing.id.clone()));
        }
        tracing::info!(id = %trigger.id, dataset = %trigger.dataset_name, "Dataset trigger added");
        let index = self.dataset_triggers.len();
        self.dataset_triggers.push(trigger);
        Ok(&self.dataset_triggers[index])
    }

    pub fn remove_dataset_trigger(&mut self, id: &str) -> Result<DatasetTrigger> {
        let index = self
            .dataset_triggers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FreqError::TriggerNotFound(id.to_string()))?;
        Ok(self.dataset_triggers.remove(index))
    }

    pub fn dataset_triggers(&self) -> &[DatasetTrigger] {
        &self.dataset_triggers
    }

    pub fn add_job_trigger(&mut self, trigger: JobTrigger) -> Result<&JobTrigger> {
        if let Some(existing) = self.job_triggers.iter().find(|t| t.same_rule(&trigger)) {
            return Err(FreqError::DuplicateTrigger(existing.id.clone()));
        }
        tracing::info!(id = %trigger.id, job = %trigger.job_name, "Job trigger added");
        let index = self.job_triggers.len();
        self.job_triggers.push(trigger);
        Ok(&self.job_triggers[index])
    }

    pub fn remove_job_trigger(&mut self, id: &str) -> Result<JobTrigger> {
        let index = self
            .job_triggers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FreqError::TriggerNotFound(id.to_string()))?;
        Ok(self.job_triggers.remove(index))
    }

    pub fn job_triggers(&self) -> &[JobTrigger] {
        &self.job_triggers
    }

    /// Total number of schedules and triggers.
    pub fn len(&self) -> usize {
        self.schedules.len() + self.dataset_triggers.len() + self.job_triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything, as on wizard reset or completion.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.len(), "Frequency store cleared");
        self.schedules.clear();
        self.dataset_triggers.clear();
        self.job_triggers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ClockTime, DatasetCondition, FrequencySelector, IntervalSpec, JobStatusCondition,
    };

    fn draft(frequency: FrequencySelector, hour: u32, minute: u32) -> ScheduleDraft {
        ScheduleDraft::new(frequency, ClockTime::new(hour, minute))
    }

    #[test]
    fn test_weekly_ids_increment() {
        let mut store = FrequencyStore::new();
        let first = store.add_schedule(draft(FrequencySelector::Weekly, 9, 0)).unwrap();
        assert_eq!(first.schedule_prefix_id, "20");
        let second = store.add_schedule(draft(FrequencySelector::Weekly, 10, 0)).unwrap();
        assert_eq!(second.schedule_prefix_id, "21");
    }

    #[test]
    fn test_conflict_leaves_store_untouched() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Daily, 9, 0)).unwrap();

        let candidate = draft(FrequencySelector::Monthly, 9, 0);
        let err = store.add_schedule(candidate).unwrap_err();
        assert!(matches!(err, FreqError::ScheduleConflict { ref existing, .. } if existing == "10"));
        assert_eq!(store.schedules().len(), 1);
    }

    #[test]
    fn test_duplicate_checked_before_conflict() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Daily, 9, 0)).unwrap();
        let err = store.add_schedule(draft(FrequencySelector::Daily, 9, 0)).unwrap_err();
        assert!(matches!(err, FreqError::DuplicateSchedule(ref id) if id == "10"));
    }

    #[test]
    fn test_zero_step_rejected_before_expansion() {
        let mut store = FrequencyStore::new();
        let interval = IntervalSpec::starting_at(ClockTime::new(9, 0)).with_step(0, 0);
        let err = store
            .add_schedule(draft(FrequencySelector::Daily, 9, 0).with_interval(interval))
            .unwrap_err();
        assert!(matches!(err, FreqError::InvalidSchedule(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_min_interval_limit() {
        let mut store = FrequencyStore::with_limits(StoreLimits {
            quota_per_class: 9,
            min_interval_minutes: 15,
        });
        let interval = IntervalSpec::starting_at(ClockTime::new(9, 0))
            .with_end(ClockTime::new(10, 0))
            .with_step(0, 5);
        assert!(store
            .add_schedule(draft(FrequencySelector::Daily, 9, 0).with_interval(interval))
            .is_err());
    }

    #[test]
    fn test_holiday_based_schedule_has_no_prefix() {
        let mut store = FrequencyStore::new();
        let err = store
            .add_schedule(draft(FrequencySelector::OnHoliday, 5, 0).with_holidays(["Christmas"]))
            .unwrap_err();
        assert!(matches!(err, FreqError::InvalidFrequency(_)));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let store = FrequencyStore::new();
        assert_eq!(store.check_schedule(&draft(FrequencySelector::Annually, 1, 0)).unwrap(), "40");
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_keeps_identifiers() {
        let mut store = FrequencyStore::new();
        let id = store.add_schedule(draft(FrequencySelector::Weekly, 9, 0)).unwrap().id.clone();

        let updated = store
            .update_schedule(&id, draft(FrequencySelector::Weekly, 11, 30).with_run_days(["Friday"]))
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.schedule_prefix_id, "20");
        assert_eq!(updated.submit_time(), ClockTime::new(11, 30));
    }

    #[test]
    fn test_update_rejects_duplicate_of_sibling() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Weekly, 9, 0)).unwrap();
        let id = store.add_schedule(draft(FrequencySelector::Weekly, 10, 0)).unwrap().id.clone();

        let err = store.update_schedule(&id, draft(FrequencySelector::Weekly, 9, 0)).unwrap_err();
        assert!(matches!(err, FreqError::DuplicateSchedule(ref p) if p == "20"));

        // Re-saving the same definition onto itself is fine
        assert!(store.update_schedule(&id, draft(FrequencySelector::Weekly, 10, 0)).is_ok());
    }

    #[test]
    fn test_update_cannot_change_class() {
        let mut store = FrequencyStore::new();
        let id = store.add_schedule(draft(FrequencySelector::Weekly, 9, 0)).unwrap().id.clone();

        for frequency in [FrequencySelector::Daily, FrequencySelector::OnHoliday] {
            let err = store.update_schedule(&id, draft(frequency, 9, 0)).unwrap_err();
            assert!(matches!(err, FreqError::InvalidSchedule(_)));
        }
        assert_eq!(store.get_schedule(&id).unwrap().frequency_class(), FrequencyClass::Weekly);

        let next = store.add_schedule(draft(FrequencySelector::Weekly, 10, 0)).unwrap();
        assert_eq!(next.schedule_prefix_id, "21");
        assert_eq!(store.remove_schedule("20").unwrap().id, id);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = FrequencyStore::new();
        assert!(matches!(
            store.update_schedule("nope", draft(FrequencySelector::Daily, 1, 0)),
            Err(FreqError::ScheduleNotFound(_))
        ));
    }

    #[test]
    fn test_remove_does_not_renumber() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Daily, 1, 0)).unwrap();
        store.add_schedule(draft(FrequencySelector::Daily, 2, 0)).unwrap();
        store.add_schedule(draft(FrequencySelector::Daily, 3, 0)).unwrap();

        let removed = store.remove_schedule("10").unwrap();
        assert_eq!(removed.submit_time(), ClockTime::new(1, 0));
        let ids: Vec<&str> = store.schedules().iter().map(|s| s.schedule_prefix_id.as_str()).collect();
        assert_eq!(ids, vec!["11", "12"]);

        let next = store.add_schedule(draft(FrequencySelector::Daily, 4, 0)).unwrap();
        assert_eq!(next.schedule_prefix_id, "13");
        assert!(store.remove_schedule("10").is_err());
    }

    #[test]
    fn test_schedules_in_class() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Daily, 1, 0)).unwrap();
        store.add_schedule(draft(FrequencySelector::Weekly, 2, 0)).unwrap();
        store.add_schedule(draft(FrequencySelector::Weekly, 3, 0)).unwrap();
        assert_eq!(store.schedules_in_class(FrequencyClass::Weekly).len(), 2);
        assert_eq!(store.schedules_in_class(FrequencyClass::Monthly).len(), 0);
    }

    #[test]
    fn test_triggers() {
        let mut store = FrequencyStore::new();
        let id = store
            .add_dataset_trigger(DatasetTrigger::new("PAY.OUT", DatasetCondition::Closed))
            .unwrap()
            .id
            .clone();
        assert!(matches!(
            store.add_dataset_trigger(DatasetTrigger::new("PAY.OUT", DatasetCondition::Closed)),
            Err(FreqError::DuplicateTrigger(_))
        ));
        store
            .add_job_trigger(JobTrigger::new("EXTRACT01", JobStatusCondition::Success))
            .unwrap();
        assert_eq!(store.len(), 2);

        store.remove_dataset_trigger(&id).unwrap();
        assert!(matches!(store.remove_dataset_trigger(&id), Err(FreqError::TriggerNotFound(_))));
        assert_eq!(store.dataset_triggers().len(), 0);
        assert_eq!(store.job_triggers().len(), 1);
    }

    #[test]
    fn test_clear_and_restore() {
        let mut store = FrequencyStore::new();
        store.add_schedule(draft(FrequencySelector::Daily, 1, 0)).unwrap();
        store
            .add_job_trigger(JobTrigger::new("EXTRACT01", JobStatusCondition::Failure))
            .unwrap();

        let restored = FrequencyStore::restore(store.limits(), store.entries());
        assert_eq!(restored.schedules(), store.schedules());
        assert_eq!(restored.job_triggers(), store.job_triggers());

        store.clear();
        assert!(store.is_empty());
    }
}
