//! JSONL persistence for a frequency store session.
//!
//! One tagged entry per line. The file is rewritten in full on save, so it
//! always reflects the store exactly.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DatasetTrigger, JobTrigger, Schedule};
use crate::error::{FreqError, Result};
use crate::store::frequency_store::{FrequencyStore, StoreLimits};

/// A single line of a session file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionEntry {
    Schedule(Schedule),
    DatasetTrigger(DatasetTrigger),
    JobTrigger(JobTrigger),
}

/// Load a session, or an empty store if the file does not exist yet.
///
/// Schedules are range-checked on the way in; a hand-edited entry that could
/// not be expanded fails the load with its line number.
pub fn load_session(path: &Path, limits: StoreLimits) -> Result<FrequencyStore> {
    if !path.exists() {
        log::debug!("No session at {}, starting empty", path.display());
        return Ok(FrequencyStore::with_limits(limits));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str::<SessionEntry>(&line)?;
        if let SessionEntry::Schedule(schedule) = &entry {
            if let Err(e) = schedule.definition.validate(0) {
                log::warn!("Invalid schedule on line {} of {}: {}", number + 1, path.display(), e);
                return Err(FreqError::InvalidSchedule(format!(
                    "session line {}: schedule {}: {}",
                    number + 1,
                    schedule.schedule_prefix_id,
                    e
                )));
            }
        }
        entries.push(entry);
    }

    log::debug!("Loaded {} session entries from {}", entries.len(), path.display());
    Ok(FrequencyStore::restore(limits, entries))
}

/// Write the whole store to `path`, creating parent directories.
pub fn save_session(store: &FrequencyStore, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for entry in store.entries() {
        writeln!(writer, "{}", serde_json::to_string(&entry)?)?;
    }
    writer.flush()?;
    Ok(())
}
