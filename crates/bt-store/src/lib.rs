//! Storage layer for the baby tracker.
//!
//! The whole [`EventLog`] lives in one JSON file: an object keyed by ISO date
//! whose values are arrays of events. There is no cache; every operation reads
//! the file again.
//!
//! # Read policy
//!
//! A missing file is an empty log. A file that cannot be read or parsed is
//! also treated as an empty log ([`LoadOutcome::Corrupt`]); the failure is
//! reported with `tracing::error!` and the file is copied aside to
//! `<file>.corrupt` before anything can be saved over it.
//!
//! # Write policy
//!
//! [`EventStore::append`] and [`EventStore::delete_last`] are full
//! load-mutate-save cycles. Each cycle holds an exclusive advisory lock on
//! `<file>.lock`, and saves write a sibling temporary file that is renamed
//! over the target. Plain reads take no lock.

mod tracker;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use bt_core::{Event, EventLog, EventType};
use chrono::NaiveDate;
use fs2::FileExt;
use thiserror::Error;

pub use tracker::{Tracker, TrackerError};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The log file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The lock file could not be created or locked.
    #[error("failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log could not be serialized.
    #[error("failed to serialize event log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of reading the log file, before the fail-open policy is applied.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file yet.
    Missing,
    /// The file parsed.
    Loaded(EventLog),
    /// The file exists but is not a valid log.
    Corrupt(serde_json::Error),
}

/// Result of [`EventStore::delete_last`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The event that was removed.
    Removed(Event),
    /// Nothing is recorded for the date.
    NoDataToday,
    /// Events exist for the date, but none of this type.
    NoneOfKind(EventType),
}

/// JSON file holding the event log.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file without applying the fail-open policy.
    pub fn try_load(&self) -> Result<LoadOutcome, StoreError> {
        let content = match fs::read(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_slice(&content) {
            Ok(log) => Ok(LoadOutcome::Loaded(log)),
            Err(e) => Ok(LoadOutcome::Corrupt(e)),
        }
    }

    /// Reads the current log. Never fails: unreadable or corrupt storage
    /// yields an empty log and is reported on the operator channel.
    pub fn load(&self) -> EventLog {
        match self.try_load() {
            Ok(LoadOutcome::Loaded(log)) => {
                tracing::debug!(path = %self.path.display(), days = log.len(), "loaded event log");
                log
            }
            Ok(LoadOutcome::Missing) => {
                tracing::debug!(path = %self.path.display(), "no event log yet, starting empty");
                EventLog::new()
            }
            Ok(LoadOutcome::Corrupt(error)) => {
                tracing::error!(
                    path = %self.path.display(),
                    %error,
                    "event log is corrupt, continuing with an empty log"
                );
                self.quarantine();
                EventLog::new()
            }
            Err(error) => {
                tracing::error!(%error, "event log is unreadable, continuing with an empty log");
                self.quarantine();
                EventLog::new()
            }
        }
    }

    /// Serializes the full log over the previous content.
    pub fn save(&self, log: &EventLog) -> Result<(), StoreError> {
        let result = self.write(log);
        if let Err(error) = &result {
            tracing::error!(%error, "failed to save event log");
        }
        result
    }

    fn write(&self, log: &EventLog) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(log)?;
        json.push('\n');

        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.sibling("tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), days = log.len(), "saved event log");
        Ok(())
    }

    /// Adds `event` to the bucket for `date`, creating the bucket if needed.
    pub fn append(&self, date: NaiveDate, event: Event) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut log = self.load();
        log.entry(date).or_default().push(event);
        self.save(&log)
    }

    /// Removes the chronologically last event of `event_type` on `date`.
    ///
    /// Other dates are never touched. When several events share the latest
    /// time, the one added last goes.
    pub fn delete_last(
        &self,
        date: NaiveDate,
        event_type: EventType,
    ) -> Result<DeleteOutcome, StoreError> {
        let _lock = self.lock()?;
        let mut log = self.load();

        let Some(bucket) = log.get_mut(&date).filter(|b| !b.is_empty()) else {
            return Ok(DeleteOutcome::NoDataToday);
        };
        let Some(index) = bucket
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is(event_type))
            .max_by(|(_, a), (_, b)| a.time.cmp(&b.time))
            .map(|(i, _)| i)
        else {
            return Ok(DeleteOutcome::NoneOfKind(event_type));
        };

        let removed = bucket.remove(index);
        self.save(&log)?;
        Ok(DeleteOutcome::Removed(removed))
    }

    /// Holds the exclusive lock until the returned file is dropped.
    fn lock(&self) -> Result<File, StoreError> {
        let path = self.sibling("lock");
        let lock_err = |source: io::Error| StoreError::Lock {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let file = File::create(&path).map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(file)
    }

    fn quarantine(&self) {
        let backup = self.sibling("corrupt");
        match fs::copy(&self.path, &backup) {
            Ok(_) => tracing::warn!(backup = %backup.display(), "copied corrupt event log aside"),
            Err(error) => tracing::warn!(%error, "could not copy corrupt event log aside"),
        }
    }

    /// `<file>.<suffix>` next to the log file.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("events"), OsString::from);
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }
}
