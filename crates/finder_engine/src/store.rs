//! File-backed vacancy store.
//!
//! The backing file holds one JSON array of raw vacancies and is the only state:
//! every operation re-reads it and every mutation rewrites it in full. There is
//! no locking, so two processes writing the same file can lose updates.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use finder_core::{
    dedup_name, field_text, hydrate, CurrencyConverter, RawVacancy, Record, VacancyError, NAME_KEY,
};
use finder_logging::{finder_info, finder_warn};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// Persistent collection of raw vacancies.
pub trait RecordStore {
    /// Current contents; a missing or unreadable file degrades to "no records".
    fn list(&self) -> LoadOutcome;

    /// Adds every record whose `name` is not stored yet.
    fn append(&self, records: &[RawVacancy]) -> Result<AppendSummary, StoreError>;

    /// Empties the store.
    fn clear(&self) -> Result<(), StoreError>;

    /// Removes every record whose `key` field contains `value`, ignoring case.
    ///
    /// Never returns an error: failures are reported through [`DeleteOutcome::Failed`]
    /// and leave the store untouched.
    fn delete(&self, key: Option<&str>, value: Option<&str>) -> DeleteOutcome;

    /// Stored vacancies as validated records, failing on the first bad one.
    fn records(&self, converter: &dyn CurrencyConverter) -> Result<Vec<Record>, VacancyError> {
        hydrate(&self.list().into_records(), converter)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<RawVacancy>),
    Degraded(Degraded),
}

impl LoadOutcome {
    pub fn into_records(self) -> Vec<RawVacancy> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Degraded(_) => Vec::new(),
        }
    }

    pub fn degraded(&self) -> Option<&Degraded> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Degraded(reason) => Some(reason),
        }
    }
}

/// Why a read fell back to an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Degraded {
    #[error("{} not found", .0.display())]
    Missing(PathBuf),
    #[error("cannot read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },
    #[error("{} is not a JSON array of vacancies: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppendSummary {
    pub added: usize,
    /// Skipped because a record with the same name is already stored.
    pub duplicates: usize,
    /// Skipped because they carry no usable `name`.
    pub unnamed: usize,
    /// Records in the store after the write.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Key or value was not given; nothing was read or written.
    Skipped,
    Deleted { removed: usize, remaining: usize },
    Failed(DeleteFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteFailure {
    #[error(transparent)]
    Read(Degraded),
    #[error("cannot write filtered vacancies: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read; it is left untouched.
    #[error(transparent)]
    Read(Degraded),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("cannot serialize vacancies: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A [`RecordStore`] bound to one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    writer: AtomicFileWriter,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            writer: AtomicFileWriter::new(path.clone()),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> LoadOutcome {
        let content = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return LoadOutcome::Degraded(Degraded::Missing(self.path.clone()));
            }
            Err(err) => {
                return LoadOutcome::Degraded(Degraded::Unreadable {
                    path: self.path.clone(),
                    message: err.to_string(),
                });
            }
        };

        match serde_json::from_slice::<Vec<RawVacancy>>(&content) {
            Ok(records) => LoadOutcome::Loaded(records),
            Err(err) => LoadOutcome::Degraded(Degraded::Corrupt {
                path: self.path.clone(),
                message: err.to_string(),
            }),
        }
    }

    /// Reads for a mutation: a missing or corrupt file counts as an empty store.
    fn read_or_empty(&self) -> Result<Vec<RawVacancy>, StoreError> {
        match self.read() {
            LoadOutcome::Loaded(records) => Ok(records),
            LoadOutcome::Degraded(Degraded::Missing(_)) => Ok(Vec::new()),
            LoadOutcome::Degraded(reason @ Degraded::Corrupt { .. }) => {
                finder_warn!("Starting from an empty store: {}", reason);
                Ok(Vec::new())
            }
            LoadOutcome::Degraded(reason) => {
                finder_warn!("Refusing to overwrite: {}", reason);
                Err(StoreError::Read(reason))
            }
        }
    }

    fn write_all(&self, records: &[RawVacancy]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;
        self.writer.write(&content)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self) -> LoadOutcome {
        let outcome = self.read();
        if let Some(reason) = outcome.degraded() {
            if matches!(reason, Degraded::Missing(_)) {
                finder_info!("No stored vacancies: {}", reason);
            } else {
                finder_warn!("Ignoring stored vacancies: {}", reason);
            }
        }
        outcome
    }

    fn append(&self, records: &[RawVacancy]) -> Result<AppendSummary, StoreError> {
        let mut current = self.read_or_empty()?;
        let mut summary = AppendSummary::default();

        for record in records {
            let Some(name) = dedup_name(record) else {
                summary.unnamed += 1;
                continue;
            };
            if current
                .iter()
                .any(|existing| existing.get(NAME_KEY) == Some(name))
            {
                summary.duplicates += 1;
                continue;
            }
            current.push(record.clone());
            summary.added += 1;
        }

        self.write_all(&current)?;
        summary.total = current.len();
        finder_info!(
            "Appended {} vacancies to {:?} ({} duplicates, {} unnamed skipped)",
            summary.added,
            self.path,
            summary.duplicates,
            summary.unnamed
        );
        Ok(summary)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write_all(&[])?;
        finder_info!("Cleared {:?}", self.path);
        Ok(())
    }

    fn delete(&self, key: Option<&str>, value: Option<&str>) -> DeleteOutcome {
        let (Some(key), Some(value)) = (
            key.filter(|key| !key.is_empty()),
            value.filter(|value| !value.is_empty()),
        ) else {
            return DeleteOutcome::Skipped;
        };

        let records = match self.read() {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Degraded(reason) => {
                finder_warn!("Delete skipped: {}", reason);
                return DeleteOutcome::Failed(DeleteFailure::Read(reason));
            }
        };

        let needle = value.to_lowercase();
        let before = records.len();
        let retained: Vec<RawVacancy> = records
            .into_iter()
            .filter(|record| !field_matches(record, key, &needle))
            .collect();
        let removed = before - retained.len();

        if let Err(err) = self.write_all(&retained) {
            finder_warn!("Delete failed for {:?}: {}", self.path, err);
            return DeleteOutcome::Failed(DeleteFailure::Write(err.to_string()));
        }

        finder_info!(
            "Deleted {} vacancies where {} contains {:?}",
            removed,
            key,
            value
        );
        DeleteOutcome::Deleted {
            removed,
            remaining: retained.len(),
        }
    }
}

/// Records without `key` never match, so a filter on a missing field keeps them.
fn field_matches(record: &RawVacancy, key: &str, needle: &str) -> bool {
    field_text(record, key).is_some_and(|text| text.to_lowercase().contains(needle))
}
