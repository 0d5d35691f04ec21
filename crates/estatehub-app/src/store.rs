// Rust guideline compliant 2026-10-12

//! JSONL record store.
//!
//! One tagged record per line. Queries skip malformed lines with a warning.
//! Writes rewrite the whole file through a temp file and an atomic rename,
//! so they refuse to start from a file with malformed lines. Read-modify-write
//! cycles run under an exclusive `fs2` lock on a sibling `.lock` file.

use crate::error::{AppError, Result};
use estatehub_core::{Entity, Record, RecordKind};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Storage for every record kind in one JSONL file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Record store path cannot be empty".to_string(),
            ));
        }
        Ok(Self { path })
    }

    /// Returns the JSONL file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record, in file order, skipping malformed lines.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<Vec<Record>> {
        self.read_records(false)
    }

    /// Loads every record, in file order, failing on the first malformed
    /// line.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord` for a line that does not parse, or an IO error
    /// if the file cannot be read.
    pub fn load_strict(&self) -> Result<Vec<Record>> {
        self.read_records(true)
    }

    fn read_records(&self, strict: bool) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(&line) {
                Ok(record) => records.push(record),
                Err(e) if strict => {
                    return Err(AppError::CorruptRecord {
                        path: self.path.clone(),
                        line: number + 1,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = number + 1,
                        error = %e,
                        "skipping malformed record"
                    );
                }
            }
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "records loaded");
        Ok(records)
    }

    /// Finds one record by kind and id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record matches.
    pub fn find(&self, kind: RecordKind, id: &str) -> Result<Record> {
        find_in(&self.load_all()?, kind, id).cloned()
    }

    /// Replaces the file contents with `records`, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save_all(&self, records: &[Record]) -> Result<()> {
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let mut file = File::create(&temp_path)?;
            for record in records {
                let json = serde_json::to_string(record)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "records saved");
        Ok(())
    }

    /// Replaces one stored record with the result of `change`, under the
    /// store lock.
    ///
    /// Nothing is written if the file holds a malformed line, the record is
    /// missing, or `change` fails.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRecord`, `NotFound`, the error from `change`, or an
    /// IO error.
    pub fn update<F>(&self, kind: RecordKind, id: &str, change: F) -> Result<Record>
    where
        F: FnOnce(&Record) -> Result<Record>,
    {
        self.with_lock(|| {
            let mut records = self.load_strict()?;
            let index = position_of(&records, kind, id).ok_or_else(|| AppError::NotFound {
                kind,
                id: id.to_string(),
            })?;
            let updated = change(&records[index])?;
            records[index] = updated.clone();
            self.save_all(&records)?;
            Ok(updated)
        })
    }

    /// Runs `f` while holding an exclusive lock on the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is held elsewhere or `f` fails.
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.try_lock_exclusive().map_err(|e| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock on {}: {e}", lock_path.display()),
            ))
        })?;

        let result = f();
        let _ = lock_file.unlock();
        result
    }
}

/// Returns the index of the record with `kind` and `id`.
#[must_use]
pub fn position_of(records: &[Record], kind: RecordKind, id: &str) -> Option<usize> {
    records
        .iter()
        .position(|record| record.kind() == kind && record.id() == id)
}

/// Finds a record by kind and id in a loaded slice.
///
/// # Errors
///
/// Returns `NotFound` if no record matches.
pub fn find_in<'a>(records: &'a [Record], kind: RecordKind, id: &str) -> Result<&'a Record> {
    position_of(records, kind, id)
        .map(|index| &records[index])
        .ok_or_else(|| AppError::NotFound {
            kind,
            id: id.to_string(),
        })
}
