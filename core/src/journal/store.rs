use crate::journal::record::DecisionRecord;
use crate::prelude::{DecisionError, DecisionResult};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Append-only decision log.
///
/// Each row is formatted before the write and pushed with a single
/// `write_all` under an exclusive lock, so concurrent writers never
/// interleave mid-row and an interrupted cycle never leaves a partial record.
pub struct DecisionJournal {
    file: Mutex<File>,
}

impl DecisionJournal {
    pub fn open<P: AsRef<Path>>(path: P) -> DecisionResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    DecisionError::JournalWrite(format!(
                        "creating journal directory {}: {}",
                        parent.display(),
                        err
                    ))
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| {
                DecisionError::JournalWrite(format!(
                    "opening journal {}: {}",
                    path.display(),
                    err
                ))
            })?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn append(&self, record: &DecisionRecord) -> DecisionResult<()> {
        let row = record.to_csv_row();
        let mut file = self
            .file
            .lock()
            .map_err(|_| DecisionError::JournalWrite("journal lock poisoned".to_string()))?;
        file.write_all(row.as_bytes())
            .map_err(|err| DecisionError::JournalWrite(err.to_string()))?;
        file.flush()
            .map_err(|err| DecisionError::JournalWrite(err.to_string()))
    }
}
