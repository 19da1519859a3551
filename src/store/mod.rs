//! File-backed stores
//!
//! Both repositories keep their whole store in memory, keyed by entity id,
//! and rewrite a single JSON-array file after every mutation. There is no
//! partial persistence and no locking: one process, one writer. Writes go
//! through a temporary file beside the target and rename over it, so a crash
//! mid-write leaves the previous file intact.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

pub mod products;
pub mod users;

/// Errors shared by the file-backed repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read or written.
    #[error("store file i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The store file does not hold a decodable JSON array.
    #[error("malformed store file: {0}")]
    Parse(#[from] serde_json::Error),

    /// No entry under the requested id.
    #[error("no entry with id {0}")]
    NotFound(i64),
}

/// Decode the JSON array at `path` into records.
///
/// A missing file is an empty store. Array entries that are not objects, or
/// objects whose fields fail to decode, are skipped with a warning; the rest
/// of the array still loads. A file that is readable but not a JSON array
/// aborts the load with [`StoreError::Parse`].
fn read_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(StoreError::Io(error)),
    };

    let entries: Vec<Value> = serde_json::from_str(&contents)?;
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!(path = %path.display(), index, "skipping non-object entry");
            continue;
        }

        match serde_json::from_value(entry) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(path = %path.display(), index, %error, "skipping undecodable entry");
            }
        }
    }

    Ok(records)
}

/// Serialize `records` as a pretty-printed JSON array and atomically replace
/// the file at `path`.
///
/// The array is written to a temporary file in the target's directory and
/// renamed into place, so readers never observe a half-written store.
fn write_records<R: Serialize>(path: &Path, records: &[R]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let json = serde_json::to_string_pretty(records)?;
    let mut file = NamedTempFile::new_in(dir)?;

    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.persist(path).map_err(|error| StoreError::Io(error.error))?;

    Ok(())
}
