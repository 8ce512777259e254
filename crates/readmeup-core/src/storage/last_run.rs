//! Last-run record persistence.
//!
//! A single JSON file (`.last-run.json` by default) holding the timestamp
//! of the most recent successful update. The schedule window evaluator
//! reads it at the start of an evaluation; a successful run overwrites it
//! with the current instant. This file is the only shared mutable state in
//! the system and is owned here, never by the evaluator.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Timestamp of the most recent successful run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LastRunRecord {
    pub timestamp: DateTime<Utc>,
}

impl LastRunRecord {
    /// Read the record, `None` when no run has been recorded yet.
    /// A present-but-malformed file is fatal, like any other bad input.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the record with `timestamp`.
    pub fn record(path: &Path, timestamp: DateTime<Utc>) -> Result<()> {
        let record = Self { timestamp };
        std::fs::write(path, serde_json::to_string(&record)?)?;
        Ok(())
    }
}
