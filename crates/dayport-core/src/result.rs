//! Outcome of an import or update run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::naming::OutputName;
use crate::schema::InvalidEntry;

/// An entry that validated but could not be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportFailure {
    pub entry_id: String,
    pub creation_date: DateTime<Utc>,
    /// Note name, when one was derived before the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<OutputName>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportResult {
    /// Candidate records, valid and invalid.
    pub total: usize,
    pub success_count: usize,
    pub ignore_count: usize,
    pub failures: Vec<ImportFailure>,
    pub invalid_entries: Vec<InvalidEntry>,
}

impl ImportResult {
    pub fn new(total: usize, invalid_entries: Vec<InvalidEntry>) -> Self {
        Self {
            total,
            invalid_entries,
            ..Self::default()
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether any entry failed or was rejected by validation.
    pub fn has_problems(&self) -> bool {
        !self.failures.is_empty() || !self.invalid_entries.is_empty()
    }
}
