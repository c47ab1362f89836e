//! Discovery and validation of export files.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DayportError, Result};
use crate::naming::join_path;
use crate::schema::{validate_entry, InvalidEntry, JournalEntry};
use crate::settings::ImportSettings;
use crate::vault::Vault;

/// Where to read export files from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub in_directory: String,
    /// Single file to read. Empty means every `.json` child of `in_directory`.
    pub in_file_name: String,
}

impl From<&ImportSettings> for SourceSettings {
    fn from(settings: &ImportSettings) -> Self {
        Self {
            in_directory: settings.in_directory.clone(),
            in_file_name: settings.in_file_name.clone(),
        }
    }
}

/// A valid entry and the export file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedEntry {
    pub entry: JournalEntry,
    pub source_file: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedEntries {
    /// Valid entries, in file order then in-file order.
    pub entries: Vec<CollectedEntry>,
    pub invalid: Vec<InvalidEntry>,
}

impl CollectedEntries {
    /// Number of candidate records, valid or not.
    pub fn total(&self) -> usize {
        self.entries.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read, parse and validate every export file selected by `source`.
///
/// Unreadable or syntactically broken files are skipped with a warning. A
/// missing input folder or file, or a JSON document without an `entries`
/// array, fails the whole collection.
pub fn collect_entries(vault: &dyn Vault, source: &SourceSettings) -> Result<CollectedEntries> {
    if !vault.folder_exists(&source.in_directory) {
        return Err(DayportError::NotFound(
            "Input directory does not exist.".to_string(),
        ));
    }

    let files = source_files(vault, source)?;
    let mut collected = CollectedEntries::default();

    for file in files {
        let data = match vault.read_text(&file) {
            Ok(data) => data,
            Err(e) => {
                warn!(file = %file, error = %e, "Skipping unreadable export file");
                continue;
            }
        };
        let document: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                warn!(file = %file, error = %e, "Skipping export file with invalid JSON");
                continue;
            }
        };
        let records = document
            .get("entries")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                DayportError::Schema(format!("{} does not contain an `entries` array", file))
            })?;

        debug!(file = %file, records = records.len(), "Read export file");
        for record in records {
            match validate_entry(record) {
                Ok(entry) => collected.entries.push(CollectedEntry {
                    entry,
                    source_file: file.clone(),
                }),
                Err(mut invalid) => {
                    invalid.source_file = Some(file.clone());
                    collected.invalid.push(invalid);
                }
            }
        }
    }

    Ok(collected)
}

fn source_files(vault: &dyn Vault, source: &SourceSettings) -> Result<Vec<String>> {
    let name = source.in_file_name.trim();
    if !name.is_empty() {
        let path = join_path(&source.in_directory, name);
        if vault.get_file(&path).is_none() {
            return Err(DayportError::NotFound(format!(
                "File {} does not exist in the input directory.",
                name
            )));
        }
        return Ok(vec![path]);
    }

    Ok(vault
        .list_children(&source.in_directory)?
        .into_iter()
        .filter(|path| {
            Path::new(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect())
}
