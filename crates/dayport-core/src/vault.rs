//! Vault abstraction.
//!
//! The import and update workflows never touch the filesystem directly. They
//! talk to a [`Vault`], which owns path resolution, note creation and the
//! read-modify-write cycle of a note's YAML header. [`FsVault`] is the
//! implementation backed by a directory on disk.

pub mod fs;

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};

use crate::error::Result;

pub use fs::FsVault;

/// Timestamps applied to a newly created note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Reference to an existing note, by vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteHandle {
    path: String,
}

impl NoteHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Ordered key-value view of a note's YAML header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn into_mapping(self) -> Mapping {
        self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set `key`, keeping its position when it already exists.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(Value::from(key), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in header order. Non-string keys are skipped.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().filter_map(Value::as_str).collect()
    }
}

/// Storage interface the import and update workflows run against.
///
/// Paths are vault-relative and use `/` as separator.
pub trait Vault {
    /// Whether `path` names an existing folder.
    fn folder_exists(&self, path: &str) -> bool;

    /// Paths of the direct children of a folder, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `DayportError::NotFound` if the folder does not exist.
    fn list_children(&self, path: &str) -> Result<Vec<String>>;

    /// Read a file as UTF-8 text.
    fn read_text(&self, path: &str) -> Result<String>;

    /// Create a new note with `content`.
    ///
    /// # Errors
    ///
    /// Returns `DayportError::AlreadyExists` if a file is already at `path`.
    /// Existing files are never overwritten.
    fn create_file(&self, path: &str, content: &str, times: FileTimes) -> Result<NoteHandle>;

    /// Look up an existing note.
    fn get_file(&self, path: &str) -> Option<NoteHandle>;

    /// Read-modify-write the YAML header of `note`.
    ///
    /// The mutator sees the current header (empty when the note has none).
    /// The note body is left untouched and the rewrite is atomic.
    fn process_front_matter(
        &self,
        note: &NoteHandle,
        mutator: &mut dyn FnMut(&mut FrontMatter),
    ) -> Result<()>;
}
