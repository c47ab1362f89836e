//! Persistent identifier to note name map.
//!
//! Link resolution needs the note name of entries imported in earlier runs,
//! so the map is kept in a private directory inside the vault and rewritten
//! wholesale at the end of every linking import.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DayportError, Result};
use crate::fs::write_atomic;
use crate::naming::OutputName;

/// Private directory under the vault root.
pub const MAP_DIRECTORY: &str = ".dayport";

/// File name of the map inside [`MAP_DIRECTORY`].
pub const MAP_FILE_NAME: &str = "uuids.json";

/// Entry identifier to note name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityMap(BTreeMap<String, OutputName>);

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&OutputName> {
        self.0.get(id)
    }

    /// Insert or overwrite the name for `id`.
    pub fn insert(&mut self, id: impl Into<String>, name: OutputName) {
        self.0.insert(id.into(), name);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OutputName)> {
        self.0.iter()
    }
}

/// Backing storage for an [`IdentityMap`].
pub trait IdentityMapStore {
    /// Load the stored map. Callers treat any error as an empty map.
    fn read(&self) -> Result<IdentityMap>;

    /// Replace the stored map.
    fn write(&self, map: &IdentityMap) -> Result<()>;
}

/// Map stored as pretty JSON at `<vault>/.dayport/uuids.json`.
#[derive(Debug, Clone)]
pub struct FileIdentityMapStore {
    path: PathBuf,
}

impl FileIdentityMapStore {
    pub fn new(vault_root: &Path) -> Self {
        Self {
            path: vault_root.join(MAP_DIRECTORY).join(MAP_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityMapStore for FileIdentityMapStore {
    fn read(&self) -> Result<IdentityMap> {
        let data = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DayportError::NotFound(format!("Identity map not found: {}", self.path.display()))
            }
            _ => DayportError::Storage(format!(
                "Failed to read identity map {}: {}",
                self.path.display(),
                e
            )),
        })?;
        serde_json::from_str(&data)
            .map_err(|e| DayportError::Validation(format!("Malformed identity map: {}", e)))
    }

    fn write(&self, map: &IdentityMap) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        write_atomic(&self.path, json.as_bytes())
    }
}
