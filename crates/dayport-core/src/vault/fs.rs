//! Directory-backed vault.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde_yaml::Mapping;
use tracing::{debug, warn};

use super::{FileTimes, FrontMatter, NoteHandle, Vault};
use crate::error::{DayportError, Result};
use crate::fs::write_atomic;
use crate::naming::normalize_path;

const FENCE: &str = "---";

/// A vault rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault path. Parent traversal is rejected.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize_path(path);
        if normalized == "/" {
            return Ok(self.root.clone());
        }
        let relative = Path::new(&normalized);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(DayportError::InvalidInput(format!(
                "Path escapes the vault: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl Vault for FsVault {
    fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>> {
        let dir = self.resolve(path)?;
        if !dir.is_dir() {
            return Err(DayportError::NotFound(format!(
                "Folder not found: {}",
                path
            )));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        let base = normalize_path(path);
        Ok(names
            .into_iter()
            .map(|name| {
                if base == "/" {
                    name
                } else {
                    format!("{}/{}", base, name)
                }
            })
            .collect())
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let file = self.resolve(path)?;
        fs::read_to_string(&file).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DayportError::NotFound(format!("File not found: {}", path)),
            _ => DayportError::Storage(format!("Failed to read {}: {}", path, e)),
        })
    }

    fn create_file(&self, path: &str, content: &str, times: FileTimes) -> Result<NoteHandle> {
        let file_path = self.resolve(path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // A body opening with a `---` rule would be read back as a header.
        let content = if starts_with_fence(content) {
            format!("{FENCE}\n{FENCE}\n{content}")
        } else {
            content.to_string()
        };
        let modified = SystemTime::from(times.modified);

        write_new_file(&file_path, |file| {
            file.write_all(content.as_bytes())?;
            file.set_times(std::fs::FileTimes::new().set_modified(modified))
        })
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => DayportError::AlreadyExists(normalize_path(path)),
            _ => DayportError::Storage(format!("Failed to create {}: {}", path, e)),
        })?;

        debug!(path, "created note");
        Ok(NoteHandle::new(normalize_path(path)))
    }

    fn get_file(&self, path: &str) -> Option<NoteHandle> {
        let file_path = self.resolve(path).ok()?;
        if file_path.is_file() {
            Some(NoteHandle::new(normalize_path(path)))
        } else {
            None
        }
    }

    fn process_front_matter(
        &self,
        note: &NoteHandle,
        mutator: &mut dyn FnMut(&mut FrontMatter),
    ) -> Result<()> {
        let file_path = self.resolve(note.path())?;
        let original = self.read_text(note.path())?;
        let modified = fs::metadata(&file_path).and_then(|m| m.modified()).ok();

        let (header, body) = split_front_matter(&original);
        let fields: Mapping = match header {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
            _ => Mapping::new(),
        };

        let mut front_matter = FrontMatter::from_mapping(fields);
        mutator(&mut front_matter);

        let rendered = render_note(&front_matter, body)?;
        write_atomic(&file_path, rendered.as_bytes())?;

        // The header rewrite should not look like an edit of the entry itself.
        if let Some(modified) = modified {
            let file = OpenOptions::new().write(true).open(&file_path)?;
            file.set_times(std::fs::FileTimes::new().set_modified(modified))?;
        }
        Ok(())
    }
}

/// Split a note into its YAML header (without fences) and body.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(header), body);
        }
        offset += line.len();
    }
    (None, content)
}

fn starts_with_fence(content: &str) -> bool {
    content.lines().next().map(str::trim_end) == Some(FENCE)
}

/// Create `path` exclusively and fill it. A file that could not be fully
/// written is removed so it never blocks a later run.
fn write_new_file(
    path: &Path,
    fill: impl FnOnce(&mut File) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = fill(&mut file) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "Failed to remove partial note");
        }
        return Err(e);
    }
    Ok(())
}

fn render_note(front_matter: &FrontMatter, body: &str) -> Result<String> {
    if front_matter.is_empty() {
        if starts_with_fence(body) {
            return Ok(format!("{FENCE}\n{FENCE}\n{body}"));
        }
        return Ok(body.to_string());
    }
    let yaml = serde_yaml::to_string(&front_matter.clone().into_mapping())?;
    Ok(format!("{FENCE}\n{yaml}{FENCE}\n{body}"))
}
