//! Note creation workflow.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::collect::{collect_entries, CollectedEntry, SourceSettings};
use crate::error::Result;
use crate::frontmatter::{apply_entry_front_matter, FrontMatterOptions};
use crate::identity_map::{IdentityMap, IdentityMapStore};
use crate::links::resolve_internal_links;
use crate::media::rewrite_media_references;
use crate::naming::{join_path, resolve_output_name, OutputName};
use crate::progress::{percentage, ProgressSink};
use crate::result::{ImportFailure, ImportResult};
use crate::settings::ImportSettings;
use crate::vault::{FileTimes, FrontMatter, Vault};

/// Create one note per valid entry under `settings.out_directory`.
///
/// Entries are processed one at a time in collection order. A failing entry
/// is recorded and the batch carries on; only collection errors and an
/// identity map write failure abort the run. When internal links are enabled
/// and `map_store` is given, the identity map is loaded first, extended with
/// every entry of the batch and written back once at the end.
pub fn import_entries(
    vault: &dyn Vault,
    settings: &ImportSettings,
    progress: &mut dyn ProgressSink,
    map_store: Option<&dyn IdentityMapStore>,
) -> Result<ImportResult> {
    let policy = settings.naming_policy()?;
    let collected = collect_entries(vault, &SourceSettings::from(settings))?;
    let mut result = ImportResult::new(collected.total(), collected.invalid);
    let entries = collected.entries;

    if entries.is_empty() {
        info!(invalid = result.invalid_entries.len(), "No entries to import");
        return Ok(result);
    }

    let link_store = map_store.filter(|_| settings.enable_internal_links);
    let identity_map = link_store.map(|store| {
        let mut map = load_identity_map(store);
        for collected in &entries {
            map.insert(
                collected.entry.uuid.clone(),
                resolve_output_name(&collected.entry, &policy),
            );
        }
        map
    });

    let options = FrontMatterOptions::from(settings);
    let mut used_names: HashSet<OutputName> = HashSet::new();
    let total = entries.len();

    for (index, collected) in entries.iter().enumerate() {
        let entry = &collected.entry;
        let name = identity_map
            .as_ref()
            .and_then(|map| map.get(&entry.uuid).cloned())
            .unwrap_or_else(|| resolve_output_name(entry, &policy));

        let outcome = if used_names.insert(name.clone()) {
            create_note(vault, settings, collected, &name, identity_map.as_ref(), &options)
        } else {
            Err(FailureReason::Batch(format!(
                "A file named {} has already been created in this import",
                name
            )))
        };

        match outcome {
            Ok(()) => {
                debug!(entry = %entry.uuid, note = %name, "Imported entry");
                result.success_count += 1;
            }
            Err(FailureReason::Existing(_)) if settings.ignore_existing_files => {
                debug!(entry = %entry.uuid, note = %name, "Note already exists, ignoring");
                result.ignore_count += 1;
            }
            Err(reason) => {
                let reason = reason.into_message();
                warn!(
                    entry = %entry.uuid,
                    note = %name,
                    reason = %reason,
                    "Failed to import entry"
                );
                result.failures.push(ImportFailure {
                    entry_id: entry.uuid.clone(),
                    creation_date: entry.creation_date,
                    output_name: Some(name),
                    reason,
                });
            }
        }

        progress.emit(percentage(index + 1, total));
    }

    if let (Some(store), Some(map)) = (link_store, identity_map.as_ref()) {
        store.write(map)?;
        debug!(entries = map.len(), "Wrote identity map");
    }

    info!(
        total = result.total,
        success = result.success_count,
        ignored = result.ignore_count,
        failed = result.failures.len(),
        invalid = result.invalid_entries.len(),
        "Import finished"
    );
    Ok(result)
}

/// Why a single entry could not be imported.
enum FailureReason {
    /// The destination note already exists.
    Existing(String),
    /// Another entry of this batch already claimed the name.
    Batch(String),
    Other(String),
}

impl FailureReason {
    fn into_message(self) -> String {
        match self {
            Self::Existing(msg) | Self::Batch(msg) | Self::Other(msg) => msg,
        }
    }
}

fn create_note(
    vault: &dyn Vault,
    settings: &ImportSettings,
    collected: &CollectedEntry,
    name: &OutputName,
    identity_map: Option<&IdentityMap>,
    options: &FrontMatterOptions,
) -> std::result::Result<(), FailureReason> {
    let entry = &collected.entry;

    let mut body = rewrite_media_references(&entry.text, entry).text;
    if let Some(map) = identity_map {
        body = resolve_internal_links(&body, map).text;
    }

    let path = join_path(&settings.out_directory, name.as_str());
    let times = FileTimes {
        created: entry.creation_date,
        modified: entry.modified_date,
    };
    let note = vault.create_file(&path, &body, times).map_err(|e| {
        if e.is_already_exists() {
            FailureReason::Existing(e.to_string())
        } else {
            FailureReason::Other(e.to_string())
        }
    })?;

    vault
        .process_front_matter(&note, &mut |fm: &mut FrontMatter| {
            apply_entry_front_matter(fm, entry, options)
        })
        .map_err(|e| FailureReason::Other(e.to_string()))
}

/// Load the stored map, starting empty when it is missing or unreadable.
pub(crate) fn load_identity_map(store: &dyn IdentityMapStore) -> IdentityMap {
    match store.read() {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "Could not read identity map, starting empty");
            IdentityMap::new()
        }
    }
}
