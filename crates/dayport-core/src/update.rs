//! Header refresh workflow.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::collect::{collect_entries, SourceSettings};
use crate::error::Result;
use crate::frontmatter::{apply_entry_front_matter, FrontMatterOptions};
use crate::identity_map::{IdentityMap, IdentityMapStore};
use crate::import::load_identity_map;
use crate::naming::{join_path, resolve_output_name, OutputName};
use crate::progress::{percentage, ProgressSink};
use crate::result::{ImportFailure, ImportResult};
use crate::settings::ImportSettings;
use crate::vault::{FrontMatter, Vault};

/// Rewrite the header of every previously imported note.
///
/// Note bodies are never touched and no note is created. With internal links
/// enabled, names recorded in the identity map take precedence over computed
/// ones so notes imported under an older naming policy are still found. The
/// map itself is only read.
pub fn update_front_matter(
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
        info!(invalid = result.invalid_entries.len(), "No entries to update");
        return Ok(result);
    }

    let identity_map: Option<IdentityMap> = map_store
        .filter(|_| settings.enable_internal_links)
        .map(load_identity_map);

    let options = FrontMatterOptions::from(settings);
    let mut used_names: HashSet<OutputName> = HashSet::new();
    let total = entries.len();

    for (index, collected) in entries.iter().enumerate() {
        let entry = &collected.entry;
        let name = identity_map
            .as_ref()
            .and_then(|map| map.get(&entry.uuid).cloned())
            .unwrap_or_else(|| resolve_output_name(entry, &policy));

        let outcome = if !used_names.insert(name.clone()) {
            Err(format!(
                "A file named {} has already been updated in this import",
                name
            ))
        } else {
            let path = join_path(&settings.out_directory, name.as_str());
            match vault.get_file(&path) {
                None => Err(format!("Could not find file {}", name)),
                Some(note) => vault
                    .process_front_matter(&note, &mut |fm: &mut FrontMatter| {
                        apply_entry_front_matter(fm, entry, &options)
                    })
                    .map_err(|e| e.to_string()),
            }
        };

        match outcome {
            Ok(()) => {
                debug!(entry = %entry.uuid, note = %name, "Updated front matter");
                result.success_count += 1;
            }
            Err(reason) => {
                warn!(
                    entry = %entry.uuid,
                    note = %name,
                    reason = %reason,
                    "Failed to update entry"
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

    info!(
        total = result.total,
        success = result.success_count,
        failed = result.failures.len(),
        invalid = result.invalid_entries.len(),
        "Update finished"
    );
    Ok(result)
}
