//! # Dayport Core
//!
//! Core library for dayport: converts a Day One JSON export into Markdown
//! notes with YAML front matter.
//!
//! This crate holds the conversion pipeline and the storage abstractions it
//! runs against, independent of the CLI.
//!
//! ## Architecture
//!
//! - **schema**: Export record validation into typed entries
//! - **naming**: Note names from entries (identifier or creation time)
//! - **media**: Rewriting of inline photo/video/audio/pdf references
//! - **links**: Rewriting of links between entries into wiki links
//! - **identity_map**: Persistent identifier to note name map
//! - **collect**: Discovery and validation of export files
//! - **import** / **update**: The two workflows
//! - **vault**: Storage trait and the directory-backed implementation
//! - **report**: Markdown report of failed entries

pub mod collect;
pub mod error;
pub mod frontmatter;
pub mod fs;
pub mod identity_map;
pub mod import;
pub mod links;
pub mod media;
pub mod naming;
pub mod progress;
pub mod report;
pub mod result;
pub mod schema;
pub mod settings;
pub mod tags;
pub mod update;
pub mod vault;

pub use collect::{collect_entries, CollectedEntries, CollectedEntry, SourceSettings};
pub use error::{DayportError, Result};
pub use identity_map::{FileIdentityMapStore, IdentityMap, IdentityMapStore};
pub use import::import_entries;
pub use naming::{resolve_output_name, NamingPolicy, OutputName};
pub use progress::{NoProgress, ProgressSink};
pub use report::{render_failure_report, write_failure_report, ReportKind};
pub use result::{ImportFailure, ImportResult};
pub use schema::{validate_entry, InvalidEntry, JournalEntry};
pub use settings::ImportSettings;
pub use tags::TagCase;
pub use update::update_front_matter;
pub use vault::{FsVault, Vault};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
