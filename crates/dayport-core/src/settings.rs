//! Import settings.
//!
//! One [`ImportSettings`] value drives both workflows. It deserializes from
//! the `[import]` table of the CLI config file, with every field optional.

use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DayportError, Result};
use crate::naming::{NamingPolicy, DEFAULT_ALL_DAY_FORMAT, DEFAULT_TIMED_FORMAT};
use crate::tags::TagCase;

pub const DEFAULT_IN_DIRECTORY: &str = "day-one-in";
pub const DEFAULT_OUT_DIRECTORY: &str = "day-one-out";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Vault folder holding the export JSON files.
    pub in_directory: String,

    /// Single export file to read. Empty means every `.json` file in `in_directory`.
    pub in_file_name: String,

    /// Vault folder receiving the notes.
    pub out_directory: String,

    /// Count pre-existing destination notes as ignored instead of failed.
    pub ignore_existing_files: bool,

    /// Name notes after their creation time instead of their identifier.
    pub date_based_file_names: bool,
    pub date_based_file_name_format: String,
    pub date_based_all_day_file_name_format: String,

    /// IANA zone used for date-based names. UTC when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Rewrite links between entries into wiki links.
    pub enable_internal_links: bool,

    /// Write `latitude`/`longitude` keys instead of a combined `coordinates` key.
    pub separate_coordinate_fields: bool,

    pub tag_case: TagCase,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            in_directory: DEFAULT_IN_DIRECTORY.to_string(),
            in_file_name: String::new(),
            out_directory: DEFAULT_OUT_DIRECTORY.to_string(),
            ignore_existing_files: false,
            date_based_file_names: false,
            date_based_file_name_format: DEFAULT_TIMED_FORMAT.to_string(),
            date_based_all_day_file_name_format: DEFAULT_ALL_DAY_FORMAT.to_string(),
            timezone: None,
            enable_internal_links: false,
            separate_coordinate_fields: false,
            tag_case: TagCase::Preserve,
        }
    }
}

impl ImportSettings {
    /// Resolved time zone for date-based names.
    pub fn time_zone(&self) -> Result<Tz> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(Tz::UTC),
            Some(name) => Tz::from_str(name)
                .map_err(|_| DayportError::InvalidInput(format!("Unknown time zone: {}", name))),
        }
    }

    /// Build the naming policy, validating date patterns and time zone.
    pub fn naming_policy(&self) -> Result<NamingPolicy> {
        if !self.date_based_file_names {
            return Ok(NamingPolicy::GlobalId);
        }
        NamingPolicy::timestamp(
            self.date_based_file_name_format.clone(),
            self.date_based_all_day_file_name_format.clone(),
            self.time_zone()?,
        )
    }
}
