//! Output note naming.
//!
//! Every entry maps to exactly one note name under the active
//! [`NamingPolicy`]. Identifier-based names never collide; timestamp-based
//! names are readable but can, so collisions are detected by the
//! orchestrators rather than silently overwritten.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{DayportError, Result};
use crate::schema::JournalEntry;

/// Extension of every generated note.
pub const NOTE_EXTENSION: &str = "md";

/// Characters that cannot appear in a note file name.
pub const ILLEGAL_FILENAME_CHARACTERS: [char; 9] = ['*', '"', '\\', '/', '<', '>', ':', '|', '?'];

/// Default pattern for timed entries.
pub const DEFAULT_TIMED_FORMAT: &str = "%Y-%m-%d %H%M%S";

/// Default pattern for all-day entries.
pub const DEFAULT_ALL_DAY_FORMAT: &str = "%Y-%m-%d";

/// Vault-relative file name of a generated note, including `.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputName(String);

impl OutputName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without the note extension, as used in wiki links.
    pub fn stem(&self) -> &str {
        self.0
            .strip_suffix(".md")
            .unwrap_or(self.0.as_str())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How note names are derived from entries.
#[derive(Debug, Clone, PartialEq)]
pub enum NamingPolicy {
    /// `{uuid}.md`
    GlobalId,

    /// Creation time formatted with a strftime pattern.
    Timestamp(TimestampNaming),
}

/// Validated patterns for timestamp-based names.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampNaming {
    timed_format: String,
    all_day_format: String,
    timezone: Tz,
}

impl NamingPolicy {
    /// Build a timestamp policy, rejecting patterns that cannot produce a file name.
    pub fn timestamp(
        timed_format: impl Into<String>,
        all_day_format: impl Into<String>,
        timezone: Tz,
    ) -> Result<Self> {
        let timed_format = timed_format.into();
        let all_day_format = all_day_format.into();
        validate_name_format(&timed_format)?;
        validate_name_format(&all_day_format)?;
        Ok(Self::Timestamp(TimestampNaming {
            timed_format,
            all_day_format,
            timezone,
        }))
    }
}

/// Check that a strftime pattern is well formed and yields a legal file name.
pub fn validate_name_format(format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(DayportError::InvalidInput(
            "File name format cannot be empty".to_string(),
        ));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DayportError::InvalidInput(format!(
            "Invalid file name format: {}",
            format
        )));
    }

    // Specifiers such as %T or %D expand to separators, so check the rendered form too.
    let sample = Utc
        .with_ymd_and_hms(2024, 4, 19, 21, 55, 53)
        .single()
        .ok_or_else(|| DayportError::Other("Invalid sample timestamp".to_string()))?;
    let rendered = sample.format(format).to_string();
    if rendered.contains(ILLEGAL_FILENAME_CHARACTERS.as_slice())
        || format.contains(ILLEGAL_FILENAME_CHARACTERS.as_slice())
    {
        let illegal: String = ILLEGAL_FILENAME_CHARACTERS.iter().collect();
        return Err(DayportError::InvalidInput(format!(
            "File name cannot contain any of the following characters: {}",
            illegal
        )));
    }
    Ok(())
}

/// Derive the note name for an entry.
pub fn resolve_output_name(entry: &JournalEntry, policy: &NamingPolicy) -> OutputName {
    let base = match policy {
        NamingPolicy::GlobalId => entry.uuid.clone(),
        NamingPolicy::Timestamp(naming) => {
            let format = if entry.is_all_day {
                &naming.all_day_format
            } else {
                &naming.timed_format
            };
            entry
                .creation_date
                .with_timezone(&naming.timezone)
                .format(format)
                .to_string()
        }
    };
    OutputName(normalize_path(&format!("{}.{}", base, NOTE_EXTENSION)))
}

/// Normalize a vault-relative path.
///
/// Backslashes become `/`, runs of `/` collapse, leading and trailing `/`
/// are dropped and non-breaking spaces become plain spaces.
pub fn normalize_path(path: &str) -> String {
    let replaced: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();

    let normalized = replaced
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        "/".to_string()
    } else {
        normalized
    }
}

/// Join a folder and a file name into a normalized vault path.
pub fn join_path(folder: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", folder, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_entry;
    use serde_json::json;

    fn entry(uuid: &str, created: &str, all_day: bool) -> JournalEntry {
        validate_entry(&json!({
            "uuid": uuid,
            "creationDate": created,
            "modifiedDate": created,
            "isAllDay": all_day,
            "text": "body",
        }))
        .unwrap()
    }

    #[test]
    fn test_global_id_naming() {
        let e = entry("abc123", "2024-04-19T21:55:53Z", true);
        assert_eq!(
            resolve_output_name(&e, &NamingPolicy::GlobalId).as_str(),
            "abc123.md"
        );
    }

    #[test]
    fn test_timestamp_naming_uses_all_day_pattern() {
        let policy = NamingPolicy::timestamp("%Y%m%d%H%M%S", "%S%M%H%d%m%Y", Tz::UTC).unwrap();

        let timed = entry("a", "2024-04-19T21:55:53Z", false);
        let all_day = entry("b", "2023-03-11T11:15:33Z", true);

        assert_eq!(resolve_output_name(&timed, &policy).as_str(), "20240419215553.md");
        assert_eq!(resolve_output_name(&all_day, &policy).as_str(), "33151111032023.md");
    }

    #[test]
    fn test_timestamp_naming_defaults() {
        let policy =
            NamingPolicy::timestamp(DEFAULT_TIMED_FORMAT, DEFAULT_ALL_DAY_FORMAT, Tz::UTC).unwrap();
        let timed = entry("a", "2024-04-19T21:55:53Z", false);
        assert_eq!(resolve_output_name(&timed, &policy).as_str(), "2024-04-19 215553.md");
    }

    #[test]
    fn test_timestamp_naming_honours_timezone() {
        let policy = NamingPolicy::timestamp("%Y-%m-%d %H%M", "%Y-%m-%d", Tz::Europe__London)
            .unwrap();
        let timed = entry("a", "2024-04-19T21:55:53Z", false);
        assert_eq!(resolve_output_name(&timed, &policy).as_str(), "2024-04-19 2255.md");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let policy =
            NamingPolicy::timestamp(DEFAULT_TIMED_FORMAT, DEFAULT_ALL_DAY_FORMAT, Tz::UTC).unwrap();
        let e = entry("a", "2024-04-19T21:55:53Z", false);
        assert_eq!(
            resolve_output_name(&e, &policy),
            resolve_output_name(&e, &policy)
        );
    }

    #[test]
    fn test_rejects_illegal_characters() {
        let err = NamingPolicy::timestamp("%Y|%m", DEFAULT_ALL_DAY_FORMAT, Tz::UTC).unwrap_err();
        assert!(err.to_string().contains("cannot contain"));

        // %T renders as HH:MM:SS
        assert!(validate_name_format("%Y %T").is_err());
    }

    #[test]
    fn test_rejects_malformed_pattern() {
        assert!(validate_name_format("%Y-%Q").is_err());
        assert!(validate_name_format("  ").is_err());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("day-one-out//abc.md"), "day-one-out/abc.md");
        assert_eq!(normalize_path("/a\\b/"), "a/b");
        assert_eq!(normalize_path("2024\u{00A0}note.md"), "2024 note.md");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_output_name_stem() {
        assert_eq!(OutputName::new("abc123.md").stem(), "abc123");
        assert_eq!(OutputName::new("plain").stem(), "plain");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("day-one-out", "abc.md"), "day-one-out/abc.md");
        assert_eq!(join_path("", "abc.md"), "abc.md");
    }
}
