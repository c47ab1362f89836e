//! Markdown report of entries that did not make it into the vault.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::naming::join_path;
use crate::result::ImportResult;
use crate::vault::{FileTimes, Vault};

const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which workflow produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Import,
    Update,
}

impl ReportKind {
    fn title(&self) -> &'static str {
        match self {
            Self::Import => "Failed Imports",
            Self::Update => "Failed Updates",
        }
    }
}

/// Report file name, e.g. `Failed Imports 1713563753000.md`.
pub fn report_file_name(kind: ReportKind, at: DateTime<Utc>) -> String {
    format!("{} {}.md", kind.title(), at.timestamp_millis())
}

/// One list item per invalid entry, then one per failure.
///
/// Returns `None` when there is nothing to report.
pub fn render_failure_report(result: &ImportResult) -> Option<String> {
    if !result.has_problems() {
        return None;
    }

    let mut items = Vec::new();
    for invalid in &result.invalid_entries {
        let created = invalid
            .creation_date
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|d| d.with_timezone(&Utc).format(REPORT_DATE_FORMAT).to_string())
                    .unwrap_or_else(|_| raw.to_string())
            })
            .unwrap_or_else(|| "unknown date".to_string());
        items.push(format!(
            "- {} - {}\n  - {}",
            invalid.entry_id.as_deref().unwrap_or("unknown entry"),
            created,
            invalid.reason()
        ));
    }
    for failure in &result.failures {
        items.push(format!(
            "- {} - {}\n  - {}",
            failure.entry_id,
            failure.creation_date.format(REPORT_DATE_FORMAT),
            failure.reason
        ));
    }

    Some(format!("{}\n", items.join("\n")))
}

/// Write the report into `out_directory`, returning its vault path.
pub fn write_failure_report(
    vault: &dyn Vault,
    out_directory: &str,
    result: &ImportResult,
    kind: ReportKind,
    at: DateTime<Utc>,
) -> Result<Option<String>> {
    let Some(content) = render_failure_report(result) else {
        return Ok(None);
    };
    let path = join_path(out_directory, &report_file_name(kind, at));
    let times = FileTimes {
        created: at,
        modified: at,
    };
    vault.create_file(&path, &content, times)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ImportFailure;
    use crate::schema::validate_entry;
    use crate::vault::FsVault;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::tempdir;

    fn result_with_problems() -> ImportResult {
        let invalid = validate_entry(&json!({
            "uuid": "BAD",
            "creationDate": "2024-04-19T21:55:53Z"
        }))
        .unwrap_err();
        let mut result = ImportResult::new(2, vec![invalid]);
        result.failures.push(ImportFailure {
            entry_id: "DUP".to_string(),
            creation_date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            output_name: None,
            reason: "A file named x.md has already been created in this import".to_string(),
        });
        result
    }

    #[test]
    fn test_nothing_to_report() {
        assert!(render_failure_report(&ImportResult::new(1, Vec::new())).is_none());
    }

    #[test]
    fn test_renders_invalid_then_failed() {
        let report = render_failure_report(&result_with_problems()).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "- BAD - 2024-04-19 21:55:53");
        assert_eq!(lines[1], "  - modifiedDate: Required");
        assert_eq!(lines[2], "- DUP - 2024-01-02 03:04:05");
        assert_eq!(
            lines[3],
            "  - A file named x.md has already been created in this import"
        );
    }

    #[test]
    fn test_report_file_name() {
        let at = Utc.timestamp_millis_opt(1_713_563_753_000).unwrap();
        assert_eq!(
            report_file_name(ReportKind::Update, at),
            "Failed Updates 1713563753000.md"
        );
    }

    #[test]
    fn test_write_failure_report() {
        let dir = tempdir().unwrap();
        let vault = FsVault::new(dir.path());
        let at = Utc.timestamp_millis_opt(1_000).unwrap();

        let path = write_failure_report(
            &vault,
            "day-one-out",
            &result_with_problems(),
            ReportKind::Import,
            at,
        )
        .unwrap()
        .unwrap();

        assert_eq!(path, "day-one-out/Failed Imports 1000.md");
        assert!(vault.read_text(&path).unwrap().starts_with("- BAD"));
    }
}
