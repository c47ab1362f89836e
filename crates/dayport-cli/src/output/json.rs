//! JSON output for import and update runs.

use dayport_core::{ImportResult, ImportSettings};

/// Convert a finished run to JSON for output.
///
/// `report` is the vault path of the failure report, when one was written.
pub fn run_json(
    command: &str,
    vault: &str,
    settings: &ImportSettings,
    result: &ImportResult,
    report: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "command": command,
        "vault": vault,
        "in_directory": settings.in_directory,
        "out_directory": settings.out_directory,
        "total": result.total,
        "success_count": result.success_count,
        "ignore_count": result.ignore_count,
        "failure_count": result.failure_count(),
        "invalid_count": result.invalid_entries.len(),
        "failures": result.failures,
        "invalid_entries": result.invalid_entries,
        "report": report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dayport_core::ImportFailure;

    #[test]
    fn test_run_json_shape() {
        let mut result = ImportResult::new(3, Vec::new());
        result.success_count = 2;
        result.failures.push(ImportFailure {
            entry_id: "ABC".to_string(),
            creation_date: Utc.with_ymd_and_hms(2024, 4, 19, 21, 55, 0).unwrap(),
            output_name: None,
            reason: "boom".to_string(),
        });

        let value = run_json(
            "import",
            "/vault",
            &ImportSettings::default(),
            &result,
            Some("day-one-out/Failed Imports 1.md"),
        );

        assert_eq!(value["command"], "import");
        assert_eq!(value["total"], 3);
        assert_eq!(value["success_count"], 2);
        assert_eq!(value["failure_count"], 1);
        assert_eq!(value["invalid_count"], 0);
        assert_eq!(value["failures"][0]["entry_id"], "ABC");
        assert_eq!(value["failures"][0]["reason"], "boom");
        assert_eq!(value["out_directory"], "day-one-out");
        assert_eq!(value["report"], "day-one-out/Failed Imports 1.md");
    }
}
