//! Merge of config file settings and command-line overrides.

use dayport_core::ImportSettings;

use crate::cli::SourceArgs;
use crate::config::DayportConfig;

/// Settings for one run: the `[import]` table with flag overrides applied.
///
/// Boolean flags can only switch a setting on. The `[ui] timezone` value is
/// used for date-based names when `[import]` has none.
pub fn merge_settings(
    config: &DayportConfig,
    source: &SourceArgs,
    ignore_existing: bool,
) -> ImportSettings {
    let mut settings = config.import.clone();

    if let Some(dir) = &source.in_dir {
        settings.in_directory = dir.clone();
    }
    if let Some(file) = &source.file {
        settings.in_file_name = file.clone();
    }
    if let Some(dir) = &source.out_dir {
        settings.out_directory = dir.clone();
    }
    if let Some(format) = &source.date_format {
        settings.date_based_file_name_format = format.clone();
        settings.date_based_file_names = true;
    }
    if let Some(format) = &source.all_day_format {
        settings.date_based_all_day_file_name_format = format.clone();
        settings.date_based_file_names = true;
    }
    if let Some(case) = source.tag_case {
        settings.tag_case = case.into();
    }

    settings.date_based_file_names |= source.date_names;
    settings.enable_internal_links |= source.links;
    settings.separate_coordinate_fields |= source.separate_coordinates;
    settings.ignore_existing_files |= ignore_existing;

    settings.timezone = source
        .timezone
        .clone()
        .or(settings.timezone)
        .or_else(|| config.ui.timezone.clone());

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TagCaseArg;
    use dayport_core::TagCase;

    #[test]
    fn test_no_flags_keeps_config() {
        let mut config = DayportConfig::default();
        config.import.in_directory = "exports".to_string();
        config.import.enable_internal_links = true;

        let settings = merge_settings(&config, &SourceArgs::default(), false);

        assert_eq!(settings, config.import);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = DayportConfig::default();
        config.import.out_directory = "journal".to_string();

        let source = SourceArgs {
            in_dir: Some("inbox".to_string()),
            file: Some("Journal.json".to_string()),
            out_dir: Some("notes".to_string()),
            links: true,
            tag_case: Some(TagCaseArg::Snake),
            ..SourceArgs::default()
        };
        let settings = merge_settings(&config, &source, true);

        assert_eq!(settings.in_directory, "inbox");
        assert_eq!(settings.in_file_name, "Journal.json");
        assert_eq!(settings.out_directory, "notes");
        assert!(settings.enable_internal_links);
        assert!(settings.ignore_existing_files);
        assert_eq!(settings.tag_case, TagCase::Snake);
    }

    #[test]
    fn test_custom_format_implies_date_names() {
        let source = SourceArgs {
            date_format: Some("%Y%m%d-%H%M".to_string()),
            ..SourceArgs::default()
        };
        let settings = merge_settings(&DayportConfig::default(), &source, false);

        assert!(settings.date_based_file_names);
        assert_eq!(settings.date_based_file_name_format, "%Y%m%d-%H%M");
    }

    #[test]
    fn test_timezone_precedence() {
        let mut config = DayportConfig::default();
        config.ui.timezone = Some("Europe/London".to_string());

        let settings = merge_settings(&config, &SourceArgs::default(), false);
        assert_eq!(settings.timezone.as_deref(), Some("Europe/London"));

        config.import.timezone = Some("Asia/Tokyo".to_string());
        let settings = merge_settings(&config, &SourceArgs::default(), false);
        assert_eq!(settings.timezone.as_deref(), Some("Asia/Tokyo"));

        let source = SourceArgs {
            timezone: Some("America/Chicago".to_string()),
            ..SourceArgs::default()
        };
        let settings = merge_settings(&config, &source, false);
        assert_eq!(settings.timezone.as_deref(), Some("America/Chicago"));
    }
}
