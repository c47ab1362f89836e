//! Shared driver for the `import` and `update` commands.

use std::time::Instant;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dayport_core::report::{write_failure_report, ReportKind};
use dayport_core::{
    import_entries, update_front_matter, FileIdentityMapStore, FsVault, IdentityMapStore,
    ImportResult, ImportSettings, NoProgress, ProgressSink,
};
use tracing::debug;

use crate::app::{merge_settings, AppContext};
use crate::cli::SourceArgs;
use crate::errors::CliError;
use crate::output::run_json;
use crate::ui::format::{format_datetime, format_duration_secs};
use crate::ui::{
    blank_line, header, hint, print, receipt, table, Badge, Column, OutputMode, ProgressBar,
    UiContext,
};

/// Which workflow a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Import,
    Update,
}

impl Workflow {
    fn command(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Update => "update",
        }
    }

    fn progress_message(&self) -> &'static str {
        match self {
            Self::Import => "Importing entries",
            Self::Update => "Updating front matter",
        }
    }

    fn success_label(&self) -> &'static str {
        match self {
            Self::Import => "Created",
            Self::Update => "Updated",
        }
    }

    fn report_kind(&self) -> ReportKind {
        match self {
            Self::Import => ReportKind::Import,
            Self::Update => ReportKind::Update,
        }
    }

    fn execute(
        &self,
        vault: &FsVault,
        settings: &ImportSettings,
        progress: &mut dyn ProgressSink,
        store: &FileIdentityMapStore,
    ) -> dayport_core::Result<ImportResult> {
        let store: &dyn IdentityMapStore = store;
        match self {
            Self::Import => import_entries(vault, settings, progress, Some(store)),
            Self::Update => update_front_matter(vault, settings, progress, Some(store)),
        }
    }
}

pub fn run_workflow(
    ctx: &AppContext,
    workflow: Workflow,
    source: &SourceArgs,
    ignore_existing: bool,
) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let settings = merge_settings(ctx.config()?, source, ignore_existing);

    // Reject bad patterns and zones before anything touches the vault.
    let time_zone = settings.time_zone()?;
    settings.naming_policy()?;

    let vault_path = ctx.vault_path()?;
    let vault_display = vault_path.to_string_lossy().to_string();
    let vault = FsVault::new(&vault_path);
    let store = FileIdentityMapStore::new(&vault_path);
    debug!(vault = %vault_display, ?settings, "starting {}", workflow.command());

    if !ctx.quiet() {
        print(&ui, &header(&ui, workflow.command(), Some(&vault_display)));
    }

    let started = Instant::now();
    let result = if ctx.quiet() {
        workflow.execute(&vault, &settings, &mut NoProgress, &store)?
    } else {
        let mut bar = ProgressBar::new(&ui, workflow.progress_message());
        let result = workflow.execute(&vault, &settings, &mut bar, &store);
        bar.finish();
        result?
    };
    let elapsed = started.elapsed().as_secs_f64();

    let report = if source.report {
        write_failure_report(
            &vault,
            &settings.out_directory,
            &result,
            workflow.report_kind(),
            Utc::now(),
        )?
    } else {
        None
    };

    if ui.mode.is_json() {
        let value = run_json(
            workflow.command(),
            &vault_display,
            &settings,
            &result,
            report.as_deref(),
        );
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if !ctx.quiet() {
        print_summary(&ui, workflow, &result, report.as_deref(), time_zone, elapsed);
    }

    if result.has_problems() {
        return Err(CliError::PartialFailure {
            failed: result.failure_count(),
            invalid: result.invalid_entries.len(),
        }
        .into());
    }
    Ok(())
}

fn print_summary(
    ui: &UiContext,
    workflow: Workflow,
    result: &ImportResult,
    report: Option<&str>,
    time_zone: Tz,
    elapsed: f64,
) {
    let (kind, title) = if result.has_problems() {
        (Badge::Warn, format!("{} finished with problems", capitalize(workflow.command())))
    } else {
        (Badge::Ok, format!("{} finished", capitalize(workflow.command())))
    };

    let mut items = vec![
        ("Entries", result.total.to_string()),
        (workflow.success_label(), result.success_count.to_string()),
    ];
    if workflow == Workflow::Import {
        items.push(("Ignored", result.ignore_count.to_string()));
    }
    items.push(("Failed", result.failure_count().to_string()));
    items.push(("Invalid", result.invalid_entries.len().to_string()));
    if let Some(path) = report {
        items.push(("Report", path.to_string()));
    }
    if ui.mode == OutputMode::Pretty {
        items.push(("Elapsed", format_duration_secs(elapsed)));
    }

    print(ui, &receipt(ui, kind, &title, &items));

    if !result.has_problems() {
        return;
    }

    blank_line(ui);
    print(ui, &table(ui, &FAILURE_COLUMNS, &failure_rows(ui, result, time_zone)));
    if report.is_none() {
        blank_line(ui);
        print(
            ui,
            &hint(ui, "Pass --report to write these entries to a Markdown file."),
        );
    }
}

const FAILURE_COLUMNS: [Column; 3] = [
    Column::new("Entry"),
    Column::new("Created"),
    Column::new("Reason"),
];

/// One row per invalid entry, then one per failure.
fn failure_rows(ui: &UiContext, result: &ImportResult, time_zone: Tz) -> Vec<Vec<String>> {
    let pretty = ui.mode.is_pretty();
    let invalid = result.invalid_entries.iter().map(|entry| {
        vec![
            entry.entry_id.clone().unwrap_or_else(|| "-".to_string()),
            entry
                .creation_date
                .as_deref()
                .map(|raw| format_raw_date(raw, time_zone, pretty))
                .unwrap_or_else(|| "-".to_string()),
            entry.reason(),
        ]
    });
    let failed = result.failures.iter().map(|failure| {
        vec![
            failure.entry_id.clone(),
            format_datetime(&failure.creation_date, time_zone, pretty),
            failure.reason.clone(),
        ]
    });
    invalid.chain(failed).collect()
}

/// Invalid entries keep their date as exported; show it like the others when it parses.
fn format_raw_date(raw: &str, time_zone: Tz, pretty: bool) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => format_datetime(&date.with_timezone(&Utc), time_zone, pretty),
        Err(_) => raw.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
