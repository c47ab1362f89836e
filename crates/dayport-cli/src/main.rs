//! Dayport CLI - Convert a Day One JSON export into Markdown notes
//!
//! This is the command-line interface for Dayport. It resolves the vault and
//! settings, runs the core workflows and reports the outcome.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::commands::{config as config_cmd, import, misc, update};
use crate::errors::{exit_code_for, CliError};
use crate::ui::{print_error, OutputMode};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        // Get UI context for error formatting
        let ui_ctx = ctx.ui_context();

        // Extract hint from error chain if available
        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins
/// over the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "warn,dayport_core=debug,dayport=debug",
        (false, _) => "debug,dayport_core=trace,dayport=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Split an error message into its first part and a hint, if it carries one
/// or matches a common failure.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            let hint = error[idx + marker.len()..].trim();
            return (&error[..idx], Some(hint.to_string()));
        }
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("input directory does not exist") {
        return (
            error,
            Some("Create the folder inside the vault or pass --in-dir <DIR>.".to_string()),
        );
    }

    if error_lower.contains("does not exist in the input directory") {
        return (
            error,
            Some("Omit --file to read every .json file in the input folder.".to_string()),
        );
    }

    if error_lower.contains("unknown time zone") {
        return (
            error,
            Some("Use an IANA name such as Europe/London or America/New_York.".to_string()),
        );
    }

    if error_lower.contains("entries failed") {
        return (
            error,
            Some("Pass --report to write the failed entries to a Markdown file.".to_string()),
        );
    }

    (error, None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    if let Err(message) = OutputMode::validate_format(cli.format.as_deref()) {
        return Err(CliError::invalid_input(message).into());
    }

    match &cli.command {
        Some(Commands::Import(args)) => {
            import::handle_import(ctx, args)?;
        }
        Some(Commands::Update(args)) => {
            update::handle_update(ctx, args)?;
        }
        Some(Commands::Config(args)) => match &args.command {
            ConfigSubcommand::Init { vault, force } => {
                config_cmd::handle_init(ctx, vault.as_deref(), *force)?;
            }
            ConfigSubcommand::Show => {
                config_cmd::handle_show(ctx)?;
            }
        },
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
