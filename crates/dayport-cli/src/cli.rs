use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use dayport_core::{TagCase, VERSION};

/// Dayport - Convert a Day One JSON export into Markdown notes
#[derive(Parser)]
#[command(name = "dayport")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault root directory (overrides the config file)
    #[arg(long, global = true, env = "DAYPORT_VAULT", value_name = "DIR")]
    pub vault: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (pretty, plain)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log progress details to stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Options shared by `import` and `update`. Each one overrides the
/// matching `[import]` value from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Vault folder holding the export JSON files
    #[arg(long, value_name = "DIR")]
    pub in_dir: Option<String>,

    /// Read only this export file from the input folder
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,

    /// Vault folder receiving the notes
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<String>,

    /// Name notes after their creation time
    #[arg(long)]
    pub date_names: bool,

    /// strftime pattern for timed entries (implies --date-names)
    #[arg(long, value_name = "PATTERN")]
    pub date_format: Option<String>,

    /// strftime pattern for all-day entries (implies --date-names)
    #[arg(long, value_name = "PATTERN")]
    pub all_day_format: Option<String>,

    /// IANA time zone for date-based names (e.g. Europe/London)
    #[arg(long, value_name = "ZONE")]
    pub timezone: Option<String>,

    /// Rewrite links between entries into wiki links
    #[arg(long)]
    pub links: bool,

    /// Write latitude and longitude as separate header keys
    #[arg(long)]
    pub separate_coordinates: bool,

    /// Casing applied to tags
    #[arg(long, value_enum, value_name = "CASE")]
    pub tag_case: Option<TagCaseArg>,

    /// Write a Markdown report of failed entries into the output folder
    #[arg(long)]
    pub report: bool,
}

/// Arguments for the `import` command
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Count notes that already exist as ignored instead of failed
    #[arg(long)]
    pub ignore_existing: bool,
}

/// Arguments for the `update` command
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `config` command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a config file with default settings
    Init {
        /// Vault root to record in the config
        #[arg(value_name = "VAULT")]
        vault: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Show,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagCaseArg {
    Preserve,
    Lowercase,
    Kebab,
    Snake,
}

impl From<TagCaseArg> for TagCase {
    fn from(value: TagCaseArg) -> Self {
        match value {
            TagCaseArg::Preserve => TagCase::Preserve,
            TagCaseArg::Lowercase => TagCase::Lowercase,
            TagCaseArg::Kebab => TagCase::Kebab,
            TagCaseArg::Snake => TagCase::Snake,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create notes from the export files in the input folder
    Import(ImportArgs),

    /// Refresh the YAML header of previously imported notes
    Update(UpdateArgs),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_flags_parse() {
        let cli = Cli::try_parse_from([
            "dayport",
            "import",
            "--vault",
            "/tmp/vault",
            "--in-dir",
            "exports",
            "--date-names",
            "--links",
            "--ignore-existing",
            "--tag-case",
            "kebab",
        ])
        .expect("parse import");

        assert_eq!(cli.vault.as_deref(), Some("/tmp/vault"));
        match cli.command {
            Some(Commands::Import(args)) => {
                assert_eq!(args.source.in_dir.as_deref(), Some("exports"));
                assert!(args.source.date_names);
                assert!(args.source.links);
                assert!(args.ignore_existing);
                assert_eq!(args.source.tag_case, Some(TagCaseArg::Kebab));
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_update_rejects_ignore_existing() {
        let result = Cli::try_parse_from(["dayport", "update", "--ignore-existing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["dayport", "-vv", "config", "show"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }
}
