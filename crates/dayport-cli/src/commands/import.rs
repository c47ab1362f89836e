use crate::app::AppContext;
use crate::cli::ImportArgs;

use super::run::{run_workflow, Workflow};

/// Create notes for every valid entry in the input folder.
pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    run_workflow(ctx, Workflow::Import, &args.source, args.ignore_existing)
}
