use crate::app::AppContext;
use crate::cli::UpdateArgs;

use super::run::{run_workflow, Workflow};

/// Rewrite the front matter of notes created by an earlier import.
pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    run_workflow(ctx, Workflow::Update, &args.source, false)
}
