use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;

use super::preload_summary;

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Override the per-schedule read budget reported in the summary
    #[arg(long)]
    pub max_skill_reads: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &IndexArgs) -> Result<()> {
    let mut scheduler = ctx.scheduler(args.max_skill_reads);
    let report = scheduler.load();

    if ctx.json_output() {
        return emit_json(&serde_json::json!({
            "load_report": report,
            "config": { "max_skill_reads": scheduler.max_detailed_reads() },
        }));
    }

    let mut layout = HumanLayout::new();
    preload_summary(&mut layout, &report, &scheduler, None);
    emit_human(layout);
    Ok(())
}
