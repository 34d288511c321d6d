use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::engine::ScheduleOutcome;
use crate::error::Result;

use super::preload_summary;

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Task description to route
    #[arg(long)]
    pub task: String,

    /// Maximum number of skill suggestions to return
    #[arg(long)]
    pub top: Option<usize>,

    /// Full descriptor reads allowed for this call (context guardrail)
    #[arg(long)]
    pub max_skill_reads: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &ScheduleArgs) -> Result<()> {
    let mut scheduler = ctx.scheduler(args.max_skill_reads);
    let report = scheduler.load();
    let top_n = args.top.unwrap_or(ctx.config.scheduler.top_n).max(1);

    let outcome = scheduler.schedule(&args.task, top_n);

    if ctx.json_output() {
        return emit_json(&serde_json::json!({
            "load_report": report,
            "config": { "max_skill_reads": scheduler.max_detailed_reads() },
            "task": args.task,
            "decisions": outcome.decisions,
            "schedule_diagnostics": outcome.diagnostics.to_json(),
        }));
    }

    let mut layout = HumanLayout::new();
    preload_summary(&mut layout, &report, &scheduler, Some(&outcome.diagnostics));
    render_decisions(&mut layout, &outcome);
    render_warnings(&mut layout, &outcome);
    emit_human(layout);
    Ok(())
}

fn render_decisions(layout: &mut HumanLayout, outcome: &ScheduleOutcome) {
    if outcome.decisions.is_empty() {
        return;
    }

    layout.blank().section("Scheduled skills");
    for (index, decision) in outcome.decisions.iter().enumerate() {
        let reason_text = if decision.reasons.is_empty() {
            "no reason".to_string()
        } else {
            decision.reasons.join("; ")
        };
        layout.push_line(format!(
            "{}. {} (score={}) [{}]",
            index + 1,
            decision.skill_id,
            decision.score,
            decision.path.display()
        ));
        layout.push_line(format!("   reason: {reason_text}"));
    }
}

fn render_warnings(layout: &mut HumanLayout, outcome: &ScheduleOutcome) {
    let diagnostics = &outcome.diagnostics;
    if !diagnostics.guardrail_triggered() {
        return;
    }

    layout.blank().section("Warnings");
    layout.bullet(&format!(
        "context guardrail triggered: skipped/deferred {} candidate(s) due to max detailed read limit",
        diagnostics.skipped_due_to_limit_total()
    ));
    layout.bullet(&format!(
        "phase summary: ranked={}, initial_skipped={}, second_pass_skipped={}",
        diagnostics.initial_ranked_candidates,
        diagnostics.initial_unread_due_to_limit,
        diagnostics.second_pass_unread_due_to_limit
    ));
    if !diagnostics.sample_skipped_skill_ids.is_empty() {
        layout.bullet(&format!(
            "sample skipped skills: {}",
            diagnostics.sample_skipped_skill_ids.join(", ")
        ));
    }
}
