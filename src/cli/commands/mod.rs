//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod index;
pub mod schedule;

use crate::app::AppContext;
use crate::cli::output::HumanLayout;
use crate::engine::{ScheduleDiagnostics, SkillScheduler};
use crate::error::Result;
use crate::index::LoadReport;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Index(args) => index::run(ctx, args),
        Commands::Schedule(args) => schedule::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the skill index and print the preload summary
    Index(index::IndexArgs),

    /// Route a task description to the most relevant skills
    Schedule(schedule::ScheduleArgs),
}

/// Preload summary lines shared by both subcommands.
pub(crate) fn preload_summary(
    layout: &mut HumanLayout,
    report: &LoadReport,
    scheduler: &SkillScheduler,
    diagnostics: Option<&ScheduleDiagnostics>,
) {
    layout
        .section("Skill preload summary")
        .bullet(&format!("total skills: {}", report.total_skills))
        .bullet(&format!("route hints: {}", report.route_hints))
        .bullet(&format!("max detailed reads: {}", scheduler.max_detailed_reads()));

    for (directory, count) in &report.scanned_directories {
        layout.bullet(&format!("{directory}: {count} skill file(s)"));
    }

    if !report.missing_directories.is_empty() {
        layout.bullet("missing directories:");
        for directory in &report.missing_directories {
            layout.push_line(format!("  - {directory}"));
        }
    }

    if let Some(diagnostics) = diagnostics {
        layout.bullet(&format!(
            "detailed reads used: {}/{}",
            diagnostics.detailed_reads_used, diagnostics.max_detailed_reads
        ));
    }
}
