//! Four-phase ranking engine.
//!
//! Phase 1 scores every skill from index metadata alone. Phase 2 spends a
//! bounded number of full descriptor reads refining the top candidates with
//! trigger matches. Phase 3 is a trigger-only rescan used only when Phase 1
//! found nothing. Phase 4 is a fixed default list so ambiguous tasks still
//! get an answer.

mod decision;
mod diagnostics;
mod scheduler;

pub use decision::ScheduleDecision;
pub use diagnostics::{SKIPPED_SAMPLE_CAP, ScheduleDiagnostics};
pub use scheduler::{
    DEFAULT_MAX_DETAILED_READS, DEFAULT_TOP_N, ScheduleOutcome, SkillScheduler,
};
