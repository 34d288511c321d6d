use std::path::PathBuf;

use serde::Serialize;

/// One ranked routing decision. Produced fresh per `schedule()` call and
/// never mutated after the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDecision {
    pub skill_id: String,
    pub display_name: String,
    pub path: PathBuf,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Sort key shared by every phase: score descending, identifier ascending.
pub(crate) fn sort_decisions(decisions: &mut [ScheduleDecision]) {
    decisions.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.skill_id.cmp(&b.skill_id)));
}
