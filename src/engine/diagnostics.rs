//! Per-call scheduling statistics.

use serde::Serialize;

/// Maximum number of skipped identifiers sampled into the diagnostics.
pub const SKIPPED_SAMPLE_CAP: usize = 8;

/// Snapshot of one `schedule()` call's budget accounting.
///
/// Returned alongside the decisions; a fresh snapshot is produced per call,
/// never accumulated across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleDiagnostics {
    pub max_detailed_reads: usize,
    pub detailed_reads_used: usize,
    pub initial_ranked_candidates: usize,
    pub initial_unread_due_to_limit: usize,
    pub second_pass_used: bool,
    pub second_pass_ranked_candidates: usize,
    pub second_pass_unread_due_to_limit: usize,
    pub sample_skipped_skill_ids: Vec<String>,
}

impl ScheduleDiagnostics {
    #[must_use]
    pub fn new(max_detailed_reads: usize) -> Self {
        Self {
            max_detailed_reads,
            detailed_reads_used: 0,
            initial_ranked_candidates: 0,
            initial_unread_due_to_limit: 0,
            second_pass_used: false,
            second_pass_ranked_candidates: 0,
            second_pass_unread_due_to_limit: 0,
            sample_skipped_skill_ids: Vec::new(),
        }
    }

    /// Candidates left unread across both budgeted phases.
    #[must_use]
    pub fn skipped_due_to_limit_total(&self) -> usize {
        self.initial_unread_due_to_limit + self.second_pass_unread_due_to_limit
    }

    /// Whether the read-budget guardrail forced any candidate to stay unread.
    #[must_use]
    pub fn guardrail_triggered(&self) -> bool {
        self.skipped_due_to_limit_total() > 0
    }

    /// Sample a skipped identifier, deduplicated, capped at
    /// [`SKIPPED_SAMPLE_CAP`].
    pub(crate) fn record_skipped(&mut self, skill_id: &str) {
        if self.sample_skipped_skill_ids.len() >= SKIPPED_SAMPLE_CAP {
            return;
        }
        if self.sample_skipped_skill_ids.iter().any(|id| id == skill_id) {
            return;
        }
        self.sample_skipped_skill_ids.push(skill_id.to_string());
    }

    /// Full snapshot including the derived totals, for JSON output.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_detailed_reads": self.max_detailed_reads,
            "detailed_reads_used": self.detailed_reads_used,
            "initial_ranked_candidates": self.initial_ranked_candidates,
            "initial_unread_due_to_limit": self.initial_unread_due_to_limit,
            "second_pass_used": self.second_pass_used,
            "second_pass_ranked_candidates": self.second_pass_ranked_candidates,
            "second_pass_unread_due_to_limit": self.second_pass_unread_due_to_limit,
            "skipped_due_to_limit_total": self.skipped_due_to_limit_total(),
            "guardrail_triggered": self.guardrail_triggered(),
            "sample_skipped_skill_ids": self.sample_skipped_skill_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guardrail_follows_skip_counts() {
        let mut diagnostics = ScheduleDiagnostics::new(3);
        assert!(!diagnostics.guardrail_triggered());

        diagnostics.initial_unread_due_to_limit = 1;
        assert_eq!(diagnostics.skipped_due_to_limit_total(), 1);
        assert!(diagnostics.guardrail_triggered());

        diagnostics.second_pass_unread_due_to_limit = 2;
        assert_eq!(diagnostics.skipped_due_to_limit_total(), 3);
    }

    #[test]
    fn skipped_sample_is_deduped_and_capped() {
        let mut diagnostics = ScheduleDiagnostics::new(1);
        for i in 0..12 {
            diagnostics.record_skipped(&format!("skill-{i}"));
            diagnostics.record_skipped(&format!("skill-{i}"));
        }
        assert_eq!(diagnostics.sample_skipped_skill_ids.len(), SKIPPED_SAMPLE_CAP);
        assert_eq!(diagnostics.sample_skipped_skill_ids[0], "skill-0");
    }

    #[test]
    fn json_snapshot_carries_derived_fields() {
        let mut diagnostics = ScheduleDiagnostics::new(2);
        diagnostics.initial_unread_due_to_limit = 2;
        let json = diagnostics.to_json();
        assert_eq!(json["guardrail_triggered"], true);
        assert_eq!(json["skipped_due_to_limit_total"], 2);
    }
}
