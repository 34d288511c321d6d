//! The budgeted skill scheduler.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use crate::config::SchedulerConfig;
use crate::hints::{RouteHint, load_route_hints};
use crate::index::{
    EmptyIdentifierPolicy, LoadReport, Registry, SkillDescriptor, load_registry,
};
use crate::text::{normalize_phrase, tokenize};

use super::decision::{ScheduleDecision, sort_decisions};
use super::diagnostics::{SKIPPED_SAMPLE_CAP, ScheduleDiagnostics};

pub const DEFAULT_MAX_DETAILED_READS: usize = 3;
pub const DEFAULT_TOP_N: usize = 5;

const ALIAS_HIT_SCORE: u32 = 80;
const KEYWORD_OVERLAP_UNIT: u32 = 4;
const KEYWORD_OVERLAP_CAP: u32 = 40;
const ROUTE_HINT_SCORE: u32 = 35;
const TRIGGER_HIT_UNIT: u32 = 25;
const TRIGGER_HIT_CAP: u32 = 75;
const SECOND_PASS_ALIAS_UNIT: u32 = 20;
const SECOND_PASS_KEYWORD_UNIT: u32 = 5;
const FALLBACK_SCORE: u32 = 1;
const FALLBACK_REASON: &str = "fallback default for ambiguous task";

/// Default intent identifiers probed when nothing matched at all.
const FALLBACK_DEFAULTS: &[&str] =
    &["planning-implementation", "planning", "managing-environment"];

/// Decisions plus the diagnostics snapshot for the same call.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub decisions: Vec<ScheduleDecision>,
    pub diagnostics: ScheduleDiagnostics,
}

/// Routes task text to skill descriptors under a bounded read budget.
///
/// One instance per execution context: `load` and `schedule` take `&mut
/// self` because detail loading memoizes into the registry. There are no
/// internal locks.
#[derive(Debug)]
pub struct SkillScheduler {
    skill_directories: Vec<PathBuf>,
    rule_files: Vec<PathBuf>,
    max_detailed_reads: usize,
    empty_identifier_policy: EmptyIdentifierPolicy,
    registry: Registry,
    route_hints: Vec<RouteHint>,
    loaded: bool,
}

impl SkillScheduler {
    #[must_use]
    pub fn new(
        skill_directories: Vec<PathBuf>,
        rule_files: Vec<PathBuf>,
        max_detailed_reads: usize,
    ) -> Self {
        Self {
            skill_directories,
            rule_files,
            max_detailed_reads: max_detailed_reads.max(1),
            empty_identifier_policy: EmptyIdentifierPolicy::default(),
            registry: Registry::new(),
            route_hints: Vec::new(),
            loaded: false,
        }
    }

    /// Build a scheduler from a resolved [`SchedulerConfig`]; paths must
    /// already be absolute or relative to the intended working directory.
    #[must_use]
    pub fn from_config(config: &SchedulerConfig) -> Self {
        let mut scheduler = Self::new(
            config.skill_directories.clone(),
            config.rule_files.clone(),
            config.max_detailed_reads,
        );
        scheduler.empty_identifier_policy = config.empty_identifier_policy;
        scheduler
    }

    /// The read budget per `schedule()` call, already clamped to at least 1.
    #[must_use]
    pub fn max_detailed_reads(&self) -> usize {
        self.max_detailed_reads
    }

    /// Identifier lookup for templating collaborators; no ranking involved.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Rebuild the registry and route hints from the filesystem.
    ///
    /// Cheap and metadata-only: descriptor bodies and triggers are not read
    /// here. Replaces any previously loaded state wholesale.
    pub fn load(&mut self) -> LoadReport {
        let (registry, mut report) =
            load_registry(&self.skill_directories, self.empty_identifier_policy);
        self.registry = registry;

        self.route_hints.clear();
        for rule_file in &self.rule_files {
            self.route_hints.extend(load_route_hints(rule_file));
        }
        report.route_hints = self.route_hints.len();

        self.loaded = true;
        debug!(
            skills = report.total_skills,
            hints = report.route_hints,
            "skill index loaded"
        );
        report
    }

    /// Rank skills for a task description.
    ///
    /// A blank task short-circuits to no decisions with fresh diagnostics.
    /// The engine loads itself on first use if `load` was never called.
    pub fn schedule(&mut self, task_text: &str, top_n: usize) -> ScheduleOutcome {
        if !self.loaded {
            self.load();
        }

        let mut diagnostics = ScheduleDiagnostics::new(self.max_detailed_reads);
        if task_text.trim().is_empty() {
            return ScheduleOutcome {
                decisions: Vec::new(),
                diagnostics,
            };
        }

        let query = task_text.to_lowercase();
        let normalized_query = normalize_phrase(task_text);
        let query_tokens = tokenize(task_text);

        // Phase 1: cheap metadata scoring over the whole registry.
        let mut preliminary = self.rank_initial_candidates(&query, &query_tokens);
        sort_decisions(&mut preliminary);
        diagnostics.initial_ranked_candidates = preliminary.len();

        // Phase 2: budgeted trigger refinement of the Phase 1 order.
        let mut read_budget = self.max_detailed_reads;
        let mut decisions = Vec::with_capacity(preliminary.len());
        for mut candidate in preliminary {
            if read_budget > 0 {
                if self.registry.load_details(&candidate.skill_id) {
                    read_budget -= 1;
                    diagnostics.detailed_reads_used += 1;
                }
                if let Some(skill) = self.registry.get(&candidate.skill_id) {
                    let hits = trigger_hits(skill, &normalized_query);
                    if let Some(first) = hits.first() {
                        candidate.score += trigger_score(hits.len());
                        candidate.reasons.push(format!("trigger match: {first}"));
                    }
                }
            } else if let Some(skill) = self.registry.get(&candidate.skill_id) {
                if !skill.detail_read_attempted() {
                    diagnostics.initial_unread_due_to_limit += 1;
                    diagnostics.record_skipped(&candidate.skill_id);
                }
            }
            decisions.push(candidate);
        }

        sort_decisions(&mut decisions);
        if !decisions.is_empty() {
            decisions.truncate(top_n);
            return ScheduleOutcome {
                decisions,
                diagnostics,
            };
        }

        // Phase 3: trigger-only rescan, only when no metadata matched.
        diagnostics.second_pass_used = true;
        let second_pass = self.trigger_only_second_pass(
            &normalized_query,
            &query_tokens,
            top_n,
            read_budget,
            &mut diagnostics,
        );
        if !second_pass.is_empty() {
            return ScheduleOutcome {
                decisions: second_pass,
                diagnostics,
            };
        }

        // Phase 4: fixed defaults for fully ambiguous tasks.
        ScheduleOutcome {
            decisions: self.fallback_decisions(top_n),
            diagnostics,
        }
    }

    fn rank_initial_candidates(
        &self,
        query: &str,
        query_tokens: &BTreeSet<String>,
    ) -> Vec<ScheduleDecision> {
        let mut preliminary = Vec::new();

        for skill in self.registry.iter() {
            let mut score = 0u32;
            let mut reasons = Vec::new();

            // Alias sets are sorted, so the first hit is the smallest.
            let alias_hit = skill
                .aliases
                .iter()
                .find(|alias| alias.chars().count() >= 3 && query.contains(alias.as_str()));
            if let Some(alias) = alias_hit {
                score += ALIAS_HIT_SCORE;
                reasons.push(format!("task mentions `{alias}`"));
            }

            let overlap: Vec<&String> = query_tokens.intersection(&skill.keywords).collect();
            if !overlap.is_empty() {
                score += KEYWORD_OVERLAP_CAP.min(overlap.len() as u32 * KEYWORD_OVERLAP_UNIT);
                let shown: Vec<&str> = overlap.iter().take(4).map(|t| t.as_str()).collect();
                reasons.push(format!("keyword overlap: {}", shown.join(", ")));
            }

            for hint in &self.route_hints {
                if query_tokens.is_disjoint(&hint.keywords) {
                    continue;
                }
                if hint.skill_refs.iter().any(|r| ref_matches_skill(r, skill)) {
                    score += ROUTE_HINT_SCORE;
                    reasons.push(format!("global rule: {}", hint.label));
                    break;
                }
            }

            if score > 0 {
                preliminary.push(decision_for(skill, score, reasons));
            }
        }

        preliminary
    }

    fn trigger_only_second_pass(
        &mut self,
        normalized_query: &str,
        query_tokens: &BTreeSet<String>,
        top_n: usize,
        mut read_budget: usize,
        diagnostics: &mut ScheduleDiagnostics,
    ) -> Vec<ScheduleDecision> {
        if normalized_query.is_empty() || read_budget == 0 {
            return Vec::new();
        }

        // Rank everything by uncapped alias/keyword affinity; this order
        // decides who gets the remaining reads.
        let mut ranked: Vec<(u32, String)> = self
            .registry
            .iter()
            .map(|skill| {
                let alias_hits = skill
                    .aliases
                    .iter()
                    .filter(|alias| {
                        alias.chars().count() >= 2 && normalized_query.contains(alias.as_str())
                    })
                    .count() as u32;
                let overlap = query_tokens.intersection(&skill.keywords).count() as u32;
                let score =
                    alias_hits * SECOND_PASS_ALIAS_UNIT + overlap * SECOND_PASS_KEYWORD_UNIT;
                (score, skill.identifier.clone())
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        diagnostics.second_pass_ranked_candidates = ranked.len();

        let order: Vec<String> = ranked.into_iter().map(|(_, id)| id).collect();
        let mut decisions = Vec::new();

        for skill_id in &order {
            if read_budget == 0 {
                let unread: Vec<&String> = order
                    .iter()
                    .filter(|id| {
                        self.registry
                            .get(id)
                            .is_some_and(|skill| !skill.detail_read_attempted())
                    })
                    .collect();
                diagnostics.second_pass_unread_due_to_limit = unread.len();
                for id in unread.into_iter().take(SKIPPED_SAMPLE_CAP) {
                    diagnostics.record_skipped(id);
                }
                break;
            }

            if self.registry.load_details(skill_id) {
                read_budget -= 1;
                diagnostics.detailed_reads_used += 1;
            }
            let Some(skill) = self.registry.get(skill_id) else {
                continue;
            };

            // Unlike Phase 2, candidates without a trigger hit are dropped.
            let hits = trigger_hits(skill, normalized_query);
            let Some(first) = hits.first() else {
                continue;
            };
            decisions.push(decision_for(
                skill,
                trigger_score(hits.len()),
                vec![format!("trigger match (second pass): {first}")],
            ));
        }

        sort_decisions(&mut decisions);
        decisions.truncate(top_n);
        decisions
    }

    fn fallback_decisions(&self, top_n: usize) -> Vec<ScheduleDecision> {
        let mut selected: BTreeSet<&str> = BTreeSet::new();
        let mut fallback = Vec::new();

        for default in FALLBACK_DEFAULTS {
            let candidate = self.registry.iter().find(|skill| {
                skill.aliases.contains(*default) && !selected.contains(skill.identifier.as_str())
            });
            if let Some(skill) = candidate {
                selected.insert(skill.identifier.as_str());
                fallback.push(decision_for(
                    skill,
                    FALLBACK_SCORE,
                    vec![FALLBACK_REASON.to_string()],
                ));
            }
        }

        fallback.truncate(top_n);
        fallback
    }
}

fn decision_for(skill: &SkillDescriptor, score: u32, reasons: Vec<String>) -> ScheduleDecision {
    ScheduleDecision {
        skill_id: skill.identifier.clone(),
        display_name: skill.display_name.clone(),
        path: skill.path.clone(),
        score,
        reasons,
    }
}

/// Raw trigger phrases whose normalized form (min length 2) appears in the
/// normalized query.
fn trigger_hits<'a>(skill: &'a SkillDescriptor, normalized_query: &str) -> Vec<&'a str> {
    skill
        .triggers
        .iter()
        .filter(|trigger| {
            let normalized = normalize_phrase(trigger);
            normalized.chars().count() >= 2 && normalized_query.contains(&normalized)
        })
        .map(String::as_str)
        .collect()
}

fn trigger_score(hits: usize) -> u32 {
    TRIGGER_HIT_CAP.min(hits as u32 * TRIGGER_HIT_UNIT)
}

/// Whether a raw hint reference designates this skill: identifier equality,
/// exact alias membership, or substring containment either way against any
/// alias.
fn ref_matches_skill(reference: &str, skill: &SkillDescriptor) -> bool {
    let normalized = normalize_phrase(reference);
    if normalized.is_empty() {
        return false;
    }
    if skill.aliases.contains(&normalized) {
        return true;
    }
    if skill
        .aliases
        .iter()
        .any(|alias| alias.contains(&normalized) || normalized.contains(alias.as_str()))
    {
        return true;
    }
    normalized == skill.identifier
}
