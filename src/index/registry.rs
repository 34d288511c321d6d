//! In-memory skill registry with lazy, memoized detail loading.

use tracing::{debug, warn};

use crate::text::tokenize;

use super::descriptor::{DetailState, SkillDescriptor};
use super::parser::extract_triggers;

/// Ordered collection of indexed skills, keyed by identifier.
///
/// Iteration order is the (deterministic) indexing order: directories as
/// configured, files sorted by path within each. Identifiers are unique;
/// inserting a duplicate overwrites the earlier entry in place.
#[derive(Debug, Default)]
pub struct Registry {
    skills: Vec<SkillDescriptor>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor. Last-wins on identifier collision, with a
    /// warning so the shadowed file is visible in logs.
    pub fn insert(&mut self, skill: SkillDescriptor) {
        if let Some(existing) = self
            .skills
            .iter_mut()
            .find(|s| s.identifier == skill.identifier)
        {
            warn!(
                identifier = %skill.identifier,
                shadowed = %existing.path.display(),
                winner = %skill.path.display(),
                "duplicate skill identifier; later descriptor wins"
            );
            *existing = skill;
        } else {
            self.skills.push(skill);
        }
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&SkillDescriptor> {
        self.skills.iter().find(|s| s.identifier == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDescriptor> {
        self.skills.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Load a skill's trigger phrases from its full descriptor file.
    ///
    /// Returns `true` only when a real read happened now; memoized loads and
    /// soft-failures return `false` and must not charge the read budget.
    /// A failed read leaves the triggers empty and is never retried.
    pub fn load_details(&mut self, identifier: &str) -> bool {
        let Some(skill) = self
            .skills
            .iter_mut()
            .find(|s| s.identifier == identifier)
        else {
            return false;
        };
        if skill.detail_read_attempted() {
            return false;
        }

        let content = match std::fs::read_to_string(&skill.path) {
            Ok(content) => content,
            Err(err) => {
                debug!(
                    identifier = %skill.identifier,
                    path = %skill.path.display(),
                    error = %err,
                    "detail load failed; keeping empty triggers"
                );
                skill.detail_state = DetailState::DetailLoadFailed;
                return false;
            }
        };

        skill.triggers = extract_triggers(&content);
        skill.keywords.extend(tokenize(&skill.triggers.join(" ")));
        skill.detail_state = DetailState::DetailsLoaded;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use super::*;

    fn descriptor(identifier: &str, path: &str) -> SkillDescriptor {
        SkillDescriptor {
            identifier: identifier.to_string(),
            display_name: identifier.to_string(),
            description: String::new(),
            triggers: Vec::new(),
            path: PathBuf::from(path),
            source_directory: PathBuf::from("skills"),
            aliases: BTreeSet::from([identifier.to_string()]),
            keywords: BTreeSet::new(),
            detail_state: DetailState::Indexed,
        }
    }

    #[test]
    fn insert_overwrites_duplicate_identifier_in_place() {
        let mut registry = Registry::new();
        registry.insert(descriptor("planning", "a/SKILL.md"));
        registry.insert(descriptor("review", "b/SKILL.md"));
        registry.insert(descriptor("planning", "c/SKILL.md"));

        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["planning", "review"]);
        assert_eq!(
            registry.get("planning").map(|s| s.path.clone()),
            Some(PathBuf::from("c/SKILL.md"))
        );
    }

    #[test]
    fn load_details_soft_fails_on_unreadable_path() {
        let mut registry = Registry::new();
        registry.insert(descriptor("ghost", "/nonexistent/SKILL.md"));

        assert!(!registry.load_details("ghost"));
        assert_eq!(
            registry.get("ghost").map(|s| s.detail_state),
            Some(DetailState::DetailLoadFailed)
        );
        assert!(registry.get("ghost").is_some_and(|s| s.triggers.is_empty()));

        // Memoized: the failed read is never retried.
        assert!(!registry.load_details("ghost"));
    }

    #[test]
    fn load_details_unknown_identifier_is_a_no_op() {
        let mut registry = Registry::new();
        assert!(!registry.load_details("missing"));
    }
}
