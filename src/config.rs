//! Typed configuration.
//!
//! Loaded from `skr.toml` (project root or `--config`/`SKR_CONFIG`). The
//! key set is a strict allow-list: unknown keys fail the load eagerly
//! instead of being silently ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_MAX_DETAILED_READS, DEFAULT_TOP_N};
use crate::error::{Result, SkrError};
use crate::index::EmptyIdentifierPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Ordered skill search roots, relative to the project root.
    #[serde(default = "default_skill_directories")]
    pub skill_directories: Vec<PathBuf>,

    /// Ordered rules documents, relative to the project root.
    #[serde(default = "default_rule_files")]
    pub rule_files: Vec<PathBuf>,

    /// Full descriptor reads allowed per schedule call (min 1).
    #[serde(default = "default_max_detailed_reads")]
    pub max_detailed_reads: usize,

    /// Result cap for schedule calls.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// How to index descriptors whose frontmatter yields no identifier.
    #[serde(default)]
    pub empty_identifier_policy: EmptyIdentifierPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            skill_directories: default_skill_directories(),
            rule_files: default_rule_files(),
            max_detailed_reads: default_max_detailed_reads(),
            top_n: default_top_n(),
            empty_identifier_policy: EmptyIdentifierPolicy::default(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or `<root>/skr.toml` when present,
    /// falling back to defaults. An explicit path that does not exist is an
    /// error; the conventional path is optional.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(SkrError::MissingConfig(path.display().to_string()));
            }
            return Self::load_file(path);
        }

        let conventional = root.join("skr.toml");
        if conventional.exists() {
            return Self::load_file(&conventional);
        }
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkrError::Config(format!("read config {}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| SkrError::Config(format!("parse config {}: {err}", path.display())))
    }
}

impl SchedulerConfig {
    /// Resolve the configured relative paths against a project root.
    #[must_use]
    pub fn resolved_against(&self, root: &Path) -> Self {
        let mut resolved = self.clone();
        resolved.skill_directories = self
            .skill_directories
            .iter()
            .map(|dir| root.join(dir))
            .collect();
        resolved.rule_files = self.rule_files.iter().map(|file| root.join(file)).collect();
        resolved
    }
}

fn default_skill_directories() -> Vec<PathBuf> {
    vec![PathBuf::from("skills"), PathBuf::from("my-agent-skills")]
}

fn default_rule_files() -> Vec<PathBuf> {
    vec![PathBuf::from("my-agent-skills").join("global-rules.md")]
}

fn default_max_detailed_reads() -> usize {
    DEFAULT_MAX_DETAILED_READS
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_convention() {
        let config = Config::default();
        assert_eq!(
            config.scheduler.skill_directories,
            vec![PathBuf::from("skills"), PathBuf::from("my-agent-skills")]
        );
        assert_eq!(config.scheduler.max_detailed_reads, 3);
        assert_eq!(config.scheduler.top_n, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<Config>("[scheduler]\nmax_detailed_reads = 2\nbogus = true\n");
        assert!(err.is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config =
            toml::from_str("[scheduler]\nmax_detailed_reads = 7\n").expect("parse");
        assert_eq!(config.scheduler.max_detailed_reads, 7);
        assert_eq!(config.scheduler.top_n, 5);
        assert!(!config.scheduler.skill_directories.is_empty());
    }

    #[test]
    fn policy_parses_kebab_case() {
        let config: Config =
            toml::from_str("[scheduler]\nempty_identifier_policy = \"skip\"\n").expect("parse");
        assert_eq!(
            config.scheduler.empty_identifier_policy,
            EmptyIdentifierPolicy::Skip
        );
    }

    #[test]
    fn resolved_paths_are_rooted() {
        let config = SchedulerConfig::default().resolved_against(Path::new("/repo"));
        assert_eq!(config.skill_directories[0], PathBuf::from("/repo/skills"));
        assert_eq!(
            config.rule_files[0],
            PathBuf::from("/repo/my-agent-skills/global-rules.md")
        );
    }
}
