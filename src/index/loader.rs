//! Descriptor discovery and metadata-only indexing.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::text::{normalize_identifier, normalize_phrase, tokenize};

use super::descriptor::{DetailState, SkillDescriptor};
use super::parser::{parse_frontmatter, read_head};
use super::registry::Registry;

/// Canonical descriptor file name, matched case-insensitively.
pub const DESCRIPTOR_FILE_NAME: &str = "SKILL.md";

/// Characters read from the head of a descriptor at index time.
pub const INDEX_READ_CAP: usize = 10_000;

/// What to do when frontmatter yields no usable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyIdentifierPolicy {
    /// Index under a slug of the parent directory name.
    #[default]
    FallbackToDirName,
    /// Leave the file out of the registry.
    Skip,
}

/// Snapshot of one `load()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub total_skills: usize,
    pub scanned_directories: BTreeMap<String, usize>,
    pub missing_directories: Vec<String>,
    pub route_hints: usize,
}

/// Discover and index every descriptor under the configured directories.
///
/// Missing directories are recorded, not fatal. Files are visited in sorted
/// path order within each directory, so repeated loads on an unchanged
/// filesystem produce identical registries. Triggers are not read here.
#[must_use]
pub fn load_registry(
    directories: &[PathBuf],
    policy: EmptyIdentifierPolicy,
) -> (Registry, LoadReport) {
    let mut registry = Registry::new();
    let mut scanned_directories = BTreeMap::new();
    let mut missing_directories = Vec::new();

    for directory in directories {
        let key = directory.display().to_string();
        if !directory.exists() {
            missing_directories.push(key.clone());
            scanned_directories.insert(key, 0);
            continue;
        }

        let mut files: Vec<PathBuf> = WalkDir::new(directory)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| name.eq_ignore_ascii_case(DESCRIPTOR_FILE_NAME))
            })
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();
        scanned_directories.insert(key, files.len());

        for file in files {
            if let Some(skill) = parse_skill_index(&file, directory, policy) {
                registry.insert(skill);
            }
        }
    }

    let report = LoadReport {
        total_skills: registry.len(),
        scanned_directories,
        missing_directories,
        route_hints: 0,
    };
    (registry, report)
}

/// Index a single descriptor file from its bounded frontmatter prefix.
///
/// Unreadable files and files that yield no identifier under the configured
/// policy are skipped silently.
fn parse_skill_index(
    skill_file: &Path,
    source_directory: &Path,
    policy: EmptyIdentifierPolicy,
) -> Option<SkillDescriptor> {
    let head = match read_head(skill_file, INDEX_READ_CAP) {
        Ok(head) => head,
        Err(err) => {
            debug!(path = %skill_file.display(), error = %err, "skipping unreadable descriptor");
            return None;
        }
    };

    let frontmatter = parse_frontmatter(&head);
    let parent_name = skill_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut identifier = normalize_identifier(frontmatter.get("name").map_or("", String::as_str));
    if identifier.is_empty() {
        identifier = match policy {
            EmptyIdentifierPolicy::FallbackToDirName => normalize_identifier(&parent_name),
            EmptyIdentifierPolicy::Skip => return None,
        };
    }
    if identifier.is_empty() {
        return None;
    }

    let display_name = frontmatter
        .get("name")
        .map_or_else(|| parent_name.clone(), |name| name.trim().to_string());
    let description = frontmatter
        .get("description")
        .map_or_else(String::new, |description| description.trim().to_string());

    let aliases: BTreeSet<String> = [
        identifier.clone(),
        normalize_phrase(&parent_name),
        normalize_phrase(&display_name),
    ]
    .into_iter()
    .filter(|alias| !alias.is_empty())
    .collect();

    let keywords = tokenize(&format!("{identifier} {display_name} {description}"));

    Some(SkillDescriptor {
        identifier,
        display_name,
        description,
        triggers: Vec::new(),
        path: skill_file.to_path_buf(),
        source_directory: source_directory.to_path_buf(),
        aliases,
        keywords,
        detail_state: DetailState::Indexed,
    })
}
