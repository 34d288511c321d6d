use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

/// Lifecycle of a descriptor's trigger data.
///
/// A descriptor starts `Indexed` (frontmatter only). The first detailed read
/// moves it to `DetailsLoaded` or, on a read failure, to `DetailLoadFailed`
/// with empty triggers. Failed reads are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    Indexed,
    DetailsLoaded,
    DetailLoadFailed,
}

/// One indexed skill descriptor.
///
/// `aliases` are normalized phrases derived from the identifier, the parent
/// directory name, and the display name; `keywords` start as the tokens of
/// identifier + name + description and are extended with trigger tokens when
/// details are loaded.
#[derive(Debug, Clone)]
pub struct SkillDescriptor {
    pub identifier: String,
    pub display_name: String,
    pub description: String,
    pub triggers: Vec<String>,
    pub path: PathBuf,
    pub source_directory: PathBuf,
    pub aliases: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub detail_state: DetailState,
}

impl SkillDescriptor {
    /// Whether a detailed read has been attempted, successfully or not.
    /// Attempted reads never charge the budget again.
    #[must_use]
    pub fn detail_read_attempted(&self) -> bool {
        self.detail_state != DetailState::Indexed
    }
}
