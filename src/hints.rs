//! Route hint parsing.
//!
//! A rules document maps topic labels to skill references, e.g.
//! `- **Deployment** → `cicd-skills``. Hints never gate results; they only
//! contribute a fixed ranking boost when the query shares a keyword with the
//! label.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::text::{strip_markdown, tokenize};

static BACKTICK_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

/// One authored routing heuristic, immutable after parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHint {
    pub label: String,
    pub skill_refs: Vec<String>,
    pub keywords: BTreeSet<String>,
}

/// Parse hints out of a rules document, in encounter order.
///
/// Only trimmed lines starting with a bullet marker qualify, and only when
/// they carry at least one backtick span; every span becomes a lowercased
/// skill reference.
#[must_use]
pub fn parse_route_hints(document: &str) -> Vec<RouteHint> {
    let mut hints = Vec::new();

    for line in document.lines() {
        let stripped = line.trim();
        if !stripped.starts_with('-') {
            continue;
        }

        let skill_refs: Vec<String> = BACKTICK_SPAN
            .captures_iter(stripped)
            .map(|capture| capture[1].trim().to_lowercase())
            .collect();
        if skill_refs.is_empty() {
            continue;
        }

        let left_side = split_before_arrow(stripped);
        let label = strip_markdown(left_side.trim_start_matches(['-', ' ']).trim());
        let mut keywords = tokenize(&label);
        if keywords.is_empty() {
            keywords = tokenize(stripped);
        }

        hints.push(RouteHint {
            label,
            skill_refs,
            keywords,
        });
    }

    hints
}

/// Load hints from a file; unreadable or missing documents yield no hints.
#[must_use]
pub fn load_route_hints(path: &Path) -> Vec<RouteHint> {
    match std::fs::read_to_string(path) {
        Ok(document) => parse_route_hints(&document),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "rules document unreadable; no hints");
            Vec::new()
        }
    }
}

/// Text before the first arrow separator, ASCII `->` or `→`.
fn split_before_arrow(line: &str) -> &str {
    let ascii = line.find("->");
    let glyph = line.find('→');
    match (ascii, glyph) {
        (Some(a), Some(g)) => &line[..a.min(g)],
        (Some(a), None) => &line[..a],
        (None, Some(g)) => &line[..g],
        (None, None) => line,
    }
}
