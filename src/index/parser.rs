//! Descriptor file parsing: frontmatter extraction and trigger mining.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::text::strip_markdown;

static TRIGGER_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^##\s+when to use this skill\s*$").expect("valid regex"));

static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+").expect("valid regex"));

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+").expect("valid regex"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("valid regex"));

static QUOTED_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

/// Read at most `max_chars` characters from the start of a file.
///
/// Index-time reads are size-bounded; only a detail load reads the whole
/// descriptor.
pub fn read_head(path: &Path, max_chars: usize) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut buf = Vec::new();
    // UTF-8 needs at most four bytes per character.
    file.take(max_chars as u64 * 4).read_to_end(&mut buf)?;
    let mut head = String::from_utf8_lossy(&buf).into_owned();
    if let Some((cut, _)) = head.char_indices().nth(max_chars) {
        head.truncate(cut);
    }
    Ok(head)
}

/// Parse a `---`-delimited frontmatter block into key/value pairs.
///
/// Returns an empty map when the content does not start with a fence or the
/// closing fence is missing. Values have surrounding quotes stripped.
#[must_use]
pub fn parse_frontmatter(content: &str) -> BTreeMap<String, String> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().map(|line| line.trim()) != Some("---") {
        return BTreeMap::new();
    }

    let Some(end) = lines.iter().skip(1).position(|line| line.trim() == "---") else {
        return BTreeMap::new();
    };

    let mut frontmatter = BTreeMap::new();
    for raw_line in &lines[1..=end] {
        let line = raw_line.trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches(|c| c == '\'' || c == '"');
        frontmatter.insert(key.trim().to_string(), value.to_string());
    }
    frontmatter
}

/// Extract trigger phrases from the `## When to use this skill` section.
///
/// Bullet and numbered items up to the next `##` heading become triggers,
/// along with any double-quoted phrases inside them. Order-preserving dedup.
#[must_use]
pub fn extract_triggers(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let Some(start) = lines
        .iter()
        .position(|line| TRIGGER_HEADING.is_match(line.trim()))
    else {
        return Vec::new();
    };

    let mut triggers = Vec::new();
    for line in &lines[start + 1..] {
        let stripped = line.trim();
        if SECTION_HEADING.is_match(stripped) {
            break;
        }

        let item = if BULLET_ITEM.is_match(stripped) {
            BULLET_ITEM.replace(stripped, "").into_owned()
        } else if NUMBERED_ITEM.is_match(stripped) {
            NUMBERED_ITEM.replace(stripped, "").into_owned()
        } else {
            continue;
        };
        if item.is_empty() {
            continue;
        }

        let cleaned = strip_markdown(&item);
        if !cleaned.is_empty() {
            triggers.push(cleaned);
        }

        for capture in QUOTED_PHRASE.captures_iter(&item) {
            let phrase = strip_markdown(&capture[1]);
            if !phrase.is_empty() {
                triggers.push(phrase);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for trigger in triggers {
        let trigger = trigger.trim().to_string();
        if trigger.is_empty() {
            continue;
        }
        if seen.insert(trigger.clone()) {
            deduped.push(trigger);
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontmatter_basic_pairs() {
        let content = "---\nname: managing-cicd-workflow\ndescription: \"Deploy helper\"\n---\nbody";
        let fm = parse_frontmatter(content);
        assert_eq!(fm.get("name").map(String::as_str), Some("managing-cicd-workflow"));
        assert_eq!(fm.get("description").map(String::as_str), Some("Deploy helper"));
    }

    #[test]
    fn frontmatter_requires_opening_fence() {
        assert!(parse_frontmatter("name: nope\n---\n").is_empty());
    }

    #[test]
    fn frontmatter_requires_closing_fence() {
        assert!(parse_frontmatter("---\nname: nope\n").is_empty());
    }

    #[test]
    fn frontmatter_ignores_lines_without_colon() {
        let fm = parse_frontmatter("---\njust text\nname: ok\n---\n");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("name").map(String::as_str), Some("ok"));
    }

    #[test]
    fn triggers_from_bullets_and_numbers() {
        let content = "\
---
name: x
description: y
---

## When to use this skill
- deploy to production
* pipeline failed
2. rollback a release

## Workflow
- not a trigger
";
        assert_eq!(
            extract_triggers(content),
            vec!["deploy to production", "pipeline failed", "rollback a release"]
        );
    }

    #[test]
    fn triggers_include_quoted_phrases() {
        let content = "## When to use this skill\n- when user says \"ship it\" or similar\n";
        assert_eq!(
            extract_triggers(content),
            vec!["when user says \"ship it\" or similar", "ship it"]
        );
    }

    #[test]
    fn triggers_heading_is_case_insensitive() {
        let content = "## WHEN TO USE THIS SKILL\n- anything\n";
        assert_eq!(extract_triggers(content), vec!["anything"]);
    }

    #[test]
    fn triggers_deduped_preserving_order() {
        let content = "## When to use this skill\n- deploy\n- deploy\n- release\n";
        assert_eq!(extract_triggers(content), vec!["deploy", "release"]);
    }

    #[test]
    fn no_trigger_section_means_no_triggers() {
        assert!(extract_triggers("## Workflow\n- step one\n").is_empty());
    }
}
