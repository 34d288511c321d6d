//! Shared fixture helpers for integration tests.

use std::fs;
use std::path::Path;

/// Write a well-formed `SKILL.md` descriptor with the given triggers listed
/// under `## When to use this skill`.
pub fn write_skill_file(path: &Path, name: &str, description: &str, triggers: &[&str]) {
    let trigger_lines: Vec<String> = triggers.iter().map(|t| format!("- {t}")).collect();
    fs::create_dir_all(path.parent().expect("skill dir")).expect("create skill dir");
    fs::write(
        path,
        format!(
            "---\nname: {name}\ndescription: {description}\n---\n\n## When to use this skill\n{}\n\n## Workflow\n- Placeholder\n",
            trigger_lines.join("\n")
        ),
    )
    .expect("write skill file");
}

/// Write a rules document verbatim.
pub fn write_rules_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("rules dir")).expect("create rules dir");
    fs::write(path, content).expect("write rules file");
}
