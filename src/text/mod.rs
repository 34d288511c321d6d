//! Text normalization and bilingual tokenization.
//!
//! Every comparison in the routing pipeline funnels through the same
//! normalization: markdown stripped, lowercased, punctuation collapsed to
//! spaces. Tokenization is deliberately coarse for CJK input: any contiguous
//! run of two or more ideographs is treated as a single token, with no
//! linguistic segmentation. Canonical intent tokens are layered on top so
//! that e.g. "部署" and "deploy" both surface the `deployment` token.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// ASCII tokens dropped during tokenization. CJK tokens are never filtered.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "before", "by", "do", "for",
    "from", "how", "i", "if", "in", "is", "it", "my", "of", "on", "or",
    "please", "the", "this", "to", "use", "when", "with", "you",
];

/// Canonical intent tokens mapped to bilingual surface synonyms.
///
/// When any normalized synonym phrase appears as a substring of the
/// normalized input, the canonical token is added to the token set in
/// addition to the literal tokens.
const INTENT_TOKEN_ALIASES: &[(&str, &[&str])] = &[
    (
        "deployment",
        &[
            "deploy",
            "deployment",
            "release",
            "production",
            "pipeline",
            "上線",
            "部署",
            "正式環境",
            "發版",
        ],
    ),
    (
        "planning",
        &[
            "plan",
            "planning",
            "implement",
            "implementation",
            "how to",
            "規劃",
            "實作",
            "怎麼做",
        ],
    ),
    (
        "environment",
        &[
            "setup",
            "dependency",
            "dependencies",
            "module not found",
            "venv",
            "docker",
            "依賴",
            "安裝套件",
        ],
    ),
    (
        "debugging",
        &["debug", "error", "exception", "crash", "bug", "錯誤", "當機", "除錯"],
    ),
    ("review", &["review", "feedback", "comment", "審查", "回饋", "建議"]),
    (
        "evaluation",
        &[
            "evaluate",
            "evaluation",
            "benchmark",
            "metrics",
            "評估",
            "分析結果",
            "比較實驗",
        ],
    ),
];

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("valid regex"));

// Anything outside ASCII word chars, hyphen, the CJK ideograph range, and
// spaces is noise for matching purposes.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\-\u{4e00}-\u{9fff} ]+").expect("valid regex"));

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9][a-z0-9\-]+|[\u{4e00}-\u{9fff}]{2,}").expect("valid regex")
});

/// Resolve markdown syntax down to its visible text.
///
/// Links keep their anchor text, inline code spans are unwrapped, emphasis
/// markers are dropped, and whitespace is collapsed.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    let text = MARKDOWN_LINK.replace_all(text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = text.replace("**", "").replace('*', "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize free text for substring matching: markdown stripped, lowercased,
/// everything outside {ASCII word chars, hyphen, CJK ideographs, space}
/// replaced by spaces, underscores spaced out, whitespace collapsed.
#[must_use]
pub fn normalize_phrase(text: &str) -> String {
    let text = strip_markdown(text).to_lowercase();
    let text = NON_WORD.replace_all(&text, " ");
    let text = text.replace('_', " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a display name into a registry identifier.
///
/// The result is a hyphenated ASCII slug matching `[a-z0-9]+(-[a-z0-9]+)*`,
/// or the empty string when nothing survives (e.g. a fully CJK name).
#[must_use]
pub fn normalize_identifier(text: &str) -> String {
    normalize_phrase(text)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Tokenize free text into a sorted set of ASCII and CJK tokens, with
/// canonical intent tokens added for any matching bilingual synonym phrase.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let normalized = normalize_phrase(text);
    let mut tokens = BTreeSet::new();

    for token in TOKEN.find_iter(&normalized) {
        let token = token.as_str();
        if token.is_ascii() && STOP_WORDS.contains(&token) {
            continue;
        }
        tokens.insert(token.to_string());
    }

    for (canonical, aliases) in INTENT_TOKEN_ALIASES {
        let hit = aliases.iter().any(|alias| {
            let alias = normalize_phrase(alias);
            !alias.is_empty() && normalized.contains(&alias)
        });
        if hit {
            tokens.insert((*canonical).to_string());
        }
    }

    tokens
}
