//! Grammar correction seam.
//!
//! The rule engine treats the corrector as a pure function of its input
//! string: same text in, same text out. [`RuleBasedCorrector`] is the
//! built-in implementation, limited to mechanical fixes that are safe to
//! apply without linguistic analysis.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Returns a corrected version of a text span.
///
/// Implementations must be deterministic and must not retain state
/// between calls.
pub trait GrammarCorrector {
    /// Correct `text`, returning it unchanged if nothing needs fixing.
    fn correct(&self, text: &str) -> String;
}

/// Word spans, for duplicate-word detection.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z']+").expect("valid regex"));

/// An article followed by the word it modifies.
static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([Aa]n?) ([A-Za-z]+)").expect("valid regex"));

/// Standalone lowercase first-person pronoun. Deliberately narrower than
/// `\bi\b` so "i.e." and "i'm" contractions are left alone.
static LONE_I: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)i(\s|[,!?;:]|$)").expect("valid regex"));

/// Runs of two or more spaces or tabs.
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));

/// Whitespace before closing punctuation.
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +([,.;:!?])").expect("valid regex"));

/// Words whose spelling starts with a vowel but whose sound does not.
const CONSONANT_SOUND: &[&str] = &[
    "user", "users", "unit", "units", "unique", "university", "universal", "one", "once",
    "european", "useful",
];

/// Words whose spelling starts with a consonant but whose sound does not.
const VOWEL_SOUND: &[&str] = &["hour", "hours", "honest", "honor", "honour", "heir"];

/// Built-in corrector: mechanical, deterministic fixes only.
///
/// Applies, in order: duplicate-word removal, a/an agreement, lone `i`
/// capitalization, multi-space collapse, and space-before-punctuation
/// removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedCorrector;

impl GrammarCorrector for RuleBasedCorrector {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn correct(&self, text: &str) -> String {
        let text = remove_duplicate_words(text);
        let text = fix_articles(&text);
        let text = LONE_I.replace_all(&text, "${1}I${2}");
        let text = MULTI_SPACE.replace_all(&text, " ");
        SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned()
    }
}

/// Drop the second of two identical consecutive words.
///
/// Only whitespace may separate the pair; "the, the" is left alone.
/// Comparison is case-insensitive and the first occurrence is kept.
fn remove_duplicate_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<String> = None;
    let mut last_end = 0;

    for m in WORD.find_iter(text) {
        let gap = &text[last_end..m.start()];
        let lower = m.as_str().to_lowercase();
        if prev.as_deref() == Some(lower.as_str())
            && !gap.is_empty()
            && gap.chars().all(char::is_whitespace)
        {
            last_end = m.end();
            continue;
        }
        out.push_str(gap);
        out.push_str(m.as_str());
        prev = Some(lower);
        last_end = m.end();
    }

    out.push_str(&text[last_end..]);
    out
}

/// Swap "a"/"an" to agree with the following word's initial sound.
fn fix_articles(text: &str) -> String {
    ARTICLE
        .replace_all(text, |caps: &Captures<'_>| {
            let article = &caps[1];
            let word = caps[2].to_lowercase();
            let wants_an = if CONSONANT_SOUND.contains(&word.as_str()) {
                false
            } else if VOWEL_SOUND.contains(&word.as_str()) {
                true
            } else {
                word.starts_with(['a', 'e', 'i', 'o', 'u'])
            };
            let fixed = match (wants_an, article.starts_with('A')) {
                (true, true) => "An",
                (true, false) => "an",
                (false, true) => "A",
                (false, false) => "a",
            };
            format!("{fixed} {}", &caps[2])
        })
        .into_owned()
}
