//! Passive voice detection.
//!
//! Approximates a dependency parser's passive-auxiliary label with an
//! auxiliary + past-participle window scan. Adjective lookalikes
//! ("was tired") are excluded so common copular sentences don't flag.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::text;

/// Auxiliary verbs that introduce passive constructions.
const PASSIVE_AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "get", "gets", "got", "getting",
];

/// Irregular past participles that don't end in -ed.
static IRREGULAR_PARTICIPLES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "been", "done", "gone", "seen", "known", "given", "taken", "made", "written", "spoken",
        "broken", "chosen", "driven", "eaten", "fallen", "forgotten", "forgiven", "frozen",
        "hidden", "ridden", "risen", "shaken", "shown", "stolen", "torn", "thrown", "worn",
        "beaten", "bitten", "blown", "drawn", "flown", "grown", "built", "sent", "spent", "held",
        "kept", "left", "lost", "found", "sold", "told", "brought", "bought", "caught", "taught",
        "put", "set", "read", "said", "paid", "laid", "heard", "meant", "led", "won", "begun",
        "sung", "hung", "struck", "stuck", "understood",
    ])
});

/// Participle lookalikes that usually act as plain adjectives.
static ADJECTIVE_EXCEPTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "tired", "bored", "excited", "interested", "worried", "scared", "surprised", "confused",
        "pleased", "satisfied", "disappointed", "relaxed", "stressed", "advanced", "detailed",
        "experienced", "complicated", "sophisticated", "crowded", "closed", "open",
        "limited", "unlimited", "related", "unrelated", "dedicated",
    ])
});

/// Regular past participles: words ending in -ed or -en.
static REGULAR_PARTICIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+(?:ed|en)$").expect("valid regex"));

/// Does this sentence contain a passive auxiliary construction?
///
/// True when any auxiliary verb is immediately followed by a likely past
/// participle, allowing one adverb in between ("was quickly written").
pub fn sentence_is_passive(sentence: &str) -> bool {
    let words = text::extract_words(sentence);
    if words.len() < 2 {
        return false;
    }

    for (i, word) in words.iter().enumerate() {
        if !PASSIVE_AUXILIARIES.contains(&word.as_str()) {
            continue;
        }
        // Direct participle, or one intervening -ly adverb.
        if words.get(i + 1).is_some_and(|w| is_participle(w)) {
            return true;
        }
        if words.get(i + 1).is_some_and(|w| w.ends_with("ly"))
            && words.get(i + 2).is_some_and(|w| is_participle(w))
        {
            return true;
        }
    }

    false
}

/// Sentences from `text` that contain a passive construction, in order.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn passive_sentences(text: &str) -> Vec<String> {
    text::split_sentences(text)
        .into_iter()
        .filter(|s| sentence_is_passive(s))
        .collect()
}

fn is_participle(word: &str) -> bool {
    if ADJECTIVE_EXCEPTIONS.contains(word) {
        return false;
    }
    IRREGULAR_PARTICIPLES.contains(word) || REGULAR_PARTICIPLE.is_match(word)
}
