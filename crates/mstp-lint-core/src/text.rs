//! Text processing utilities.
//!
//! Sentence segmentation and word extraction for the advisory rules.
//! The splitter is abbreviation-, decimal-, and URL-aware; plain
//! punctuation splitting breaks too often on technical prose.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Abbreviations that should not end a sentence when followed by a period.
static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        // Titles
        "mr", "mrs", "ms", "dr", "prof", "rev", "sr", "jr", "capt", "col", "gen", "lt", "sgt",
        // Latin and editorial
        "etc", "vs", "e.g", "i.e", "cf", "viz", "et al", "n.b", "p.s", "approx", "est",
        // Calendar
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        // Addresses and organizations
        "st", "ave", "blvd", "rd", "dept", "inc", "corp", "ltd", "co", "no", "fig", "ch", "sec",
        // Units
        "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "mi", "min", "max",
    ])
});

/// Regex for URLs, checked near a candidate boundary.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+$").expect("valid regex"));

/// Minimum length for a fragment to count as a sentence.
const MIN_SENTENCE_LEN: usize = 3;

/// Split text into sentences.
///
/// A `.`, `!`, or `?` ends a sentence unless context says otherwise:
/// a known abbreviation or single-letter initial before a period, a
/// decimal number, an ellipsis, a trailing URL, or a lowercase
/// continuation after the punctuation.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = pos + ch.len_utf8();
        let fragment = &text[start..end];
        if is_boundary(fragment, ch, &chars, i) {
            let sentence = fragment.trim();
            if sentence.len() >= MIN_SENTENCE_LEN {
                sentences.push(sentence.to_string());
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if tail.len() >= MIN_SENTENCE_LEN {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Extract words, lowercased, with surrounding punctuation stripped.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whitespace-delimited word count, as used by the long-sentence rule.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Decide whether the terminator at `chars[i]` ends a sentence.
fn is_boundary(fragment: &str, punct: char, chars: &[(usize, char)], i: usize) -> bool {
    // Next non-whitespace character after the terminator.
    let next = chars[i + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace());

    let Some(next) = next else {
        return true; // end of text
    };

    if punct == '!' || punct == '?' {
        return !next.is_lowercase();
    }

    // Period heuristics from here on.
    let before = word_before(fragment);

    if is_abbreviation_word(&before) {
        return false;
    }

    // "3.14" — digit on both sides of the period.
    if next.is_ascii_digit() && before.chars().last().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    if fragment.ends_with("...") {
        return false;
    }

    // A period inside a URL ("example.com/page.html") never ends a
    // sentence. One followed by whitespace still can.
    if URL_PATTERN.is_match(fragment.trim_end_matches('.'))
        && chars.get(i + 1).is_some_and(|&(_, c)| !c.is_whitespace())
    {
        return false;
    }

    !next.is_lowercase()
}

/// The word immediately before the end of `fragment`, terminator included.
fn word_before(fragment: &str) -> String {
    fragment
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .to_string()
}

fn is_abbreviation_word(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let clean = word.trim_end_matches('.').to_lowercase();
    if ABBREVIATIONS.contains(clean.as_str()) {
        return true;
    }
    // Single letters read as initials ("J. Smith", "U.S.").
    clean.len() == 1 && word.chars().next().is_some_and(char::is_alphabetic)
}
