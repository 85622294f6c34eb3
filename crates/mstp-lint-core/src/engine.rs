//! The style rule engine.
//!
//! [`RuleEngine::evaluate`] runs the enabled rules over one text unit in a
//! fixed order, each rule seeing the output of the previous enabled rule:
//! grammar, custom terms, passive voice, future tense, UI terms, long
//! sentences. The engine keeps no state between calls except its
//! custom-term table, and never mutates caller state.
//!
//! Heading case is a separate code path ([`heading_issue`]) that applies
//! to heading nodes only and never feeds the main rule chain.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::grammar::{GrammarCorrector, RuleBasedCorrector};
use crate::issue::{Issue, IssueKind};
use crate::terms::TermTable;
use crate::{passive, text};

/// Interface terms to wrap in bold markup, applied in this order.
pub const UI_TERMS: &[&str] = &["OK", "Cancel", "Next", "Back", "Apply", "Save", "Close"];

/// A sentence longer than this many whitespace-delimited words is flagged.
pub const LONG_SENTENCE_WORDS: usize = 25;

/// The literal future-tense marker. Detection is a single substring test,
/// but replacement removes every occurrence.
const FUTURE_MARKER: &str = "will ";

/// Advice text for passive-voice findings.
const ADVICE_ACTIVE: &str = "use active voice";

/// Advice text for long-sentence findings.
const ADVICE_SHORTEN: &str = "shorten it";

/// How custom and UI terms are matched against text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MatchMode {
    /// Plain substring matching. A short pattern may match inside a longer
    /// word; this is the documented contract, kept for compatibility.
    #[default]
    Substring,
    /// Stricter matching on word boundaries.
    WordBoundary,
}

/// The named rule switches, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RuleToggles {
    /// Submit text to the grammar corrector.
    pub grammar: bool,
    /// Apply the operator-maintained find/replace table.
    pub custom_terms: bool,
    /// Flag sentences with passive constructions (advisory).
    pub passive: bool,
    /// Remove the future-tense marker.
    pub future: bool,
    /// Bold interface terms.
    pub ui: bool,
    /// Flag overlong sentences (advisory).
    pub length: bool,
    /// Sentence-case headings (separate code path).
    pub headings: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl RuleToggles {
    /// Every rule enabled — the default operator configuration.
    pub const fn all() -> Self {
        Self {
            grammar: true,
            custom_terms: true,
            passive: true,
            future: true,
            ui: true,
            length: true,
            headings: true,
        }
    }

    /// Every rule disabled. Mostly useful for tests and targeted runs.
    pub const fn none() -> Self {
        Self {
            grammar: false,
            custom_terms: false,
            passive: false,
            future: false,
            ui: false,
            length: false,
            headings: false,
        }
    }

    /// Turn a single rule off by name.
    pub const fn disable(&mut self, rule: RuleSwitch) {
        match rule {
            RuleSwitch::Grammar => self.grammar = false,
            RuleSwitch::CustomTerms => self.custom_terms = false,
            RuleSwitch::Passive => self.passive = false,
            RuleSwitch::Future => self.future = false,
            RuleSwitch::Ui => self.ui = false,
            RuleSwitch::Length => self.length = false,
            RuleSwitch::Headings => self.headings = false,
        }
    }
}

/// A rule name, for toggling from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RuleSwitch {
    /// Grammar correction.
    Grammar,
    /// Custom term replacement.
    CustomTerms,
    /// Passive voice detection.
    Passive,
    /// Future tense removal.
    Future,
    /// UI term bolding.
    Ui,
    /// Long sentence detection.
    Length,
    /// Heading sentence-casing.
    Headings,
}

/// The result of evaluating one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// The text after all unconditionally-applied rewrites. Advisory rules
    /// and heading case never contribute here.
    pub text: String,
    /// Issues in rule-evaluation order; within a rule, in match order.
    pub issues: Vec<Issue>,
}

/// The rule engine. Owns the custom-term table and the grammar corrector;
/// everything else is per-call input.
#[derive(Debug, Default)]
pub struct RuleEngine<C = RuleBasedCorrector> {
    corrector: C,
    terms: TermTable,
    match_mode: MatchMode,
}

impl RuleEngine<RuleBasedCorrector> {
    /// Engine with the built-in corrector, an empty term table, and
    /// substring matching.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: GrammarCorrector> RuleEngine<C> {
    /// Engine with a caller-supplied grammar corrector.
    pub fn with_corrector(corrector: C) -> Self {
        Self {
            corrector,
            terms: TermTable::default(),
            match_mode: MatchMode::default(),
        }
    }

    /// Set the term match mode (builder style).
    #[must_use]
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// The custom-term table.
    pub const fn terms(&self) -> &TermTable {
        &self.terms
    }

    /// Mutable access to the custom-term table. Updates take effect on the
    /// next `evaluate` call; evaluations already returned are unaffected.
    pub const fn terms_mut(&mut self) -> &mut TermTable {
        &mut self.terms
    }

    /// Evaluate one text unit against the enabled rules.
    ///
    /// Deterministic for fixed inputs and a fixed term table. Empty or
    /// whitespace-only input comes back unchanged with no issues.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn evaluate(&self, text: &str, toggles: &RuleToggles) -> Evaluation {
        let mut issues = Vec::new();
        if text.trim().is_empty() {
            return Evaluation {
                text: text.to_string(),
                issues,
            };
        }

        let mut current = text.to_string();

        if toggles.grammar {
            let corrected = self.corrector.correct(&current);
            if corrected != current {
                issues.push(Issue::replace(IssueKind::Grammar, current.as_str(), corrected.as_str()));
                current = corrected;
            }
        }

        if toggles.custom_terms {
            for pair in &self.terms {
                if let Some(replaced) = substitute(&current, &pair.find, &pair.replace, self.match_mode) {
                    issues.push(Issue::replace(
                        IssueKind::CustomTerm,
                        current.as_str(),
                        replaced.as_str(),
                    ));
                    current = replaced;
                }
            }
        }

        if toggles.passive {
            for sentence in passive::passive_sentences(&current) {
                issues.push(Issue::advise(IssueKind::PassiveVoice, sentence, ADVICE_ACTIVE));
            }
        }

        if toggles.future && current.contains(FUTURE_MARKER) {
            let replaced = current.replace(FUTURE_MARKER, "");
            issues.push(Issue::replace(
                IssueKind::FutureTense,
                current.as_str(),
                replaced.as_str(),
            ));
            current = replaced;
        }

        if toggles.ui {
            for term in UI_TERMS {
                let bolded = format!("<b>{term}</b>");
                if let Some(replaced) = substitute(&current, term, &bolded, self.match_mode) {
                    issues.push(Issue::replace(
                        IssueKind::UiTerm,
                        current.as_str(),
                        replaced.as_str(),
                    ));
                    current = replaced;
                }
            }
        }

        if toggles.length {
            for sentence in text::split_sentences(&current) {
                if text::word_count(&sentence) > LONG_SENTENCE_WORDS {
                    issues.push(Issue::advise(IssueKind::LongSentence, sentence, ADVICE_SHORTEN));
                }
            }
        }

        tracing::debug!(issues = issues.len(), changed = current != text, "unit evaluated");
        Evaluation {
            text: current,
            issues,
        }
    }
}

/// Replace all occurrences of `find` in `text`, honoring the match mode.
///
/// Returns `None` when nothing matched.
fn substitute(text: &str, find: &str, replace: &str, mode: MatchMode) -> Option<String> {
    match mode {
        MatchMode::Substring => text
            .contains(find)
            .then(|| text.replace(find, replace)),
        MatchMode::WordBoundary => {
            let pattern = format!(r"\b{}\b", regex::escape(find));
            let re = Regex::new(&pattern).ok()?;
            re.is_match(text)
                .then(|| re.replace_all(text, NoExpand(replace)).into_owned())
        }
    }
}

/// Naive sentence case: uppercase the first character, lowercase the
/// entire remainder. Empty input comes back unchanged. True sentence
/// casing (proper nouns, acronyms) is out of scope by contract.
pub fn to_sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(text.len());
    out.extend(first.to_uppercase());
    out.push_str(&chars.as_str().to_lowercase());
    out
}

/// Heading-case check: `Some(issue)` when sentence-casing would change the
/// heading, `None` when it is already cased.
pub fn heading_issue(heading: &str) -> Option<Issue> {
    let cased = to_sentence_case(heading);
    (cased != heading).then(|| Issue::replace(IssueKind::HeadingCase, heading, cased.as_str()))
}
