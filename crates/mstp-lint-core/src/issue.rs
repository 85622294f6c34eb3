//! Issue and suggestion data model.
//!
//! Every flagged finding is an [`Issue`]: one rule category, the span of
//! text it pertains to, and either a concrete replacement or free-form
//! advice. Advisory issues are never auto-applied.

use serde::{Deserialize, Serialize};

/// The seven rule categories a finding can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Grammar correction from the corrector seam.
    Grammar,
    /// Operator-defined find/replace pair matched.
    CustomTerm,
    /// Sentence contains a passive construction (advisory).
    PassiveVoice,
    /// Future-tense `"will "` detected and removed.
    FutureTense,
    /// Interface term wrapped in bold markup.
    UiTerm,
    /// Sentence exceeds the word-count limit (advisory).
    LongSentence,
    /// Heading is not in sentence case.
    HeadingCase,
}

impl IssueKind {
    /// Human-readable label, as used in the violations log.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "Grammar",
            Self::CustomTerm => "Custom Term",
            Self::PassiveVoice => "Passive Voice",
            Self::FutureTense => "Future Tense",
            Self::UiTerm => "UI Term",
            Self::LongSentence => "Long Sentence",
            Self::HeadingCase => "Heading Case",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the engine proposes for an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suggestion {
    /// A concrete replacement for the flagged span. Applied unconditionally
    /// in batch mode, staged for accept/reject in review mode.
    Replace(String),
    /// Free-form advice with no proposed rewrite. Presented for awareness
    /// only; there is no applicable action.
    Advise(String),
}

impl Suggestion {
    /// The suggestion as display text, whichever variant it is.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Replace(s) | Self::Advise(s) => s,
        }
    }
}

/// A single flagged rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The rule category this issue belongs to.
    pub kind: IssueKind,
    /// The text the issue pertains to — the whole unit for text-rewriting
    /// rules, a single sentence for the advisory rules.
    pub original: String,
    /// Concrete replacement or advisory text.
    pub suggestion: Suggestion,
}

impl Issue {
    /// Build a concrete-replacement issue.
    pub fn replace(kind: IssueKind, original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            kind,
            original: original.into(),
            suggestion: Suggestion::Replace(replacement.into()),
        }
    }

    /// Build an advisory issue.
    pub fn advise(kind: IssueKind, original: impl Into<String>, advice: impl Into<String>) -> Self {
        Self {
            kind,
            original: original.into(),
            suggestion: Suggestion::Advise(advice.into()),
        }
    }

    /// The concrete replacement, if this issue has one.
    pub fn replacement(&self) -> Option<&str> {
        match self.suggestion {
            Suggestion::Replace(ref s) => Some(s.as_str()),
            Suggestion::Advise(_) => None,
        }
    }

    /// Returns `true` for advisory-only issues (passive voice, long sentence).
    pub const fn is_advisory(&self) -> bool {
        matches!(self.suggestion, Suggestion::Advise(_))
    }
}

/// An [`Issue`] paired with the text unit it was found in.
///
/// The scan layer keeps the unit text alongside each issue so the
/// violations log can report the original context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    /// The flagged issue.
    pub issue: Issue,
    /// The text unit as it read before any rule touched it.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_match_log_columns() {
        assert_eq!(IssueKind::CustomTerm.as_str(), "Custom Term");
        assert_eq!(IssueKind::UiTerm.as_str(), "UI Term");
        assert_eq!(IssueKind::HeadingCase.as_str(), "Heading Case");
    }

    #[test]
    fn advisory_has_no_replacement() {
        let issue = Issue::advise(IssueKind::PassiveVoice, "It was done.", "use active voice");
        assert!(issue.is_advisory());
        assert!(issue.replacement().is_none());
        assert_eq!(issue.suggestion.as_str(), "use active voice");
    }

    #[test]
    fn concrete_exposes_replacement() {
        let issue = Issue::replace(IssueKind::FutureTense, "will go", "go");
        assert!(!issue.is_advisory());
        assert_eq!(issue.replacement(), Some("go"));
    }
}
