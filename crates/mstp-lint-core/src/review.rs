//! Accept/reject seam for suggested changes.
//!
//! The engine returns issues as data; how decisions are collected — an
//! interactive prompt, a batched UI, or scripted auto-accept — is the
//! caller's concern. The document processor only needs something that
//! answers accept-or-reject per concrete suggestion.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// The operator's decision on one concrete suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
    /// Apply the suggested replacement.
    Accept,
    /// Leave the text unchanged.
    Reject,
}

/// Collects decisions for a run.
///
/// `decide` is called once per concrete-replacement issue, in order.
/// `observe` is called for advisory issues, which carry no applicable
/// action and exist for operator awareness only.
pub trait Reviewer {
    /// Decide whether to apply a concrete suggestion.
    fn decide(&mut self, issue: &Issue) -> Decision;

    /// Take note of an advisory issue. Default: ignore.
    fn observe(&mut self, issue: &Issue) {
        let _ = issue;
    }
}

/// Accepts every suggestion without asking. Batch mode uses this, and so
/// do tests that want deterministic application.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Reviewer for AcceptAll {
    fn decide(&mut self, _issue: &Issue) -> Decision {
        Decision::Accept
    }
}

/// Rejects every suggestion. Useful for dry runs that only want the
/// issue list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl Reviewer for RejectAll {
    fn decide(&mut self, _issue: &Issue) -> Decision {
        Decision::Reject
    }
}
