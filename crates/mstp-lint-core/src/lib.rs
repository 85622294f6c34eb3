//! Core library for mstp-lint.
//!
//! This crate provides the rule engine, document processing, and folder
//! scanning used by the `mstp-lint` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`engine`] - The sequential style-rule engine
//! - [`grammar`] - Grammar correction seam and built-in corrector
//! - [`document`] - Topic document processing over quick-xml events
//! - [`scan`] - Folder-tree scanning, batch and review modes
//! - [`config`] - Configuration loading and management
//! - [`report`] - Violations log export
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use mstp_lint_core::{RuleEngine, RuleToggles};
//!
//! let mut engine = RuleEngine::new();
//! engine.terms_mut().add_term("utilize", "use");
//!
//! let result = engine.evaluate("You will utilize OK.", &RuleToggles::all());
//! assert_eq!(result.text, "You use <b>OK</b>.");
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod document;

pub mod engine;

pub mod error;

pub mod grammar;

pub mod issue;

pub mod passive;

pub mod report;

pub mod review;

pub mod scan;

pub mod terms;

pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use engine::{Evaluation, MatchMode, RuleEngine, RuleSwitch, RuleToggles};

pub use error::{ConfigError, ConfigResult, ScanError, ScanResult};

pub use issue::{Issue, IssueKind, IssueRecord, Suggestion};

pub use review::{AcceptAll, Decision, RejectAll, Reviewer};

pub use terms::{TermPair, TermTable};
