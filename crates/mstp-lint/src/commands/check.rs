//! Check command — report issues in one topic file, writing nothing.
//!
//! Dry-run counterpart of `scan`: the file goes through the same rule
//! pipeline, every suggestion is rejected, and the findings are listed.
//! Exits non-zero when any issue is found.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use mstp_lint_core::config::Config;
use mstp_lint_core::document;
use mstp_lint_core::issue::IssueRecord;
use mstp_lint_core::review::RejectAll;

use super::RuleArgs;

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Topic file to check.
    pub file: Utf8PathBuf,

    /// Shared rule options.
    #[command(flatten)]
    pub rules: RuleArgs,
}

#[derive(Serialize)]
struct CheckReport {
    file: Utf8PathBuf,
    issues: usize,
    records: Vec<IssueRecord>,
}

/// Check a single topic file and list its issues.
#[instrument(name = "cmd_check", skip_all, fields(file = %args.file))]
pub fn cmd_check(args: CheckArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing check command");

    let toggles = args.rules.toggles(config);
    let engine = args.rules.engine(config);

    let html = std::fs::read_to_string(args.file.as_std_path())
        .with_context(|| format!("failed to read {}", args.file))?;
    let topic = document::process_topic(&html, &engine, &toggles, &mut RejectAll)
        .with_context(|| format!("failed to parse {}", args.file))?;

    let report = CheckReport {
        file: args.file,
        issues: topic.records.len(),
        records: topic.records,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.file.bold());
    if report.records.is_empty() {
        println!("  {} no issues", "PASS".green());
        return Ok(());
    }

    for record in &report.records {
        println!(
            "  {} {}",
            format!("[{}]", record.issue.kind).yellow(),
            record.issue.original,
        );
        match record.issue.replacement() {
            Some(replacement) => println!("    {} {}", "=>".green(), replacement),
            None => println!("    {} {}", "advice:".dimmed(), record.issue.suggestion.as_str()),
        }
    }

    bail!("{} issue(s) found in {}", report.issues, report.file);
}
