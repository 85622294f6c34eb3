//! Review command — step through suggestions and apply accepted ones.
//!
//! Walks the folder like `scan`, but stages every concrete suggestion
//! through a prompt instead of applying it outright. Files are rewritten
//! in place, and only when at least one suggestion was accepted.

use std::io::{BufRead, Write};

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use mstp_lint_core::config::Config;
use mstp_lint_core::issue::{Issue, IssueRecord};
use mstp_lint_core::review::{Decision, Reviewer};
use mstp_lint_core::{report, scan};

use super::RuleArgs;

/// Arguments for the `review` subcommand.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Folder containing topic files
    pub root: Utf8PathBuf,

    /// Accept every suggestion without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write a CSV violations log (FILE defaults to violations_log.csv)
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = report::DEFAULT_LOG_FILE
    )]
    pub export_log: Option<Utf8PathBuf>,

    /// Shared rule options.
    #[command(flatten)]
    pub rules: RuleArgs,
}

#[derive(Serialize)]
struct ReviewSummary {
    root: Utf8PathBuf,
    files: usize,
    changed_files: usize,
    accepted: usize,
    rejected: usize,
    advisories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<Utf8PathBuf>,
}

/// Prompts on stdin for each concrete suggestion; prints advisories.
struct PromptReviewer<R> {
    input: R,
    assume_yes: bool,
    accepted: usize,
    rejected: usize,
    advisories: usize,
}

impl<R: BufRead> PromptReviewer<R> {
    fn new(input: R, assume_yes: bool) -> Self {
        Self {
            input,
            assume_yes,
            accepted: 0,
            rejected: 0,
            advisories: 0,
        }
    }
}

impl<R: BufRead> Reviewer for PromptReviewer<R> {
    fn decide(&mut self, issue: &Issue) -> Decision {
        if self.assume_yes {
            self.accepted += 1;
            return Decision::Accept;
        }

        println!("{} {}", format!("[{}]", issue.kind).yellow(), issue.original);
        if let Some(replacement) = issue.replacement() {
            println!("  {} {}", "=>".green(), replacement);
        }
        print!("Apply? [y/N] ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        // EOF or a read error counts as a rejection.
        let _ = self.input.read_line(&mut line);
        if matches!(line.trim(), "y" | "Y" | "yes") {
            self.accepted += 1;
            Decision::Accept
        } else {
            self.rejected += 1;
            Decision::Reject
        }
    }

    fn observe(&mut self, issue: &Issue) {
        self.advisories += 1;
        if !self.assume_yes {
            println!(
                "{} {} ({})",
                format!("[{}]", issue.kind).dimmed(),
                issue.original,
                issue.suggestion.as_str(),
            );
        }
    }
}

/// Review every topic file under the given folder, rewriting in place.
#[instrument(name = "cmd_review", skip_all, fields(root = %args.root))]
pub fn cmd_review(args: ReviewArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(root = %args.root, yes = args.yes, "executing review command");

    if global_json && !args.yes {
        anyhow::bail!("interactive review does not mix with --json; pass --yes to auto-accept");
    }

    let toggles = args.rules.toggles(config);
    let engine = args.rules.engine(config);
    let files = scan::topic_files(&args.root, None)
        .with_context(|| format!("failed to walk {}", args.root))?;

    if files.is_empty() && !global_json {
        println!("{} no topic files under {}", "SKIP:".dimmed(), args.root);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut reviewer = PromptReviewer::new(stdin.lock(), args.yes);
    let mut records: Vec<IssueRecord> = Vec::new();
    let mut changed_files = 0usize;

    for file in &files {
        if !global_json {
            println!("{}", file.bold());
        }
        let topic = scan::review_file(file, &engine, &toggles, &mut reviewer)
            .with_context(|| format!("failed to process {file}"))?;
        if topic.changed {
            changed_files += 1;
        }
        records.extend(topic.records);
    }

    let log_file = match args.export_log {
        Some(path) => {
            std::fs::write(path.as_std_path(), report::violations_csv(&records))
                .with_context(|| format!("failed to write violations log {path}"))?;
            Some(path)
        }
        None => None,
    };

    let summary = ReviewSummary {
        root: args.root,
        files: files.len(),
        changed_files,
        accepted: reviewer.accepted,
        rejected: reviewer.rejected,
        advisories: reviewer.advisories,
        log_file,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} accepted, {} rejected, {} advisory",
        "Review:".bold(),
        summary.accepted,
        summary.rejected,
        summary.advisories,
    );
    println!("{} file(s) updated in place", summary.changed_files);
    if let Some(ref path) = summary.log_file {
        println!("Violations log written to {}", path.cyan());
    }

    Ok(())
}
