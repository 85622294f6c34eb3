//! Scan command — batch-clean a folder of topic files.
//!
//! Walks the folder for `.htm`/`.html` files, applies every enabled rule
//! suggestion to each one, and writes the results into a mirrored tree
//! under the output directory. Originals are never modified.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use mstp_lint_core::config::Config;
use mstp_lint_core::issue::IssueRecord;
use mstp_lint_core::{report, scan};

use super::RuleArgs;

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Folder containing topic files
    pub root: Utf8PathBuf,

    /// Output directory for cleaned copies (default: cleaned_output in the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<Utf8PathBuf>,

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
struct ScanSummary {
    root: Utf8PathBuf,
    output_dir: Utf8PathBuf,
    files: usize,
    changed_files: usize,
    issues: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    records: Vec<IssueRecord>,
}

/// Batch-clean every topic file under the given folder.
#[instrument(name = "cmd_scan", skip_all, fields(root = %args.root))]
pub fn cmd_scan(args: ScanArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(root = %args.root, "executing scan command");

    let out_root = args
        .out
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| Utf8PathBuf::from(scan::DEFAULT_OUTPUT_DIR));
    let toggles = args.rules.toggles(config);
    let engine = args.rules.engine(config);

    // The output tree is excluded from the walk so a re-scan never
    // ingests a prior run's cleaned copies.
    let files = scan::topic_files(&args.root, Some(&out_root))
        .with_context(|| format!("failed to walk {}", args.root))?;
    if files.is_empty() {
        tracing::info!(root = %args.root, "no topic files found");
        if !global_json {
            println!("{} no topic files under {}", "SKIP:".dimmed(), args.root);
        } else {
            let summary = ScanSummary {
                root: args.root,
                output_dir: out_root,
                files: 0,
                changed_files: 0,
                issues: 0,
                log_file: None,
                records: Vec::new(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        return Ok(());
    }

    let progress = if global_json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64).with_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        )
    };

    let mut records: Vec<IssueRecord> = Vec::new();
    let mut changed_files = 0usize;
    for file in &files {
        progress.set_message(file.file_name().unwrap_or(file.as_str()).to_string());
        let topic = scan::batch_file(file, &args.root, &out_root, &engine, &toggles)
            .with_context(|| format!("failed to process {file}"))?;
        if topic.changed {
            changed_files += 1;
        }
        records.extend(topic.records);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let log_file = match args.export_log {
        Some(path) => {
            std::fs::write(path.as_std_path(), report::violations_csv(&records))
                .with_context(|| format!("failed to write violations log {path}"))?;
            Some(path)
        }
        None => None,
    };

    let summary = ScanSummary {
        root: args.root,
        output_dir: out_root,
        files: files.len(),
        changed_files,
        issues: records.len(),
        log_file,
        records,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} file(s), {} changed, {} issue(s)",
        "Scanned:".bold(),
        summary.files,
        summary.changed_files,
        summary.issues,
    );
    println!("Processed files saved to {}", summary.output_dir.cyan());
    if let Some(ref path) = summary.log_file {
        println!("Violations log written to {}", path.cyan());
    }

    Ok(())
}
