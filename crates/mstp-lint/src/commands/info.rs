//! Info command implementation

use clap::Args;
use mstp_lint_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dir: Option<String>,
    match_mode: String,
    disabled_rules: Vec<&'static str>,
    custom_terms: usize,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let rules = &config.rules;
        let mut disabled_rules = Vec::new();
        for (enabled, name) in [
            (rules.grammar, "grammar"),
            (rules.custom_terms, "custom-terms"),
            (rules.passive, "passive"),
            (rules.future, "future"),
            (rules.ui, "ui"),
            (rules.length, "length"),
            (rules.headings, "headings"),
        ] {
            if !enabled {
                disabled_rules.push(name);
            }
        }
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            user_config_dir: mstp_lint_core::config::user_config_dir().map(|p| p.to_string()),
            output_dir: config.output_dir.as_ref().map(|p| p.to_string()),
            match_mode: match config.match_mode.unwrap_or_default() {
                mstp_lint_core::MatchMode::Substring => "substring".to_string(),
                mstp_lint_core::MatchMode::WordBoundary => "word-boundary".to_string(),
            },
            disabled_rules,
            custom_terms: config.terms.len(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
    } else {
        println!(
            "{} {}",
            full_info.package.name.bold(),
            full_info.package.version.green()
        );
        if !full_info.package.description.is_empty() {
            println!("{}", full_info.package.description);
        }
        if !full_info.package.license.is_empty() {
            println!("{}: {}", "License".dimmed(), full_info.package.license);
        }
        if !full_info.package.repository.is_empty() {
            println!(
                "{}: {}",
                "Repository".dimmed(),
                full_info.package.repository.cyan()
            );
        }

        // Configuration section
        println!();
        println!("{}", "Configuration".bold().underline());
        if let Some(ref path) = full_info.config.config_file {
            println!("{}: {}", "Config file".dimmed(), path.cyan());
        } else {
            println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
        }
        println!("{}: {}", "Log level".dimmed(), full_info.config.log_level);
        if let Some(ref dir) = full_info.config.log_dir {
            println!("{}: {}", "Log directory".dimmed(), dir);
        }
        if let Some(ref dir) = full_info.config.user_config_dir {
            println!("{}: {}", "User config dir".dimmed(), dir);
        }
        if let Some(ref dir) = full_info.config.output_dir {
            println!("{}: {}", "Output directory".dimmed(), dir);
        }
        println!("{}: {}", "Match mode".dimmed(), full_info.config.match_mode);
        if full_info.config.disabled_rules.is_empty() {
            println!("{}: all enabled", "Rules".dimmed());
        } else {
            println!(
                "{}: {} disabled",
                "Rules".dimmed(),
                full_info.config.disabled_rules.join(", ")
            );
        }
        println!("{}: {}", "Custom terms".dimmed(), full_info.config.custom_terms);
    }

    Ok(())
}
