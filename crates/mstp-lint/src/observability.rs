//! Logging and tracing setup.
//!
//! Human-readable events go to stderr. When a log location is known, a
//! JSONL copy of every event goes to a file through a non-blocking
//! appender; the returned guard must stay alive for the process lifetime
//! or buffered events are lost.
//!
//! Log location resolution, highest precedence first:
//! 1. `MSTP_LINT_LOG_PATH` (explicit file)
//! 2. `MSTP_LINT_LOG_DIR` (directory; file named `mstp-lint.jsonl`)
//! 3. `log_dir` from the loaded configuration
//! 4. The platform data directory (e.g. `~/.local/share/mstp-lint/logs`)

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where log output should go, resolved from environment and config.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path, bypassing directory resolution.
    pub log_path: Option<PathBuf>,
    /// Directory to place the log file in.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from environment variables, with the config file's
    /// `log_dir` as a lower-precedence fallback.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("MSTP_LINT_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("MSTP_LINT_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    /// The file events should be appended to, if any location is known.
    fn resolved_log_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.log_path {
            return Some(path.clone());
        }
        let dir = self.log_dir.clone().or_else(default_log_dir)?;
        Some(dir.join("mstp-lint.jsonl"))
    }
}

/// Platform log directory under the application's data dir.
fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mstp-lint")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Build the event filter from CLI flags and the configured level.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` forces errors only,
/// `-v`/`-vv` raise the level, and the config file's level is the default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber: stderr layer plus optional JSONL file
/// layer.
///
/// File logging is best effort. If the log file cannot be created the
/// process still runs with stderr logging only.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file = config.resolved_log_path().and_then(|path| {
        if let Some(parent) = path.parent()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            eprintln!("warning: cannot create log directory {}: {error}", parent.display());
            return None;
        }
        match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Some(file),
            Err(error) => {
                eprintln!("warning: cannot open log file {}: {error}", path.display());
                None
            }
        }
    });

    match file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}
