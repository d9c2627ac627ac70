//! Logging setup for sable with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if requested).
//! Stdout logging is enabled when `SABLE_LOG` or `RUST_LOG` is set, or in
//! debug builds.
//!
//! Environment variable priority: `SABLE_LOG` (sable-specific control,
//! highest), then `RUST_LOG`, then the default of `warn` globally with
//! `info` for sable crates.
//!
//! The default log file is `<data_local_dir>/sable/logs/sable-<pid>.log`;
//! override with [`LogConfig::log_file_path`] or `SABLE_LOG_FILE`.

use std::{env, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Crates expanded when `SABLE_LOG` holds a bare level like `debug`.
const SABLE_CRATES: &[&str] = &["sable_diagnostics", "sable_log", "sable_bin"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// Safe to call when logging is already initialized; the second attempt
/// reports an error instead of panicking.
pub fn init(config: LogConfig) -> Result<LogGuard, InitError> {
    let override_path = config
        .log_file_path
        .or_else(|| env::var("SABLE_LOG_FILE").ok().map(PathBuf::from));
    let (log_dir, filename) = resolve_log_path(override_path);

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    // The file always records at least warnings, even with no env vars set.
    let file_filter = if env_configured() {
        env_filter()
    } else {
        EnvFilter::new("warn")
    };
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter);

    let stdout_layer = if env_configured() || cfg!(debug_assertions) {
        Some(fmt::layer().with_filter(env_filter()))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize stdout-only logging for tests.
///
/// Will not crash if called multiple times or if logging is already
/// initialized by another test.
pub fn test() {
    let _ = fmt().with_env_filter(env_filter()).try_init();
}

fn env_configured() -> bool {
    env::var("SABLE_LOG").is_ok() || env::var("RUST_LOG").is_ok()
}

/// Build the filter from the environment: `SABLE_LOG` > `RUST_LOG` > defaults.
fn env_filter() -> EnvFilter {
    if let Ok(sable_log) = env::var("SABLE_LOG") {
        return EnvFilter::new(expand_sable_log(&sable_log));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(expand_sable_log("info"))
}

/// Expand `SABLE_LOG` values into full tracing filter strings.
///
/// A bare level like `debug` becomes `warn,sable_diagnostics=debug,...`;
/// anything with directive syntax (`=`, `,` or `:`) is used as-is.
fn expand_sable_log(sable_log: &str) -> String {
    if sable_log.contains('=') || sable_log.contains(':') || sable_log.contains(',') {
        return sable_log.to_string();
    }

    let mut filter = String::from("warn");
    for krate in SABLE_CRATES {
        filter.push_str(&format!(",{krate}={sable_log}"));
    }
    filter
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let default_filename = format!("sable-{}.log", std::process::id());

    match override_path {
        // A path with an extension names the file itself; a bare directory
        // gets the default filename.
        Some(path) if path.extension().is_some() => {
            let dir = path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(default_filename);
            (dir, name)
        }
        Some(dir) => (dir, default_filename),
        None => {
            let dir = dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sable")
                .join("logs");
            (dir, default_filename)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_expands_to_sable_crates() {
        let filter = expand_sable_log("debug");
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("sable_diagnostics=debug"));
        assert!(filter.contains("sable_bin=debug"));
    }

    #[test]
    fn directive_syntax_is_used_verbatim() {
        let filter = expand_sable_log("sable_diagnostics=trace,sable_bin=debug");
        assert_eq!(filter, "sable_diagnostics=trace,sable_bin=debug");
    }

    #[test]
    fn file_override_splits_into_dir_and_name() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("/tmp/logs/run.log")));
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn directory_override_keeps_default_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let (dir, name) = resolve_log_path(Some(tmp.path().to_path_buf()));
        assert_eq!(dir, tmp.path());
        assert!(name.starts_with("sable-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_init_is_reentrant() {
        test();
        test();
    }
}
