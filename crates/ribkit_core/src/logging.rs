//! Logging bootstrap for embedding applications.
//!
//! # Responsibility
//! - Initialize file-based rolling logs once per process.
//! - Keep diagnostic events metadata-only.
//!
//! # Invariants
//! - Initialization is idempotent for an identical configuration.
//! - Conflicting re-initialization is rejected, never silently applied.
//! - Handler errors are never logged by the core; they propagate to the
//!   caller of `trigger`.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "ribkit";
const MAX_LOG_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();

struct ActiveLogging {
    level: &'static str,
    directory: PathBuf,
    _handle: LoggerHandle,
}

/// Logging bootstrap errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    AlreadyInitialized { active: String, requested: String },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidDirectory(detail) => write!(f, "invalid log directory: {detail}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized ({active}); refusing to switch to ({requested})"
            ),
            Self::Backend(detail) => write!(f, "logger backend failed: {detail}"),
        }
    }
}

impl Error for LoggingError {}

/// Initializes rolling file logs for the embedding process.
///
/// Repeated calls with the same level and directory are idempotent;
/// conflicting calls fail with [`LoggingError::AlreadyInitialized`].
pub fn init_logging(level: &str, directory: &Path) -> Result<(), LoggingError> {
    let level = canonical_level(level)?;
    let directory = canonical_directory(directory)?;

    if let Some(active) = ACTIVE.get() {
        return check_matches(active, level, &directory);
    }

    let dir = directory.clone();
    let state = ACTIVE.get_or_try_init(|| start_logger(level, dir))?;
    check_matches(state, level, &directory)
}

/// Returns `(level, directory)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.directory.clone()))
}

/// Default level per build mode: `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, directory: PathBuf) -> Result<ActiveLogging, LoggingError> {
    std::fs::create_dir_all(&directory).map_err(|err| {
        LoggingError::InvalidDirectory(format!("{}: {err}", directory.display()))
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(directory.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    info!(
        "event=logging_init module=logging status=ok level={} dir={} version={}",
        level,
        directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level,
        directory,
        _handle: handle,
    })
}

fn check_matches(
    active: &ActiveLogging,
    level: &'static str,
    directory: &Path,
) -> Result<(), LoggingError> {
    if active.level == level && active.directory == directory {
        return Ok(());
    }
    Err(LoggingError::AlreadyInitialized {
        active: format!("{} at {}", active.level, active.directory.display()),
        requested: format!("{} at {}", level, directory.display()),
    })
}

fn canonical_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn canonical_directory(directory: &Path) -> Result<PathBuf, LoggingError> {
    if directory.as_os_str().is_empty() {
        return Err(LoggingError::InvalidDirectory(
            "directory must not be empty".to_string(),
        ));
    }
    Ok(directory.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{canonical_directory, canonical_level, init_logging, logging_status, LoggingError};
    use std::path::Path;

    #[test]
    fn canonical_level_accepts_known_values() {
        assert_eq!(canonical_level("INFO").expect("INFO normalizes"), "info");
        assert_eq!(
            canonical_level(" warning ").expect("warning normalizes"),
            "warn"
        );
    }

    #[test]
    fn canonical_level_rejects_unknown_value() {
        let err = canonical_level("loud").expect_err("unknown level must fail");
        assert!(matches!(err, LoggingError::UnsupportedLevel(_)));
    }

    #[test]
    fn canonical_directory_rejects_empty_path() {
        let err = canonical_directory(Path::new("")).expect_err("empty path must fail");
        assert!(matches!(err, LoggingError::InvalidDirectory(_)));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let other = tempfile::tempdir().expect("other temp dir");

        init_logging("info", dir.path()).expect("first init");
        init_logging("info", dir.path()).expect("same config is idempotent");

        let level_conflict =
            init_logging("debug", dir.path()).expect_err("level conflict must fail");
        assert!(matches!(
            level_conflict,
            LoggingError::AlreadyInitialized { .. }
        ));

        let dir_conflict =
            init_logging("info", other.path()).expect_err("directory conflict must fail");
        assert!(matches!(
            dir_conflict,
            LoggingError::AlreadyInitialized { .. }
        ));

        let (level, active_dir) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir.path());
    }
}
