//! Tracing subscriber setup.
//!
//! The interactive game owns the terminal, so its logs go to a file or
//! nowhere. Headless commands log to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Discard everything.
    Off,
    Stderr,
    /// Append to this file.
    File(PathBuf),
}

/// Error while installing the global subscriber.
#[derive(Debug)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    OpenFile { path: PathBuf, source: io::Error },
    /// A global subscriber was already installed.
    AlreadyInitialized(String),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::OpenFile { path, source } => {
                write!(f, "Cannot open log file {}: {}", path.display(), source)
            }
            LoggingError::AlreadyInitialized(msg) => {
                write!(f, "Logging already initialized: {}", msg)
            }
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::OpenFile { source, .. } => Some(source),
            LoggingError::AlreadyInitialized(_) => None,
        }
    }
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber with a compact format.
pub fn init_logging(level: LevelFilter, target: LogTarget) -> Result<(), LoggingError> {
    let filter = Targets::new().with_default(level);
    let format = tracing_subscriber::fmt::format().with_target(false).compact();

    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(format)
                    .with_writer(io::stderr),
            )
            .with(filter)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .event_format(format)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .try_init()
        }
    };

    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn open_log_file_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.log");
        assert!(!path.exists());

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn open_log_file_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.log");
        std::fs::write(&path, "first\n").unwrap();

        let mut file = open_log_file(&path).unwrap();
        file.write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn open_log_file_in_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/game.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(matches!(err, LoggingError::OpenFile { .. }));
        assert!(err.to_string().contains("game.log"));
    }

    #[test]
    fn off_target_installs_nothing() {
        assert!(init_logging(LevelFilter::INFO, LogTarget::Off).is_ok());
    }
}
