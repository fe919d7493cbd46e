//! File logging for the terminal host. The TUI owns stdout, so events go to a file.

use crate::core::constants::LOG_FILE_NAME;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// `shark-runner.log` in the system temp dir.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Truncate and open the log file.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging(path: &Path) -> io::Result<()> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_is_in_temp_dir() {
        let path = default_log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn test_open_log_file_truncates() {
        let path =
            std::env::temp_dir().join(format!("shark-runner-log-{}.log", std::process::id()));
        std::fs::write(&path, "stale").unwrap();
        open_log_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_log_file_in_missing_dir_fails() {
        let err = open_log_file(Path::new("/nonexistent/dir/shark.log")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
