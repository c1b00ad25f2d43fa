//! Runtime configuration resolved from the environment.

use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "logs/gradebook.log";

/// Where and how verbosely to log.
///
/// Values come from the process environment, which `main` seeds from a
/// `.env` file when one is present:
///
/// | Variable        | Default               |
/// |-----------------|-----------------------|
/// | `LOG_FILE_PATH` | `logs/gradebook.log`  |
/// | `RUST_LOG`      | `warn` (stderr)       |
/// | `RUST_LOG_JSON` | `debug` (log file)    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_file_name: String,
    pub stderr_default: String,
    pub file_default: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_path(DEFAULT_LOG_FILE)
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FILE_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => Self::default(),
        }
    }

    fn from_path(path: &str) -> Self {
        let path = Path::new(path);
        let log_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
            .to_path_buf();
        let log_file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("gradebook.log")
            .to_string();

        LogConfig {
            log_dir,
            log_file_name,
            stderr_default: "warn".to_string(),
            file_default: "debug".to_string(),
        }
    }
}
