use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::internal::logger::Severity;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LOG_FILE: &str = "logs/app.log";
/// 5 MiB
pub const DEFAULT_MAX_SIZE: u64 = 5_242_880;
pub const DEFAULT_MAX_FILES: usize = 5;

/// Get version information
pub fn get_version_info() -> String {
    format!("app-logger version {}", VERSION)
}

/// File sink: structured records, size-based rotation, no colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileSinkConfig {
    pub level: Severity,
    pub filename: String,
    pub handle_exceptions: bool,
    pub json: bool,
    /// Rotation threshold in bytes.
    pub max_size: u64,
    /// Rotated generations kept next to the active file.
    pub max_files: usize,
    pub colorize: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            level: Severity::Warn,
            filename: DEFAULT_LOG_FILE.to_string(),
            handle_exceptions: true,
            json: true,
            max_size: DEFAULT_MAX_SIZE,
            max_files: DEFAULT_MAX_FILES,
            colorize: false,
        }
    }
}

/// Console sink: human readable, colored by severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    pub level: Severity,
    pub handle_exceptions: bool,
    pub json: bool,
    pub colorize: bool,
    /// Levels written to stderr instead of stdout.
    pub stderr_levels: Vec<Severity>,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            level: Severity::Debug,
            handle_exceptions: true,
            json: false,
            colorize: true,
            stderr_levels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: FileSinkConfig,
    pub console: ConsoleSinkConfig,
    /// Terminate the process after logging an uncaught panic.
    pub exit_on_error: bool,
}

impl LoggingConfig {
    /// Load the configuration, layering `path` (yaml, toml or json) over the
    /// built-in defaults when given.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config: LoggingConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.filename.trim().is_empty() {
            return Err(ConfigError::Message(
                "file.filename must not be empty".to_string(),
            ));
        }
        if self.file.max_size == 0 {
            return Err(ConfigError::Message(
                "file.max_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Least severe level accepted by any sink.
    pub fn most_verbose_level(&self) -> Severity {
        self.file.level.max(self.console.level)
    }
}
