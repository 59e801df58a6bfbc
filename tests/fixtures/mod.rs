//! Shared helpers for logger tests

#![allow(dead_code)]

pub mod writers;

use app_logger::LoggingConfig;
use std::path::Path;

/// Default configuration with the file sink pointed into `dir`
/// and console colors off so output can be matched as plain text.
pub fn test_config(dir: &Path) -> LoggingConfig {
    let mut config = LoggingConfig::default();
    config.file.filename = dir.join("app.log").to_string_lossy().into_owned();
    config.console.colorize = false;
    config
}
