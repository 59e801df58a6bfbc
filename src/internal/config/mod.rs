#[path = "_config.rs"]
pub mod config;

pub use self::config::{
    get_version_info, ConsoleSinkConfig, FileSinkConfig, LoggingConfig, DEFAULT_LOG_FILE,
    DEFAULT_MAX_FILES, DEFAULT_MAX_SIZE, VERSION,
};
