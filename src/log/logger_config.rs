use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    log::{
        log_level::LogLevel,
        log_target::LogTarget,
        logger_error::{ConfigError, LoggerError},
    },
};

/// Section of the configuration file the logger reads.
pub const LOGGING_SECTION: &str = "Logging";

pub const DEFAULT_LOG_PATH: &str = "./log";

/// Everything a [`Logger`](crate::log::Logger) needs at start-up.
///
/// `queue_capacity` of 0 or 1 selects synchronous mode; anything larger
/// selects asynchronous mode with that bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub target: LogTarget,
    pub min_level: LogLevel,
    pub path: PathBuf,
    pub queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::Terminal,
            min_level: LogLevel::Debug,
            path: PathBuf::from(DEFAULT_LOG_PATH),
            queue_capacity: 0,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new(target: LogTarget, min_level: LogLevel) -> Self {
        Self {
            target,
            min_level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.queue_capacity > 1
    }

    /// Builds a config from the `[Logging]` section, using defaults for
    /// missing keys.
    ///
    /// Keys: `target`, `level`, `path`, `queue_capacity`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if a present value cannot be parsed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(target) = config.get_non_empty(LOGGING_SECTION, "target") {
            out.target = target.parse()?;
        }
        if let Some(level) = config.get_non_empty(LOGGING_SECTION, "level") {
            out.min_level = level.parse()?;
        }
        if let Some(path) = config.get_non_empty(LOGGING_SECTION, "path") {
            out.path = expand_path(path);
        }
        if let Some(cap) = config.get_non_empty(LOGGING_SECTION, "queue_capacity") {
            out.queue_capacity = cap
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(cap.to_string()))?;
        }
        Ok(out)
    }

    /// Reads the configuration file at `path` and builds a config from its
    /// `[Logging]` section.
    ///
    /// # Errors
    /// [`LoggerError::Config`] if the file cannot be read or a value is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let config = Config::load(path)?;
        Ok(Self::from_config(&config)?)
    }
}

/// Expands a leading tilde (`~`) to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if let Some(rest) = path_str
                .strip_prefix("~/")
                .or_else(|| path_str.strip_prefix("~\\"))
            {
                home_path.push(rest);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}
