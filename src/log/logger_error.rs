use std::{fmt, io, path::PathBuf};

/// Errors raised while turning configuration text into a [`LoggerConfig`].
///
/// [`LoggerConfig`]: crate::log::LoggerConfig
#[derive(Debug)]
pub enum ConfigError {
    Read(String),
    InvalidLevel(String),
    InvalidTarget(String),
    InvalidCapacity(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "cannot read configuration: {msg}"),
            Self::InvalidLevel(s) => write!(f, "unknown log level: {s:?}"),
            Self::InvalidTarget(s) => write!(f, "unknown log target: {s:?}"),
            Self::InvalidCapacity(s) => write!(f, "invalid queue capacity: {s:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while bringing a logger up or reconfiguring it.
///
/// Record submission never fails; only setup and target changes report errors.
#[derive(Debug)]
pub enum LoggerError {
    /// The file sink could not be opened in append mode.
    OpenFile { path: PathBuf, source: io::Error },
    Config(ConfigError),
    /// The drain worker thread could not be spawned.
    Spawn(io::Error),
    /// The logger has already shut down.
    Closed,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFile { path, source } => {
                write!(f, "Error opening log file {}: {source}", path.display())
            }
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Spawn(e) => write!(f, "failed to spawn logger worker: {e}"),
            Self::Closed => write!(f, "logger is shut down"),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenFile { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            Self::Spawn(e) => Some(e),
            Self::Closed => None,
        }
    }
}

impl From<ConfigError> for LoggerError {
    fn from(err: ConfigError) -> Self {
        LoggerError::Config(err)
    }
}
