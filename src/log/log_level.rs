use std::{fmt, str::FromStr};

use crate::log::logger_error::ConfigError;

/// Defines the severity levels for log messages.
///
/// Ordering follows severity, so `LogLevel::Debug < LogLevel::Fatal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Fine-grained events that are mostly useful while debugging.
    #[default]
    Debug = 0,
    /// Progress of the application at a coarse-grained level.
    Info = 1,
    /// Potentially harmful situations.
    Warning = 2,
    /// Error events that might still allow the application to keep running.
    Error = 3,
    /// Severe errors. Logging at this level does not abort the process.
    Fatal = 4,
}

impl LogLevel {
    /// Fixed-width tag that prefixes every rendered line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]   ",
            Self::Info => "[INFO]    ",
            Self::Warning => "[WARNING] ",
            Self::Error => "[ERROR]   ",
            Self::Fatal => "[FATAL]   ",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warning,
            3 => Self::Error,
            _ => Self::Fatal,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ConfigError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn ordering_follows_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn u8_conversion_is_lossless() {
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
        ] {
            assert_eq!(LogLevel::from_u8(level.as_u8()), level);
        }
    }

    #[test]
    fn parses_config_spellings() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(ConfigError::InvalidLevel(_))
        ));
    }

    #[test]
    fn tags_share_a_width() {
        let width = LogLevel::Debug.tag().len();
        assert_eq!(LogLevel::Warning.tag().len(), width);
        assert_eq!(LogLevel::Fatal.tag().len(), width);
    }
}
