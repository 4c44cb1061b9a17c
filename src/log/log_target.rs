use std::{fmt, str::FromStr};

use crate::log::logger_error::ConfigError;

/// Where formatted lines end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LogTarget {
    File = 0,
    #[default]
    Terminal = 1,
    FileAndTerminal = 2,
}

impl LogTarget {
    #[must_use]
    pub const fn writes_file(self) -> bool {
        matches!(self, Self::File | Self::FileAndTerminal)
    }

    #[must_use]
    pub const fn writes_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::FileAndTerminal)
    }

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::File,
            1 => Self::Terminal,
            _ => Self::FileAndTerminal,
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Terminal => "terminal",
            Self::FileAndTerminal => "file_and_terminal",
        };
        f.write_str(s)
    }
}

impl FromStr for LogTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" | "stdout" => Ok(Self::Terminal),
            "file_and_terminal" | "both" => Ok(Self::FileAndTerminal),
            _ => Err(ConfigError::InvalidTarget(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn routing_flags() {
        assert!(LogTarget::File.writes_file());
        assert!(!LogTarget::File.writes_terminal());
        assert!(!LogTarget::Terminal.writes_file());
        assert!(LogTarget::FileAndTerminal.writes_file());
        assert!(LogTarget::FileAndTerminal.writes_terminal());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for t in [LogTarget::File, LogTarget::Terminal, LogTarget::FileAndTerminal] {
            assert_eq!(t.to_string().parse::<LogTarget>().unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_target() {
        assert!(matches!(
            "syslog".parse::<LogTarget>(),
            Err(ConfigError::InvalidTarget(_))
        ));
    }
}
