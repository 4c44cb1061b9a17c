use chrono::{DateTime, Local};

use crate::log::{log_level::LogLevel, source_location::SourceLocation};

/// Timestamp layout used in every rendered line and in the file banners.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Represents a single log record before it is rendered.
///
/// This struct encapsulates the metadata associated with a log entry,
/// including its severity, timestamp, call site, and the message content itself.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// The severity level of the record.
    pub level: LogLevel,
    /// Wall-clock time the record was created.
    pub ts: DateTime<Local>,
    /// The actual content of the log message.
    pub text: String,
    /// Where the record was emitted from.
    pub location: SourceLocation,
}

impl LogMsg {
    /// Creates a new `LogMsg` stamped with the current local time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustylog::log::{LogLevel, LogMsg, SourceLocation};
    ///
    /// let msg = LogMsg::new(
    ///     LogLevel::Info,
    ///     "Connection established",
    ///     SourceLocation::new(file!(), line!(), module_path!()),
    /// );
    /// assert!(msg.render().contains("Connection established"));
    /// ```
    pub fn new(level: LogLevel, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            level,
            ts: Local::now(),
            text: text.into(),
            location,
        }
    }

    /// Renders the record as one newline-terminated line:
    ///
    /// `[LEVEL]   YYYY-MM-DD HH:MM:SS.uuuuuu - file - module() - Line N: text`
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}{} - {}: {}\n",
            self.level.tag(),
            self.ts.format(TIMESTAMP_FORMAT),
            self.location,
            self.text
        )
    }
}

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn current_time() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_a_single_terminated_line() {
        let msg = LogMsg::new(
            LogLevel::Warning,
            "disk almost full",
            SourceLocation::new("src/disk.rs", 7, "app::disk"),
        );
        let line = msg.render();

        assert!(line.starts_with("[WARNING] "));
        assert!(line.ends_with(": disk almost full\n"));
        assert!(line.contains("src/disk.rs - app::disk() - Line 7"));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn current_time_has_microseconds() {
        let ts = current_time();
        let (_, frac) = ts.rsplit_once('.').unwrap_or(("", ""));
        assert_eq!(frac.len(), 6);
    }
}
