use std::sync::Arc;

use crate::log::{
    log_level::LogLevel,
    log_sink::LogSink,
    logger::{LoggerCore, LoggerState},
    source_location::SourceLocation,
};

/// Lightweight, cloneable handle to the process logger.
///
/// Submissions behave exactly like [`Logger::submit`](crate::log::Logger::submit).
/// A handle never keeps the logger alive past its shutdown: once the owning
/// `Logger` has shut down, records sent through a handle are dropped.
///
/// # Examples
/// ```ignore
/// // Usually you obtain it via: let handle = logger.handle();
/// handle.info("started task");
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    pub(super) core: Arc<LoggerCore>,
}

impl LoggerHandle {
    pub fn submit(&self, text: impl Into<String>, level: LogLevel, location: SourceLocation) {
        self.core.submit(text, level, location);
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.core.level()
    }

    /// `true` until the owning logger starts shutting down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.core.state() == LoggerState::Running
    }
}

impl LogSink for LoggerHandle {
    #[inline]
    fn log(&self, level: LogLevel, msg: &str, location: SourceLocation) {
        self.core.submit(msg, level, location);
    }
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("state", &self.core.state())
            .finish()
    }
}
