use crate::log::{log_level::LogLevel, source_location::SourceLocation};

/// Anything that accepts log records.
///
/// Components hold an `Arc<dyn LogSink>` so they can be handed the real
/// logger in production and a [`NoopLogSink`](crate::log::NoopLogSink) in tests.
/// Only [`log`](Self::log) is required; the leveled helpers record the
/// caller's location.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, location: SourceLocation);

    #[track_caller]
    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg, SourceLocation::caller());
    }

    #[track_caller]
    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg, SourceLocation::caller());
    }

    #[track_caller]
    fn warning(&self, msg: &str) {
        self.log(LogLevel::Warning, msg, SourceLocation::caller());
    }

    #[track_caller]
    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg, SourceLocation::caller());
    }

    #[track_caller]
    fn fatal(&self, msg: &str) {
        self.log(LogLevel::Fatal, msg, SourceLocation::caller());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::log::NoopLogSink;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture(Mutex<Vec<(LogLevel, String, SourceLocation)>>);

    impl LogSink for Capture {
        fn log(&self, level: LogLevel, msg: &str, location: SourceLocation) {
            self.0.lock().unwrap().push((level, msg.to_string(), location));
        }
    }

    #[test]
    fn leveled_helpers_pass_level_and_call_site() {
        let sink = Capture::default();
        sink.debug("d");
        sink.fatal("f");

        let seen = sink.0.lock().unwrap();
        assert_eq!(seen[0].0, LogLevel::Debug);
        assert_eq!(seen[1].0, LogLevel::Fatal);
        assert_eq!(seen[1].1, "f");
        assert!(seen[1].2.file.ends_with("log_sink.rs"));
        assert_eq!(seen[1].2.line, seen[0].2.line + 1);
    }

    #[test]
    fn noop_sink_swallows_everything() {
        let sink: Arc<dyn LogSink> = Arc::new(NoopLogSink);
        sink.info("ignored");
        crate::sink_error!(sink, "also {}", "ignored");
    }
}
