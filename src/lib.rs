//! rustylog is a process-local logger for files and the terminal.
//!
//! Records are written synchronously, or, when the queue capacity is above
//! one, buffered through a bounded blocking queue that a single background
//! worker drains. Shutdown drains the queue before the sinks are closed.
//!
//! ```no_run
//! use rustylog::log::{LogLevel, LogSink, LogTarget, Logger, LoggerConfig};
//!
//! let logger = Logger::init(
//!     LoggerConfig::new(LogTarget::FileAndTerminal, LogLevel::Info)
//!         .with_path("app.log")
//!         .with_queue_capacity(1024),
//! )?;
//! logger.info("app started");
//! rustylog::logger_warn!(logger, "{} retries left", 3);
//! logger.shutdown();
//! # Ok::<(), rustylog::log::LoggerError>(())
//! ```

/// Reads INI-style configuration files.
pub mod config;
/// Logger, bounded queue, drain worker and sinks.
pub mod log;
