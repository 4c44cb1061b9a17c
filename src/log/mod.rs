pub mod bounded_queue;
pub mod drain_worker;
pub mod log_level;
pub mod log_macros;
pub mod log_msg;
pub mod log_sink;
pub mod log_target;
pub mod logger;
pub mod logger_config;
pub mod logger_error;
pub mod logger_handle;
pub mod noop_log_sink;
pub mod sink_set;
pub mod source_location;


pub use bounded_queue::{BoundedQueue, PushError};
pub use drain_worker::{DrainWorker, QueuedLine};
pub use log_level::LogLevel;
pub use log_msg::LogMsg;
pub use log_sink::LogSink;
pub use log_target::LogTarget;
pub use logger::{Logger, LoggerMode, LoggerState};
pub use logger_config::LoggerConfig;
pub use logger_error::{ConfigError, LoggerError};
pub use logger_handle::LoggerHandle;
pub use noop_log_sink::NoopLogSink;
pub use sink_set::SinkSet;
pub use source_location::SourceLocation;
