use crate::log::{
    bounded_queue::BoundedQueue,
    drain_worker::{DrainWorker, QueuedLine},
    log_level::LogLevel,
    log_msg::{LogMsg, current_time},
    log_sink::LogSink,
    log_target::LogTarget,
    logger_config::LoggerConfig,
    logger_error::LoggerError,
    logger_handle::LoggerHandle,
    sink_set::SinkSet,
    source_location::SourceLocation,
};

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU8, Ordering},
    },
    thread,
};

const RUNNING: u8 = 0;
const SHUTTING_DOWN: u8 = 1;
const CLOSED: u8 = 2;

/// How records reach the sinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerMode {
    /// Every record is written by the submitting thread.
    Sync,
    /// Records go through a bounded queue drained by the worker thread.
    Async { capacity: usize },
}

/// Lifecycle of a [`Logger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerState {
    Running,
    ShuttingDown,
    Closed,
}

/// State shared between a [`Logger`] and its handles.
pub(crate) struct LoggerCore {
    level: AtomicU8,
    target: AtomicU8,
    state: AtomicU8,
    path: PathBuf,
    sinks: Arc<SinkSet>,
    queue: Option<Arc<BoundedQueue<QueuedLine>>>,
}

impl LoggerCore {
    pub(crate) fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub(crate) fn target(&self) -> LogTarget {
        LogTarget::from_u8(self.target.load(Ordering::Relaxed))
    }

    pub(crate) fn state(&self) -> LoggerState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => LoggerState::Running,
            SHUTTING_DOWN => LoggerState::ShuttingDown,
            _ => LoggerState::Closed,
        }
    }

    /// Filters, renders and routes one record. Never fails.
    pub(crate) fn submit(&self, text: impl Into<String>, level: LogLevel, location: SourceLocation) {
        if level < self.level() || self.state.load(Ordering::Acquire) != RUNNING {
            return;
        }

        let target = self.target();
        let line = LogMsg::new(level, text, location).render();

        // Best-effort fast path: the fullness check and the push are not
        // atomic, so the push may still block briefly under contention.
        if let Some(queue) = &self.queue {
            if !queue.is_full() {
                match queue.push(QueuedLine { target, line }) {
                    Ok(()) => return,
                    Err(rejected) => {
                        // Queue closed under us; the sinks drop it if already closed.
                        let QueuedLine { target, line } = rejected.into_inner();
                        self.sinks.write_line(target, &line);
                        return;
                    }
                }
            }
        }

        self.sinks.write_line(target, &line);
    }
}

/// Process logger writing to a file, the terminal, or both.
///
/// Created once by the application's composition root. Call sites receive a
/// cloneable [`LoggerHandle`] (or an `Arc<dyn LogSink>`) instead of reaching
/// for a global.
///
/// # Architecture
///
/// 1. **Producers**: any thread calls [`submit`](Self::submit) or a leveled helper.
/// 2. **Queue**: in async mode a [`BoundedQueue`] buffers rendered lines; when it
///    is full the caller writes synchronously instead.
/// 3. **Consumer**: a single `logger-worker` thread drains the queue into the sinks.
/// 4. **Sinks**: one mutex serializes every write from both paths.
///
/// Records taking the synchronous fallback can overtake records still queued.
///
/// Dropping the logger runs [`shutdown`](Self::shutdown).
pub struct Logger {
    core: Arc<LoggerCore>,
    mode: LoggerMode,
    worker: Mutex<Option<DrainWorker>>,
}

impl Logger {
    /// Opens the configured sinks and, for capacities above one, starts the
    /// drain worker.
    ///
    /// Terminal output goes to stdout.
    ///
    /// # Errors
    /// [`LoggerError::OpenFile`] if the target needs a file and it cannot be
    /// opened; [`LoggerError::Spawn`] if the worker thread cannot start.
    pub fn init(config: LoggerConfig) -> Result<Self, LoggerError> {
        let sinks = SinkSet::stdout();
        if config.target.writes_file() {
            sinks.open_file(&config.path)?;
        }
        Self::with_sinks(config, sinks)
    }

    /// Like [`init`](Self::init) but with caller-provided sinks.
    ///
    /// No file is opened here; attach one to `sinks` beforehand if the target
    /// needs it.
    ///
    /// # Errors
    /// [`LoggerError::Spawn`] if the worker thread cannot start.
    pub fn with_sinks(config: LoggerConfig, sinks: SinkSet) -> Result<Self, LoggerError> {
        let sinks = Arc::new(sinks);

        let (mode, queue, worker) = if config.is_async() {
            let queue = Arc::new(BoundedQueue::new(config.queue_capacity));
            let worker = DrainWorker::spawn(Arc::clone(&queue), Arc::clone(&sinks))
                .map_err(LoggerError::Spawn)?;
            (
                LoggerMode::Async {
                    capacity: config.queue_capacity,
                },
                Some(queue),
                Some(worker),
            )
        } else {
            (LoggerMode::Sync, None, None)
        };

        let core = LoggerCore {
            level: AtomicU8::new(config.min_level.as_u8()),
            target: AtomicU8::new(config.target.as_u8()),
            state: AtomicU8::new(RUNNING),
            path: config.path,
            sinks,
            queue,
        };

        Ok(Self {
            core: Arc::new(core),
            mode,
            worker: Mutex::new(worker),
        })
    }

    /// Submits one record. Records below the minimum level, and records
    /// submitted after shutdown has begun, are dropped.
    pub fn submit(&self, text: impl Into<String>, level: LogLevel, location: SourceLocation) {
        self.core.submit(text, level, location);
    }

    /// Cloneable handle for call sites on other threads.
    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        LoggerHandle {
            core: Arc::clone(&self.core),
        }
    }

    /// Changes the minimum level for subsequent records.
    pub fn set_level(&self, level: LogLevel) {
        self.core.level.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.core.level()
    }

    /// Changes the destination of subsequent records. Lines already queued
    /// keep the target they were submitted with.
    ///
    /// Opens the configured log file if the new target needs one that is not
    /// open yet.
    ///
    /// # Errors
    /// [`LoggerError::OpenFile`] if that file cannot be opened;
    /// [`LoggerError::Closed`] once shutdown has begun. The target is left
    /// unchanged in both cases.
    pub fn set_target(&self, target: LogTarget) -> Result<(), LoggerError> {
        if self.core.state() != LoggerState::Running {
            return Err(LoggerError::Closed);
        }
        if target.writes_file() {
            self.core.sinks.open_file(&self.core.path)?;
        }
        self.core.target.store(target.as_u8(), Ordering::Relaxed);
        Ok(())
    }

    #[must_use]
    pub fn target(&self) -> LogTarget {
        self.core.target()
    }

    #[must_use]
    pub const fn mode(&self) -> LoggerMode {
        self.mode
    }

    #[must_use]
    pub fn state(&self) -> LoggerState {
        self.core.state()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.core.path
    }

    /// Lines currently waiting in the queue; always 0 in sync mode.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.core.queue.as_ref().map_or(0, |q| q.len())
    }

    /// Current local time as rendered in log lines.
    #[must_use]
    pub fn current_time(&self) -> String {
        current_time()
    }

    /// Drains the queue, stops the worker and closes the sinks.
    ///
    /// Order: wake the worker until the queue is empty, close the queue, join
    /// the worker, then write the closing banner and release the sinks. Only
    /// the first call does anything.
    pub fn shutdown(&self) {
        if self
            .core
            .state
            .compare_exchange(RUNNING, SHUTTING_DOWN, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let (Some(queue), Some(worker)) = (&self.core.queue, worker) {
            while !queue.is_empty() && !worker.is_finished() {
                queue.flush();
                thread::yield_now();
            }
            queue.close();
            if worker.join().is_err() {
                self.core.sinks.write_line(
                    LogTarget::FileAndTerminal,
                    &LogMsg::new(
                        LogLevel::Error,
                        "logger worker panicked; queued records may be lost",
                        SourceLocation::caller(),
                    )
                    .render(),
                );
            }
        }

        self.core.sinks.close();
        self.core.state.store(CLOSED, Ordering::Release);
    }
}

impl LogSink for Logger {
    fn log(&self, level: LogLevel, msg: &str, location: SourceLocation) {
        self.core.submit(msg, level, location);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("mode", &self.mode)
            .field("level", &self.level())
            .field("target", &self.target())
            .field("state", &self.state())
            .field("path", &self.core.path)
            .finish()
    }
}
