use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::log::{bounded_queue::BoundedQueue, log_target::LogTarget, sink_set::SinkSet};

pub const WORKER_THREAD_NAME: &str = "logger-worker";

/// A rendered line on its way through the queue.
///
/// The target is captured at submission time so a later `set_target` does not
/// reroute lines that are already queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedLine {
    pub target: LogTarget,
    pub line: String,
}

/// The single consumer of a logger's queue.
///
/// Pops lines and writes them to the shared sinks until the queue reports
/// closed-and-empty.
pub struct DrainWorker {
    handle: JoinHandle<u64>,
}

impl DrainWorker {
    /// Spawns the `logger-worker` thread.
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be created.
    pub fn spawn(queue: Arc<BoundedQueue<QueuedLine>>, sinks: Arc<SinkSet>) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || {
                let mut drained: u64 = 0;
                while let Some(QueuedLine { target, line }) = queue.pop() {
                    sinks.write_line(target, &line);
                    drained = drained.wrapping_add(1);
                }
                drained
            })?;
        Ok(Self { handle })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker to exit and returns how many lines it wrote.
    ///
    /// # Errors
    /// Returns the panic payload if the worker panicked.
    pub fn join(self) -> thread::Result<u64> {
        self.handle.join()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::{
        sync::Mutex,
        time::{Duration, Instant},
    };

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl io::Write for Lines {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn queued(line: &str) -> QueuedLine {
        QueuedLine {
            target: LogTarget::Terminal,
            line: line.to_string(),
        }
    }

    #[test]
    fn drains_in_order_then_exits_on_close() {
        let out = Lines::default();
        let sinks = Arc::new(SinkSet::new(Box::new(out.clone())));
        let queue = Arc::new(BoundedQueue::new(8));
        let worker = DrainWorker::spawn(Arc::clone(&queue), sinks).unwrap();

        for l in ["one\n", "two\n", "three\n"] {
            queue.push(queued(l)).unwrap();
        }

        let deadline = Instant::now() + Duration::from_secs(2);
        while !queue.is_empty() && Instant::now() < deadline {
            queue.flush();
            thread::yield_now();
        }
        queue.close();

        assert_eq!(worker.join().unwrap(), 3);
        assert_eq!(*out.0.lock().unwrap(), ["one\n", "two\n", "three\n"]);
    }

    #[test]
    fn exits_when_closed_while_idle() {
        let sinks = Arc::new(SinkSet::new(Box::new(io::sink())));
        let queue = Arc::new(BoundedQueue::new(2));
        let worker = DrainWorker::spawn(Arc::clone(&queue), sinks).unwrap();

        queue.close();
        assert_eq!(worker.join().unwrap(), 0);
    }
}
