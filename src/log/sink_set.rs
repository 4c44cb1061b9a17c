use std::{
    fs::OpenOptions,
    io::{self, BufWriter, Write},
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::log::{log_msg::current_time, log_target::LogTarget, logger_error::LoggerError};

// -----------------------------------------------------------------------------
// COMPILE-TIME CONFIGURATION
// -----------------------------------------------------------------------------

/// Flush the file every 100 lines when debugging (to see crashes near real-time).
#[cfg(feature = "log-debug")]
const FLUSH_BATCH_SIZE: u32 = 100;

/// Flush the file every 1000 lines otherwise (to save I/O).
#[cfg(not(feature = "log-debug"))]
const FLUSH_BATCH_SIZE: u32 = 1_000;

// -----------------------------------------------------------------------------

const BANNER_RULE: &str = "====================";

type BoxedWriter = Box<dyn Write + Send>;

struct Sinks {
    file: Option<BufWriter<BoxedWriter>>,
    terminal: Option<BoxedWriter>,
    lines_since_flush: u32,
    closed: bool,
}

/// The output handles shared by the drain worker and the synchronous path.
///
/// Every write goes through one mutex, so lines from concurrent writers never
/// interleave. Once [`close`](Self::close) has run, writes are dropped.
pub struct SinkSet {
    inner: Mutex<Sinks>,
}

impl SinkSet {
    /// Sink set writing terminal output to `terminal` and with no file yet.
    #[must_use]
    pub fn new(terminal: BoxedWriter) -> Self {
        Self {
            inner: Mutex::new(Sinks {
                file: None,
                terminal: Some(terminal),
                lines_since_flush: 0,
                closed: false,
            }),
        }
    }

    /// Sink set bound to the process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn lock(&self) -> MutexGuard<'_, Sinks> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens `path` in append mode (creating it if needed) as the file sink.
    ///
    /// Does nothing if a file sink is already attached. The check and the
    /// install happen under the sink lock, so concurrent callers open the
    /// file once.
    ///
    /// # Errors
    /// [`LoggerError::OpenFile`] if the file cannot be opened;
    /// [`LoggerError::Closed`] if the sinks are already closed, in which case
    /// nothing is created on disk.
    pub fn open_file(&self, path: &Path) -> Result<(), LoggerError> {
        let mut sinks = self.lock();
        if sinks.closed {
            return Err(LoggerError::Closed);
        }
        if sinks.file.is_some() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        sinks.file = Some(with_open_banner(Box::new(file)));
        Ok(())
    }

    /// Installs `writer` as the file sink and writes the opening banner to it.
    ///
    /// Replaces any file sink already attached. Ignored after close.
    pub fn attach_file(&self, writer: BoxedWriter) {
        let mut sinks = self.lock();
        if sinks.closed {
            return;
        }
        sinks.file = Some(with_open_banner(writer));
    }

    #[must_use]
    pub fn has_file(&self) -> bool {
        self.lock().file.is_some()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Writes one rendered line to the sinks `target` selects.
    ///
    /// I/O errors are swallowed; logging never fails the caller.
    pub fn write_line(&self, target: LogTarget, line: &str) {
        let mut sinks = self.lock();
        if sinks.closed {
            return;
        }

        if target.writes_terminal() {
            if let Some(term) = sinks.terminal.as_mut() {
                let _ = term.write_all(line.as_bytes());
                let _ = term.flush();
            }
        }

        if target.writes_file() {
            let Sinks {
                file,
                lines_since_flush,
                ..
            } = &mut *sinks;
            if let Some(out) = file.as_mut() {
                let _ = out.write_all(line.as_bytes());
                *lines_since_flush = lines_since_flush.wrapping_add(1);
                if lines_since_flush.is_multiple_of(FLUSH_BATCH_SIZE) {
                    let _ = out.flush();
                }
            }
        }
    }

    /// Writes the closing banner, flushes and releases every handle.
    ///
    /// Runs once; later calls return immediately.
    pub fn close(&self) {
        let mut sinks = self.lock();
        if sinks.closed {
            return;
        }
        sinks.closed = true;

        if let Some(mut out) = sinks.file.take() {
            let _ = writeln!(
                out,
                "{BANNER_RULE} log closed {} {BANNER_RULE}",
                current_time()
            );
            let _ = writeln!(out);
            let _ = out.flush();
        }
        if let Some(mut term) = sinks.terminal.take() {
            let _ = term.flush();
        }
    }
}

fn with_open_banner(writer: BoxedWriter) -> BufWriter<BoxedWriter> {
    let mut out = BufWriter::new(writer);
    let _ = writeln!(
        out,
        "{BANNER_RULE} log opened {} (pid {}) {BANNER_RULE}",
        current_time(),
        std::process::id()
    );
    let _ = out.flush();
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::sync::Arc;

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sink_pair() -> (SinkSet, SharedBuf, SharedBuf) {
        let term = SharedBuf::default();
        let file = SharedBuf::default();
        let sinks = SinkSet::new(Box::new(term.clone()));
        sinks.attach_file(Box::new(file.clone()));
        (sinks, term, file)
    }

    #[test]
    fn target_selects_outputs() {
        let (sinks, term, file) = sink_pair();

        sinks.write_line(LogTarget::Terminal, "only-term\n");
        sinks.write_line(LogTarget::File, "only-file\n");
        sinks.write_line(LogTarget::FileAndTerminal, "both\n");
        sinks.close();

        assert_eq!(term.contents(), "only-term\nboth\n");
        let file_out = file.contents();
        assert!(!file_out.contains("only-term"));
        assert!(file_out.contains("only-file\nboth\n"));
    }

    #[test]
    fn file_gets_opening_and_closing_banners() {
        let (sinks, _term, file) = sink_pair();
        sinks.write_line(LogTarget::File, "body\n");
        sinks.close();

        let out = file.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("log opened"));
        assert_eq!(lines[1], "body");
        assert!(lines[2].contains("log closed"));
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn writes_after_close_are_dropped() {
        let (sinks, term, file) = sink_pair();
        sinks.close();
        let before = file.contents();

        sinks.write_line(LogTarget::FileAndTerminal, "late\n");
        sinks.close();

        assert!(sinks.is_closed());
        assert!(!sinks.has_file());
        assert_eq!(file.contents(), before);
        assert_eq!(term.contents(), "");
    }

    #[test]
    fn open_file_appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "previous run\n").unwrap();

        let sinks = SinkSet::new(Box::new(io::sink()));
        sinks.open_file(&path).unwrap();
        sinks.write_line(LogTarget::File, "this run\n");
        sinks.close();

        let out = std::fs::read_to_string(&path).unwrap();
        assert!(out.starts_with("previous run\n"));
        assert!(out.contains("this run\n"));
    }

    #[test]
    fn open_file_after_close_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.log");

        let sinks = SinkSet::new(Box::new(io::sink()));
        sinks.close();
        assert!(matches!(sinks.open_file(&path), Err(LoggerError::Closed)));
        assert!(!path.exists());
    }

    #[test]
    fn racing_open_file_writes_one_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.log");
        let sinks = Arc::new(SinkSet::new(Box::new(io::sink())));
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let openers: Vec<_> = (0..8)
            .map(|_| {
                let sinks = Arc::clone(&sinks);
                let barrier = Arc::clone(&barrier);
                let path = path.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    sinks.open_file(&path).unwrap();
                })
            })
            .collect();
        for o in openers {
            o.join().unwrap();
        }
        sinks.close();

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(out.matches("log opened").count(), 1);
        assert_eq!(out.matches("log closed").count(), 1);
    }

    #[test]
    fn open_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        let sinks = SinkSet::new(Box::new(io::sink()));
        match sinks.open_file(&path) {
            Err(LoggerError::OpenFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected OpenFile, got {other:?}"),
        }
    }
}
