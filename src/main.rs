use std::{process::ExitCode, sync::Arc, thread};

use rustylog::{
    log::{LogSink, Logger, LoggerConfig},
    logger_debug, logger_error, logger_info, logger_warn,
};

/// `rustylog [config-path]`
///
/// Loads the `[Logging]` section of the given file (defaults otherwise),
/// writes a short burst of records from a few threads and shuts down.
fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match LoggerConfig::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => LoggerConfig::default(),
    };

    let logger = match Logger::init(config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    logger_info!(logger, "logger started in {:?} mode", logger.mode());

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let sink: Arc<dyn LogSink> = Arc::new(logger.handle());
            thread::Builder::new()
                .name(format!("demo-{id}"))
                .spawn(move || {
                    for n in 0..5 {
                        logger_debug!(sink, "worker {id} step {n}");
                    }
                    logger_warn!(sink, "worker {id} done");
                })
        })
        .collect();

    for w in workers {
        match w {
            Ok(handle) => {
                if handle.join().is_err() {
                    logger_error!(logger, "demo thread panicked");
                }
            }
            Err(e) => logger_error!(logger, "failed to spawn demo thread: {e}"),
        }
    }

    logger.info(&format!("current time is {}", logger.current_time()));
    logger.shutdown();
    ExitCode::SUCCESS
}
