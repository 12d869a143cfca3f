//! Console logger for unit tests. `tracing` forwards to `log` when no
//! subscriber is installed, so registry events show up here.

use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::OnceCell;
use std::sync::Once;
use std::time::{Duration, Instant};

static EPOCH: OnceCell<Instant> = OnceCell::new();
static LOGGER: TestConsoleLogger = TestConsoleLogger;
static INIT_ONCE: Once = Once::new();

pub(crate) struct TestConsoleLogger;

impl TestConsoleLogger {
    fn elapsed() -> Duration {
        EPOCH.get().map(|epoch| epoch.elapsed()).unwrap_or_default()
    }

    fn render(record: &Record) -> String {
        let toc = Self::elapsed();
        let module = record.module_path().and_then(|path| path.rsplit("::").next()).unwrap_or("");
        let location = match record.line() {
            Some(line) => format!(" ({module}:{line})"),
            None if module.is_empty() => String::new(),
            None => format!(" ({module})"),
        };
        format!(
            "[{:>4}.{:03}s] {:5} {}{}",
            toc.as_secs(),
            toc.subsec_millis(),
            record.level(),
            record.args(),
            location
        )
    }
}

impl log::Log for TestConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::render(record);
        let line = match record.level() {
            Level::Trace | Level::Debug => line.dimmed(),
            Level::Info => line.cyan(),
            Level::Warn => line.yellow(),
            Level::Error => line.red().bold(),
        };
        println!("{line}");
    }

    fn flush(&self) {}
}

/// Installs the console logger once per process. Later calls only adjust
/// the level.
pub fn init_logger(level: Level) {
    EPOCH.get_or_init(Instant::now);

    INIT_ONCE.call_once(|| {
        // another logger may already be installed by the test harness
        let _ = log::set_logger(&LOGGER);
    });
    log::set_max_level(level.to_level_filter());
}

#[cfg(test)]
#[ctor::ctor]
fn test_start() {
    init_logger(Level::Info);
}
