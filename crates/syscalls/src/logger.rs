//! Console logger.
//!
//! Implements the `log::Log` trait to route log messages through the
//! buffered console sink, one line per record.

use crate::runtime::installed;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Global logger instance
static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sys) = installed() {
            // One lock acquisition per record keeps the line whole.
            let _ = writeln!(sys.console(), "{}", record.args());
        }
    }

    fn flush(&self) {
        if let Some(sys) = installed() {
            sys.console().flush();
        }
    }
}

/// Initialize the logger.
///
/// # Arguments
/// * `max_level` - The maximum log level to display.
pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(max_level);
    Ok(())
}
