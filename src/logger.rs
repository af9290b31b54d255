//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to the application state for display in the UI.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Custom logger that captures logs to state
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Arc<Mutex<Option<LogCallback>>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Arc::new(Mutex::new(None)),
        }
    }

    /// Install as the global logger and return the installed instance.
    ///
    pub fn install(self) -> Result<&'static CustomLogger, log::SetLoggerError> {
        let level = self.level;
        let logger: &'static CustomLogger = Box::leak(Box::new(self));
        log::set_logger(logger)?;
        log::set_max_level(level);
        Ok(logger)
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}
