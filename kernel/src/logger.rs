//! `log` backend that writes `[LEVEL] message` lines to the serial port.

use log::{Level, LevelFilter, Metadata, Record};

use crate::serial;

struct SerialLogger;

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            serial::write_line(format_args!("[{}] {}", level_tag(record.level()), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

/// Installs the serial logger. Safe to call more than once; later calls
/// only adjust the level.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        serial::write_line(format_args!("[WARN ] logger already installed"));
    }
    log::set_max_level(level);
}
