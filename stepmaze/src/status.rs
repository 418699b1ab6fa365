//! A [`log::Log`] sink for the status line.
//!
//! The terminal is in raw mode on the alternate screen while the driver runs,
//! so records cannot go to stderr. Instead the most recent one is kept for the
//! renderer to show under the maze.

use std::sync::{Arc, Mutex};

use log::{Level, Log, Metadata, Record};

/// Keeps the latest record at or above its level.
pub struct StatusLog {
    level: Level,
    latest: Arc<Mutex<Option<String>>>,
}

/// Read side of a [`StatusLog`], cheap to clone.
#[derive(Clone, Default)]
pub struct StatusLine {
    latest: Arc<Mutex<Option<String>>>,
}

impl StatusLog {
    pub fn new(level: Level) -> (Self, StatusLine) {
        let latest = Arc::new(Mutex::new(None));
        let line = StatusLine {
            latest: Arc::clone(&latest),
        };
        (Self { level, latest }, line)
    }

    /// Install as the global logger. Returns the read side.
    pub fn install(level: Level) -> Result<StatusLine, log::SetLoggerError> {
        let (sink, line) = Self::new(level);
        log::set_boxed_logger(Box::new(sink))?;
        log::set_max_level(level.to_level_filter());
        Ok(line)
    }
}

impl Log for StatusLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(format!("{}: {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

impl StatusLine {
    /// The most recent record, if any.
    pub fn latest(&self) -> Option<String> {
        self.latest.lock().ok().and_then(|l| l.clone())
    }

    /// Forget the current record.
    pub fn clear(&self) {
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(sink: &StatusLog, level: Level, msg: &str) {
        sink.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{msg}"))
                .build(),
        );
    }

    #[test]
    fn keeps_latest_record_at_level() {
        let (sink, line) = StatusLog::new(Level::Info);
        assert_eq!(line.latest(), None);
        emit(&sink, Level::Warn, "goal rejected");
        emit(&sink, Level::Debug, "phase: placing");
        assert_eq!(line.latest().as_deref(), Some("WARN: goal rejected"));
        emit(&sink, Level::Info, "resized");
        assert_eq!(line.latest().as_deref(), Some("INFO: resized"));
        line.clear();
        assert_eq!(line.latest(), None);
    }

    #[test]
    fn install_caps_max_level() {
        let line = StatusLog::install(Level::Warn).unwrap();
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
        line.clear();
    }
}
