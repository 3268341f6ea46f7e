use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub static LOG: Mutex<Option<Arc<dyn Repository>>> = Mutex::new(None);

static STDERR_LEVEL: Mutex<LevelFilter> = Mutex::new(LevelFilter::Info);

pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    pub level: Level,
    pub message: String,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:<5} {}", self.time, self.level, self.message)
    }
}

/// Keeps the most recent entries in memory.
pub struct RingBuffer {
    capacity: usize,
    entries: Mutex<VecDeque<Entry>>,
}

impl RingBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }
}

impl Repository for RingBuffer {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: Entry) -> Result<(), Error> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| Error::Unknown(err.to_string()))?;
        if self.capacity == 0 {
            return Ok(());
        }
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }
}

static LOGGER: Logger = Logger;

/// Installs the logger.
///
/// Records up to `level` are printed to stderr. Debug records are retained in the repository
/// regardless of `level`.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(repository: Arc<dyn Repository>, level: LevelFilter) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    if let Ok(mut stderr_level) = STDERR_LEVEL.lock() {
        *stderr_level = level;
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level.max(LevelFilter::Debug)))
}

/// Entries retained by the installed repository, oldest first.
#[must_use]
pub fn recent_entries() -> Vec<Entry> {
    let Ok(log) = LOG.lock() else {
        return vec![];
    };
    log.as_ref()
        .and_then(|repository| repository.read_entries().ok())
        .map(Vec::from)
        .unwrap_or_default()
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("fitlog")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = Entry {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message: record.args().to_string(),
        };

        if STDERR_LEVEL
            .lock()
            .is_ok_and(|level| record.level() <= *level)
        {
            eprintln!("{entry}");
        }

        if let Ok(log) = LOG.lock() {
            if let Some(ref repository) = *log {
                let _ = repository.write_entry(entry);
            }
        }
    }

    fn flush(&self) {}
}
