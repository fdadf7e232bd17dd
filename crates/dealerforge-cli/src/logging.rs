use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Install the global subscriber. Logs go to stderr, or are appended to
/// `log_file` when given; `json` switches to one JSON object per line.
pub fn init_logging(json: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let make_writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let shared = LogFile(Arc::new(Mutex::new(file)));
            BoxMakeWriter::new(move || shared.clone())
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(log_file.is_none())
        .with_writer(make_writer);

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    result.map_err(|err| CliError::Logging(err.to_string()))
}

/// Append-only log file shared by every event the subscriber formats.
#[derive(Clone)]
struct LogFile(Arc<Mutex<File>>);

impl LogFile {
    fn locked<T>(&self, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        op(&mut *file)
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.locked(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.locked(File::flush)
    }
}
