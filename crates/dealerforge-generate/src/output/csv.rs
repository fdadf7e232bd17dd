use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use dealerforge_core::{Record, RecordRow};

use crate::errors::SinkError;
use crate::model::{SinkKind, SinkReport};

/// Write records as CSV: a header row in record field order, then one row per record.
///
/// An empty slice fails with [`SinkError::EmptyInput`] before the filesystem is
/// touched. Otherwise the file is written to a sibling `.tmp` file and renamed
/// over `path`, so an existing file is replaced only by a complete one.
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<SinkReport, SinkError> {
    if records.is_empty() {
        return Err(SinkError::EmptyInput);
    }

    let path = std::path::absolute(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(&path);
    let bytes = match write_rows(&tmp_path, records) {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
    };
    if let Err(err) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        bytes,
        "csv written"
    );

    Ok(SinkReport {
        sink: SinkKind::Csv,
        path,
        rows_written: records.len() as u64,
        bytes_written: Some(bytes),
    })
}

/// Read a CSV file produced by [`write_records_csv`].
pub fn read_records_csv(path: &Path) -> Result<Vec<RecordRow>, SinkError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<RecordRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn write_rows(path: &Path, records: &[Record]) -> Result<u64, SinkError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    // Headers come from the serialized field names of the first row.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(SyncedFile::new(file));

    for record in records {
        writer.serialize(record.to_row())?;
    }

    writer.flush()?;
    let file = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(file.finish()?)
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{file_name}.tmp"))
}

/// Buffered file handle that tallies bytes and syncs to disk on `finish`.
struct SyncedFile {
    inner: BufWriter<File>,
    bytes: u64,
}

impl SyncedFile {
    fn new(file: File) -> Self {
        Self {
            inner: BufWriter::new(file),
            bytes: 0,
        }
    }

    fn finish(self) -> std::io::Result<u64> {
        let file = self.inner.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;
        Ok(self.bytes)
    }
}

impl Write for SyncedFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes += size as u64;
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
