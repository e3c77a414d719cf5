use crate::common::constants::{LOG_ENCODE_ERR_MSG, LOG_FLUSH_ERR_MSG};
use crate::config::config::FERRO_DB_DATA_DIR;
use crate::recovery::log_record::{LogRecord, Lsn, INVALID_LSN};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
#[cfg(test)]
use tempfile::NamedTempFile;

#[derive(Debug)]
struct LogManagerInner {
    /// Encoded records not yet written to the file. Each record is
    /// length-prefixed with a little-endian u32.
    log_buffer: Vec<u8>,
    writer: BufWriter<File>,
    /// LSN of the newest record sitting in `log_buffer`.
    last_buffered_lsn: Lsn,
}

/// Append-only write-ahead log with durable flush.
///
/// Records are buffered in memory; `flush` writes and fsyncs them. A
/// commit must not be acknowledged before `flush` has returned with the
/// commit record buffered, which is what makes `persistent_lsn` a usable
/// durability probe.
#[derive(Debug)]
pub struct LogManager {
    inner: Mutex<LogManagerInner>,
    next_lsn: AtomicU64,
    /// LSN of the newest record known to be durable, or [`INVALID_LSN`]
    /// before the first flush.
    persistent_lsn: AtomicU64,
}

impl LogManager {
    /// Creates a log manager appending to `filename` under
    /// [`FERRO_DB_DATA_DIR`].
    pub fn new(filename: &str) -> Self {
        std::fs::create_dir_all(FERRO_DB_DATA_DIR)
            .expect("Unable to create the database data directory.");
        let path = Path::new(FERRO_DB_DATA_DIR).join(filename);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .expect("Unable to create or open log file {path}.");
        Self::from_file(file)
    }

    pub fn new_with_handle(filename: &str) -> Arc<Self> {
        Arc::new(Self::new(filename))
    }

    fn from_file(file: File) -> Self {
        LogManager {
            inner: Mutex::new(LogManagerInner {
                log_buffer: Vec::new(),
                writer: BufWriter::new(file),
                last_buffered_lsn: INVALID_LSN,
            }),
            next_lsn: AtomicU64::new(0),
            persistent_lsn: AtomicU64::new(INVALID_LSN),
        }
    }

    /// Assigns the record its LSN and buffers its encoding. The record is
    /// not durable until the next [`Self::flush`].
    pub fn append_log_record(&self, record: &mut LogRecord) -> Lsn {
        let mut inner = self.inner.lock().unwrap();

        // Assigned under the buffer lock so buffer order matches LSN order.
        let lsn = self.next_lsn.fetch_add(1, Ordering::SeqCst);
        record.lsn = lsn;

        let payload = bincode::serialize(record).expect(LOG_ENCODE_ERR_MSG);
        inner
            .log_buffer
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        inner.log_buffer.extend_from_slice(&payload);
        inner.last_buffered_lsn = lsn;

        lsn
    }

    /// Writes all buffered records to the log file and fsyncs. Returns
    /// once every previously appended record is durable. A failed flush
    /// is fatal: committed work must not be silently lost.
    pub fn flush(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.log_buffer.is_empty() {
            return;
        }

        let buffer = std::mem::take(&mut inner.log_buffer);
        inner.writer.write_all(&buffer).expect(LOG_FLUSH_ERR_MSG);
        inner.writer.flush().expect(LOG_FLUSH_ERR_MSG);
        inner.writer.get_ref().sync_all().expect(LOG_FLUSH_ERR_MSG);

        let flushed = inner.last_buffered_lsn;
        self.persistent_lsn.store(flushed, Ordering::SeqCst);
        log::trace!("write-ahead log flushed through lsn {flushed}");
    }

    /// The LSN the next appended record will receive.
    pub fn next_lsn(&self) -> Lsn {
        self.next_lsn.load(Ordering::SeqCst)
    }

    /// The newest LSN known to be durable, or [`INVALID_LSN`] if nothing
    /// has been flushed yet.
    pub fn persistent_lsn(&self) -> Lsn {
        self.persistent_lsn.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    /// Log manager constructor for testing using a temporary file.
    pub fn new_for_test() -> Self {
        let temp_file = NamedTempFile::new().expect("Unable to create temp file");
        Self::from_file(temp_file.into_file())
    }

    #[cfg(test)]
    pub fn new_with_handle_for_test() -> Arc<Self> {
        Arc::new(Self::new_for_test())
    }
}
