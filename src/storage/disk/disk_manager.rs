use crate::common::Result;
use crate::config::config::{FERRO_DB_DATA_DIR, FERRO_DB_PAGE_SIZE_BYTES};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
#[cfg(test)]
use tempfile::NamedTempFile;

/// Offset into the database file, in units of pages.
pub type PageId = u32;

/// Page-granular I/O over a single backing file. Pages are opaque
/// `FERRO_DB_PAGE_SIZE_BYTES`-byte blobs; their layout is owned by higher
/// layers.
#[derive(Debug)]
pub struct DiskManager {
    next_page_id: AtomicU32,
    writer: BufWriter<File>,
    reader: BufReader<File>,
}

impl DiskManager {
    /// Creates a new disk manager for the given database file `filename`,
    /// e.g. `example.db`, under [`FERRO_DB_DATA_DIR`].
    pub fn new(filename: &str) -> Self {
        std::fs::create_dir_all(FERRO_DB_DATA_DIR)
            .expect("Unable to create the database data directory.");
        let path = Path::new(FERRO_DB_DATA_DIR).join(filename);
        let file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .open(path)
            .expect("Unable to create or open file {path}.");
        let reader = file;
        let writer = reader.try_clone().expect("Unable to clone file {filename}");

        DiskManager {
            next_page_id: AtomicU32::new(0),
            writer: BufWriter::new(writer),
            reader: BufReader::new(reader),
        }
    }

    pub fn new_with_handle(filename: &str) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new(filename)))
    }

    /// Hands out the next page identifier. Identifiers start at zero and
    /// never repeat for the lifetime of the database file.
    pub fn allocate_page(&mut self) -> PageId {
        self.next_page_id.fetch_add(1, Ordering::SeqCst)
    }

    /// No-op for now; reclaiming page identifiers needs a free-page map
    /// this layer does not keep.
    pub fn deallocate_page(&mut self, _page_id: &PageId) {
        // no-op
    }

    /// Reads the page's bytes into `buf`. Reading past the current end of
    /// the file zero-fills the remainder, since freshly allocated pages
    /// have never been written.
    pub fn read_page(
        &mut self,
        page_id: &PageId,
        buf: &mut [u8; FERRO_DB_PAGE_SIZE_BYTES],
    ) -> Result<()> {
        let offset = Self::calculate_offset(page_id);
        self.reader.seek(SeekFrom::Start(offset as u64))?;

        buf.fill(0);
        let mut total = 0;
        while total < FERRO_DB_PAGE_SIZE_BYTES {
            match self.reader.read(&mut buf[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Writes the page's bytes at its offset and flushes them to the file.
    pub fn write_page(
        &mut self,
        page_id: &PageId,
        data: &[u8; FERRO_DB_PAGE_SIZE_BYTES],
    ) -> Result<()> {
        let offset = Self::calculate_offset(page_id);
        self.writer.seek(SeekFrom::Start(offset as u64))?;
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes any buffered writes before the manager goes away.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::warn!("disk manager shutdown failed to flush: {e}");
        }
    }

    fn calculate_offset(page_id: &PageId) -> u32 {
        page_id * FERRO_DB_PAGE_SIZE_BYTES as u32
    }

    #[cfg(test)]
    /// Disk manager constructor for testing using a temporary file.
    pub fn new_for_test() -> Self {
        let temp_file = NamedTempFile::new().expect("Unable to create temp file");
        let writer = temp_file.reopen().expect("Unable to reopen temp file");

        DiskManager {
            next_page_id: AtomicU32::new(0),
            writer: BufWriter::new(writer),
            reader: BufReader::new(temp_file.into_file()),
        }
    }

    #[cfg(test)]
    /// Test-only version of `new_with_handle` that uses the test constructor.
    pub fn new_with_handle_for_test() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new_for_test()))
    }
}
