// DiskManager
pub const INVALID_PID: u32 = u32::MAX;

// BufferPoolManager
pub const NO_CORRESPONDING_PAGE_MSG: &str =
    "No page corresponding to page_id {page_id} exists in the buffer pool.";
pub const NEW_PAGE_ERR_MSG: &str = "Could not get a new page from the buffer pool manager.";
pub const EVICTION_WRITE_BACK_ERR_MSG: &str =
    "Could not write an evicted dirty page back to disk; aborting to avoid losing data.";
pub const FLUSH_WRITE_ERR_MSG: &str =
    "Could not flush a page to disk; aborting to avoid losing data.";

// LogManager
pub const LOG_ENCODE_ERR_MSG: &str = "Could not encode a log record.";
pub const LOG_FLUSH_ERR_MSG: &str =
    "Could not flush the write-ahead log; aborting to avoid losing committed work.";

// ReaderWriterLatch
pub const LATCH_RELEASE_ERR_MSG: &str = "Released a latch hold that was never acquired.";
