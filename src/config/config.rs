use std::sync::atomic::{AtomicBool, Ordering};

/// Size of a page in bytes. Every disk transfer moves exactly one page.
pub const FERRO_DB_PAGE_SIZE_BYTES: usize = 4096;

/// Directory holding the database file and the write-ahead log.
pub const FERRO_DB_DATA_DIR: &str = "data";

/// Number of frames a buffer pool is given when the caller does not choose
/// a size explicitly.
pub const DEFAULT_POOL_SIZE: usize = 64;

/// Process-wide switch for write-ahead logging. When disabled, the
/// transaction manager emits no log records and commit does not force a
/// log flush.
pub static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn logging_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn set_logging_enabled(enabled: bool) {
    ENABLE_LOGGING.store(enabled, Ordering::SeqCst);
}
