use crate::common::constants::INVALID_PID;
use crate::config::config::FERRO_DB_PAGE_SIZE_BYTES;
use crate::storage::disk::disk_manager::PageId;
use std::sync::{Arc, RwLock};

/// Shared reference to a page resident in the buffer pool. Callers hold
/// one of these while the page is pinned; the buffer pool owns the frame
/// itself.
pub type PageHandle = Arc<RwLock<Page>>;

/// A fixed-size frame of bytes plus the bookkeeping the buffer pool needs:
/// the page's identifier, the number of active pins, and whether the
/// in-memory bytes differ from the on-disk image.
///
/// Writing to `data_mut` does not set the dirty flag; dirtiness is declared
/// by the caller through `unpin_page` (or a page guard). Frame metadata is
/// only ever mutated by the buffer pool.
#[derive(Debug)]
pub struct Page {
    page_id: PageId,
    pin_count: u32,
    is_dirty: bool,
    data: Box<[u8; FERRO_DB_PAGE_SIZE_BYTES]>,
}

impl Page {
    /// An unoccupied frame. Holds no page until the buffer pool resets it.
    pub(crate) fn invalid() -> Self {
        Page {
            page_id: INVALID_PID,
            pin_count: 0,
            is_dirty: false,
            data: Box::new([0; FERRO_DB_PAGE_SIZE_BYTES]),
        }
    }

    /// Reinitializes the frame to hold `page_id`: zeroed data, no pins,
    /// clean.
    pub(crate) fn reset(&mut self, page_id: PageId) {
        self.page_id = page_id;
        self.pin_count = 0;
        self.is_dirty = false;
        self.data.fill(0);
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn data(&self) -> &[u8; FERRO_DB_PAGE_SIZE_BYTES] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8; FERRO_DB_PAGE_SIZE_BYTES] {
        &mut self.data
    }

    pub fn pin_count(&self) -> u32 {
        self.pin_count
    }

    pub(crate) fn inc_pin_count(&mut self) {
        self.pin_count += 1;
    }

    /// Decrements the pin count. Decrementing past zero is a programmer
    /// error; it is detected in debug builds and saturates otherwise.
    pub(crate) fn dec_pin_count(&mut self) {
        debug_assert!(self.pin_count > 0, "Pin count already at zero.");
        self.pin_count = self.pin_count.saturating_sub(1);
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub(crate) fn set_dirty(&mut self, is_dirty: bool) {
        self.is_dirty = is_dirty;
    }
}
