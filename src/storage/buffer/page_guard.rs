use crate::config::config::FERRO_DB_PAGE_SIZE_BYTES;
use crate::storage::buffer::buffer_pool_manager::BufferPoolManager;
use crate::storage::disk::disk_manager::PageId;
use crate::storage::page::PageHandle;
use std::sync::{Arc, RwLock};

/// RAII wrapper around a pinned page.
///
/// Holding a guard keeps the page pinned; dropping it releases the pin,
/// reporting the page as dirty if `data_mut` was used. This turns the
/// manual fetch/unpin protocol into scoped acquisition, so a missed unpin
/// becomes impossible rather than a leak.
///
/// The guard takes the buffer pool latch when dropped, so it must not be
/// dropped while the current thread holds that latch.
pub struct PageGuard {
    bpm: Arc<RwLock<BufferPoolManager>>,
    page: PageHandle,
    page_id: PageId,
    is_dirty: bool,
}

impl PageGuard {
    fn new(bpm: Arc<RwLock<BufferPoolManager>>, page: PageHandle) -> Self {
        let page_id = page.read().unwrap().page_id();
        Self {
            bpm,
            page,
            page_id,
            is_dirty: false,
        }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Copies out of the page under its read latch.
    pub fn with_data<T>(&self, f: impl FnOnce(&[u8; FERRO_DB_PAGE_SIZE_BYTES]) -> T) -> T {
        f(self.page.read().unwrap().data())
    }

    /// Mutates the page under its write latch and marks the guard dirty.
    pub fn with_data_mut<T>(
        &mut self,
        f: impl FnOnce(&mut [u8; FERRO_DB_PAGE_SIZE_BYTES]) -> T,
    ) -> T {
        self.is_dirty = true;
        f(self.page.write().unwrap().data_mut())
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        let unpinned = self
            .bpm
            .write()
            .unwrap()
            .unpin_page(&self.page_id, self.is_dirty);
        if let Err(e) = unpinned {
            log::warn!("page guard failed to unpin page {}: {e}", self.page_id);
        }
    }
}

impl BufferPoolManager {
    /// [`Self::fetch_page`], wrapped in a guard that unpins on drop.
    pub fn fetch_page_guarded(
        bpm: &Arc<RwLock<Self>>,
        page_id: &PageId,
    ) -> Option<PageGuard> {
        let page = bpm.write().unwrap().fetch_page(page_id)?;
        Some(PageGuard::new(Arc::clone(bpm), page))
    }

    /// [`Self::new_page`], wrapped in a guard that unpins on drop.
    pub fn new_page_guarded(bpm: &Arc<RwLock<Self>>) -> Option<PageGuard> {
        let page = bpm.write().unwrap().new_page()?;
        Some(PageGuard::new(Arc::clone(bpm), page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::NEW_PAGE_ERR_MSG;
    use crate::storage::disk::disk_manager::DiskManager;

    #[test]
    fn test_guard_unpins_on_drop() {
        let bpm = new_bpm_handle(5);

        let page_id = {
            let guard = BufferPoolManager::new_page_guarded(&bpm).expect(NEW_PAGE_ERR_MSG);
            let page_id = guard.page_id();
            assert_eq!(bpm.read().unwrap().get_pin_count(&page_id), Some(1));
            page_id
        };

        assert_eq!(bpm.read().unwrap().get_pin_count(&page_id), Some(0));
    }

    #[test]
    fn test_guard_reports_clean_when_untouched() {
        let bpm = new_bpm_handle(5);

        let guard = BufferPoolManager::new_page_guarded(&bpm).expect(NEW_PAGE_ERR_MSG);
        let page_id = guard.page_id();
        drop(guard);

        assert_eq!(bpm.read().unwrap().get_is_dirty(&page_id), Some(false));
    }

    #[test]
    fn test_guard_marks_dirty_after_mutation() {
        let bpm = new_bpm_handle(5);

        let mut guard = BufferPoolManager::new_page_guarded(&bpm).expect(NEW_PAGE_ERR_MSG);
        let page_id = guard.page_id();
        guard.with_data_mut(|data| data[..5].copy_from_slice(b"Hello"));
        drop(guard);

        assert_eq!(bpm.read().unwrap().get_is_dirty(&page_id), Some(true));
    }

    #[test]
    fn test_guarded_data_survives_eviction() {
        let disk_manager = DiskManager::new_with_handle_for_test();
        let bpm = BufferPoolManager::new_with_handle(1, Arc::clone(&disk_manager));

        let page_id = {
            let mut guard = BufferPoolManager::new_page_guarded(&bpm).expect(NEW_PAGE_ERR_MSG);
            guard.with_data_mut(|data| data[..5].copy_from_slice(b"Hello"));
            guard.page_id()
        };

        // The pool has a single frame; creating another page evicts the
        // first, which must write its dirty bytes back.
        let _second = BufferPoolManager::new_page_guarded(&bpm).expect(NEW_PAGE_ERR_MSG);

        let guard = BufferPoolManager::fetch_page_guarded(&bpm, &page_id);
        assert!(guard.is_none(), "single frame is pinned by the second page");

        drop(_second);
        let guard =
            BufferPoolManager::fetch_page_guarded(&bpm, &page_id).expect("page is on disk");
        guard.with_data(|data| assert_eq!(&data[..5], b"Hello"));
    }

    fn new_bpm_handle(pool_size: usize) -> Arc<RwLock<BufferPoolManager>> {
        let disk_manager = DiskManager::new_with_handle_for_test();
        BufferPoolManager::new_with_handle(pool_size, disk_manager)
    }
}
