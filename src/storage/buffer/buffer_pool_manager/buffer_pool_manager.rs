use crate::common::constants::{EVICTION_WRITE_BACK_ERR_MSG, FLUSH_WRITE_ERR_MSG, INVALID_PID};
use crate::common::{Error, Result};
use crate::config::config::DEFAULT_POOL_SIZE;
use crate::storage::buffer::clock_replacer::ClockReplacer;
use crate::storage::buffer::replacer::Replacer;
use crate::storage::disk::disk_manager::{DiskManager, PageId};
use crate::storage::page::{Page, PageHandle};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

pub type FrameId = usize;

/// Mediates all access to pages on the backing file through a fixed set of
/// in-memory frames.
///
/// All of the combined state (page table, free list, replacer, frame
/// metadata) is guarded by the caller-side latch: public operations take
/// `&mut self`, and concurrent users share the pool through an
/// `Arc<RwLock<BufferPoolManager>>` handle. Page *data* is accessed
/// through the returned [`PageHandle`]s outside that latch; the pin count
/// keeps a frame's page resident while such access is in flight.
#[derive(Debug)]
pub struct BufferPoolManager {
    /// Number of frames in the buffer pool.
    pub(crate) pool_size: usize,
    /// The frames themselves. Unoccupied frames hold an invalid page.
    pub(crate) pages: Vec<PageHandle>,
    /// Maps resident page ids to the frame holding them.
    pub(crate) page_table: HashMap<PageId, FrameId>,
    /// Manages reads and writes of pages on disk.
    pub(crate) disk_manager: Arc<RwLock<DiskManager>>,
    /// Picks which eligible frame loses its page when the free list runs
    /// dry.
    pub(crate) replacer: Box<dyn Replacer>,
    /// Frames that currently hold no page.
    pub(crate) free_list: VecDeque<FrameId>,
}

#[derive(Default)]
pub struct BufferPoolManagerBuilder {
    pool_size: Option<usize>,
    replacer: Option<Box<dyn Replacer>>,
    disk_manager: Option<Arc<RwLock<DiskManager>>>,
}

impl BufferPoolManagerBuilder {
    pub fn pool_size(&mut self, pool_size: usize) -> &mut Self {
        self.pool_size = Some(pool_size);
        self
    }
    pub fn replacer(&mut self, replacer: Box<dyn Replacer>) -> &mut Self {
        self.replacer = Some(replacer);
        self
    }
    pub fn disk_manager(&mut self, disk_manager: Arc<RwLock<DiskManager>>) -> &mut Self {
        self.disk_manager = Some(disk_manager);
        self
    }
    pub fn build(&mut self) -> BufferPoolManager {
        let pool_size = self.pool_size.unwrap_or(DEFAULT_POOL_SIZE);
        let disk_manager = self
            .disk_manager
            .clone()
            .expect("`disk_manager` not initialized before build.");
        let replacer = self
            .replacer
            .take()
            .unwrap_or_else(|| Box::new(ClockReplacer::new(pool_size)));

        BufferPoolManager::with_replacer(pool_size, replacer, disk_manager)
    }

    pub fn build_with_handle(&mut self) -> Arc<RwLock<BufferPoolManager>> {
        Arc::new(RwLock::new(self.build()))
    }
}

impl BufferPoolManager {
    pub fn new(pool_size: usize, disk_manager: Arc<RwLock<DiskManager>>) -> Self {
        Self::with_replacer(
            pool_size,
            Box::new(ClockReplacer::new(pool_size)),
            disk_manager,
        )
    }

    pub fn with_replacer(
        pool_size: usize,
        replacer: Box<dyn Replacer>,
        disk_manager: Arc<RwLock<DiskManager>>,
    ) -> Self {
        BufferPoolManager {
            pool_size,
            pages: (0..pool_size)
                .map(|_| Arc::new(RwLock::new(Page::invalid())))
                .collect(),
            page_table: HashMap::new(),
            disk_manager,
            replacer,
            free_list: (0..pool_size).collect(),
        }
    }

    pub fn new_with_handle(
        pool_size: usize,
        disk_manager: Arc<RwLock<DiskManager>>,
    ) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new(pool_size, disk_manager)))
    }

    pub fn builder() -> BufferPoolManagerBuilder {
        BufferPoolManagerBuilder::default()
    }

    /// Creates a new page in the buffer pool, allocating a fresh page id
    /// from the disk manager.
    ///
    /// The page is born pinned so it cannot be evicted before the caller
    /// has written to it, and born clean with zeroed data.
    ///
    /// # Returns
    /// - `Some(PageHandle)`: the newly created page.
    /// - `None`: if every frame is pinned and nothing could be evicted.
    pub fn new_page(&mut self) -> Option<PageHandle> {
        let frame_id = self.acquire_frame()?;
        let page_id = self.disk_manager.write().unwrap().allocate_page();

        {
            let mut page = self.pages[frame_id].write().unwrap();
            page.reset(page_id);
            page.inc_pin_count();
        }
        self.page_table.insert(page_id, frame_id);
        self.replacer.pin(frame_id);

        Some(Arc::clone(&self.pages[frame_id]))
    }

    /// Fetches the page identified by `page_id`, reading it from disk if
    /// it is not already resident.
    ///
    /// Each successful fetch adds one pin; the caller owes a matching
    /// [`Self::unpin_page`]. Concurrent fetches of the same page id share
    /// a single frame.
    ///
    /// # Returns
    /// - `Some(PageHandle)`: the resident page.
    /// - `None`: if the page had to be loaded but every frame is pinned,
    ///   or the disk read failed.
    pub fn fetch_page(&mut self, page_id: &PageId) -> Option<PageHandle> {
        if let Some(&frame_id) = self.page_table.get(page_id) {
            self.pages[frame_id].write().unwrap().inc_pin_count();
            self.replacer.pin(frame_id);
            return Some(Arc::clone(&self.pages[frame_id]));
        }

        let frame_id = self.acquire_frame()?;
        {
            let mut page = self.pages[frame_id].write().unwrap();
            page.reset(*page_id);
            let mut disk = self.disk_manager.write().unwrap();
            if let Err(e) = disk.read_page(page_id, page.data_mut()) {
                log::warn!("failed to read page {page_id} from disk: {e}");
                drop(disk);
                drop(page);
                // The frame is no longer mapped to any page; it goes back
                // on the free list.
                self.free_list.push_back(frame_id);
                return None;
            }
            page.inc_pin_count();
        }
        self.page_table.insert(*page_id, frame_id);
        self.replacer.pin(frame_id);

        Some(Arc::clone(&self.pages[frame_id]))
    }

    /// Releases one pin on the page identified by `page_id`.
    ///
    /// When the pin count drops to zero the frame becomes eligible for
    /// eviction. `is_dirty = true` marks the page dirty; `is_dirty =
    /// false` leaves the existing dirty bit alone. Dirtiness is sticky
    /// until the page is flushed or reloaded.
    ///
    /// # Errors
    /// - [`Error::PageNotFound`]: the page is not in the buffer pool.
    pub fn unpin_page(&mut self, page_id: &PageId, is_dirty: bool) -> Result<()> {
        let &frame_id = self
            .page_table
            .get(page_id)
            .ok_or(Error::PageNotFound(*page_id))?;

        let mut page = self.pages[frame_id].write().unwrap();
        page.dec_pin_count();
        if is_dirty {
            page.set_dirty(true);
        }
        if page.pin_count() == 0 {
            self.replacer.unpin(frame_id);
        }
        Ok(())
    }

    /// Writes the page to disk regardless of its dirty flag and marks it
    /// clean. The pin count is left untouched; flushing a pinned page is
    /// valid.
    ///
    /// # Returns
    /// - `true` if the page was resident and written, `false` otherwise.
    pub fn flush_page(&mut self, page_id: &PageId) -> bool {
        let Some(&frame_id) = self.page_table.get(page_id) else {
            return false;
        };

        let mut page = self.pages[frame_id].write().unwrap();
        self.disk_manager
            .write()
            .unwrap()
            .write_page(page_id, page.data())
            .expect(FLUSH_WRITE_ERR_MSG);
        page.set_dirty(false);
        true
    }

    /// Flushes every page currently in the page table.
    pub fn flush_all_pages(&mut self) {
        let page_ids: Vec<PageId> = self.page_table.keys().cloned().collect();
        for page_id in page_ids {
            self.flush_page(&page_id);
        }
    }

    /// Drops the page from the buffer pool and deallocates it on disk.
    /// Deleting a page that is not resident is a no-op.
    ///
    /// # Errors
    /// - [`Error::PagePinned`]: the page still has active pins; the caller
    ///   must unpin it first.
    pub fn delete_page(&mut self, page_id: PageId) -> Result<()> {
        let Some(&frame_id) = self.page_table.get(&page_id) else {
            return Ok(());
        };

        if self.pages[frame_id].read().unwrap().pin_count() > 0 {
            return Err(Error::PagePinned(page_id));
        }

        self.page_table.remove(&page_id);
        // Pinning removes the frame from the replacer's victim pool; it is
        // about to sit on the free list instead.
        self.replacer.pin(frame_id);
        self.pages[frame_id].write().unwrap().reset(INVALID_PID);
        self.disk_manager.write().unwrap().deallocate_page(&page_id);
        self.free_list.push_back(frame_id);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.pool_size
    }

    pub(crate) fn get_pin_count(&self, page_id: &PageId) -> Option<u32> {
        let &frame_id = self.page_table.get(page_id)?;
        Some(self.pages[frame_id].read().unwrap().pin_count())
    }

    pub(crate) fn get_is_dirty(&self, page_id: &PageId) -> Option<bool> {
        let &frame_id = self.page_table.get(page_id)?;
        Some(self.pages[frame_id].read().unwrap().is_dirty())
    }

    /// Obtains a frame to load a page into: from the free list if one is
    /// available, otherwise by evicting a victim.
    fn acquire_frame(&mut self) -> Option<FrameId> {
        if let Some(frame_id) = self.free_list.pop_front() {
            return Some(frame_id);
        }
        self.evict_frame()
    }

    /// Evicts the replacer's victim, writing its page back to disk first
    /// if it is dirty. A failed write-back is fatal: losing the only copy
    /// of a dirty page is not recoverable at this layer.
    fn evict_frame(&mut self) -> Option<FrameId> {
        let frame_id = self.replacer.victim()?;

        let evicted_page_id;
        {
            let mut page = self.pages[frame_id].write().unwrap();
            evicted_page_id = page.page_id();
            if page.is_dirty() {
                log::debug!("writing dirty page {evicted_page_id} back to disk before eviction");
                self.disk_manager
                    .write()
                    .unwrap()
                    .write_page(&evicted_page_id, page.data())
                    .expect(EVICTION_WRITE_BACK_ERR_MSG);
                page.set_dirty(false);
            }
        }
        log::debug!("evicting page {evicted_page_id} from frame {frame_id}");
        self.page_table.remove(&evicted_page_id);

        Some(frame_id)
    }
}
