use crate::storage::buffer::buffer_pool_manager::FrameId;

/// Eviction policy over the buffer pool's frames. The pool hands a frame
/// to the replacer when its last pin is released and takes it back when
/// the frame is pinned again; `victim` picks which eligible frame loses
/// its page.
///
/// A frame is either pinned (absent from the replacer, pin count > 0) or
/// eligible (present in the replacer, pin count 0), never both.
pub trait Replacer: Send + Sync + std::fmt::Debug {
    /// Selects a frame to evict and removes it from the replacer, or
    /// returns `None` when no frame is eligible.
    fn victim(&mut self) -> Option<FrameId>;

    /// Marks the frame as in use; it must no longer be a victim candidate.
    /// A no-op for frames the replacer is not tracking.
    fn pin(&mut self, frame_id: FrameId);

    /// Marks the frame as eligible for eviction.
    fn unpin(&mut self, frame_id: FrameId);

    /// Number of frames currently eligible for eviction.
    fn size(&self) -> usize;
}
