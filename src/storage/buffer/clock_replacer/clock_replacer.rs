use crate::storage::buffer::buffer_pool_manager::FrameId;
use crate::storage::buffer::replacer::Replacer;
use std::collections::VecDeque;

#[derive(Debug)]
struct ClockEntry {
    frame_id: FrameId,
    /// Second-chance bit. Set on unpin, cleared when the hand sweeps past.
    referenced: bool,
}

/// Clock (second chance) eviction policy.
///
/// Eligible frames form a ring, ordered by when they became eligible; the
/// clock hand sits at the front. A sweep clears the reference bit of each
/// frame it passes and re-queues it behind the hand, so every referenced
/// frame survives exactly one sweep. The first frame found with its bit
/// already clear is the victim. A full-referenced ring therefore needs at
/// most two sweeps.
#[derive(Debug)]
pub struct ClockReplacer {
    frames: VecDeque<ClockEntry>,
    capacity: usize,
}

impl ClockReplacer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn position(&self, frame_id: FrameId) -> Option<usize> {
        self.frames.iter().position(|entry| entry.frame_id == frame_id)
    }
}

impl Replacer for ClockReplacer {
    fn victim(&mut self) -> Option<FrameId> {
        loop {
            let mut entry = self.frames.pop_front()?;
            if entry.referenced {
                entry.referenced = false;
                self.frames.push_back(entry);
            } else {
                log::debug!("clock replacer chose frame {} as victim", entry.frame_id);
                return Some(entry.frame_id);
            }
        }
    }

    fn pin(&mut self, frame_id: FrameId) {
        if let Some(position) = self.position(frame_id) {
            self.frames.remove(position);
        }
    }

    fn unpin(&mut self, frame_id: FrameId) {
        match self.frames.iter_mut().find(|entry| entry.frame_id == frame_id) {
            Some(entry) => entry.referenced = true,
            None => {
                debug_assert!(
                    self.frames.len() < self.capacity,
                    "Replacer already tracks {} frames.",
                    self.capacity
                );
                self.frames.push_back(ClockEntry {
                    frame_id,
                    referenced: true,
                });
            }
        }
    }

    fn size(&self) -> usize {
        self.frames.len()
    }
}
