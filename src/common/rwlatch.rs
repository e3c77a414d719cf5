use crate::common::constants::LATCH_RELEASE_ERR_MSG;
use std::sync::{Condvar, Mutex};

#[derive(Debug, Default)]
struct LatchState {
    active_readers: usize,
    writer_active: bool,
    writers_waiting: usize,
}

/// A reader/writer latch with explicit acquire and release operations.
///
/// Unlike [`std::sync::RwLock`], a hold is not tied to a guard's lifetime:
/// it can be acquired in one method and released in another, which is what
/// the transaction manager needs to keep a shared hold open for the entire
/// lifetime of a transaction. Pending exclusive acquisitions block new
/// shared acquisitions, so a checkpoint cannot be starved by a steady
/// stream of incoming transactions.
#[derive(Debug, Default)]
pub struct ReaderWriterLatch {
    state: Mutex<LatchState>,
    state_changed: Condvar,
}

impl ReaderWriterLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the latch in shared mode, blocking while an exclusive hold
    /// is active or pending.
    pub fn lock_shared(&self) {
        let mut state = self.state.lock().unwrap();
        while state.writer_active || state.writers_waiting > 0 {
            state = self.state_changed.wait(state).unwrap();
        }
        state.active_readers += 1;
    }

    /// Releases one shared hold. Releasing a hold that was never acquired
    /// is a programming error.
    pub fn unlock_shared(&self) {
        let mut state = self.state.lock().unwrap();
        assert!(state.active_readers > 0, "{}", LATCH_RELEASE_ERR_MSG);
        state.active_readers -= 1;
        if state.active_readers == 0 {
            self.state_changed.notify_all();
        }
    }

    /// Acquires the latch exclusively, blocking until every shared hold has
    /// been released.
    pub fn lock_exclusive(&self) {
        let mut state = self.state.lock().unwrap();
        state.writers_waiting += 1;
        while state.writer_active || state.active_readers > 0 {
            state = self.state_changed.wait(state).unwrap();
        }
        state.writers_waiting -= 1;
        state.writer_active = true;
    }

    /// Releases the exclusive hold.
    pub fn unlock_exclusive(&self) {
        let mut state = self.state.lock().unwrap();
        assert!(state.writer_active, "{}", LATCH_RELEASE_ERR_MSG);
        state.writer_active = false;
        self.state_changed.notify_all();
    }
}
