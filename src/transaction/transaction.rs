use crate::recovery::{Lsn, INVALID_LSN};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Monotonic transaction identifier, assigned by the transaction manager.
pub type TxnId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Acquiring resources. Every transaction starts here.
    Growing,
    /// Releasing resources; no new acquisitions allowed.
    Shrinking,
    /// Terminal.
    Committed,
    /// Terminal.
    Aborted,
}

impl TransactionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Committed | TransactionState::Aborted)
    }
}

/// A single transaction's identity and lifecycle state.
///
/// Shared as `Arc<Transaction>` between the owning thread and the
/// transaction manager's map, hence the interior mutability. The write
/// set and lock sets of a full transaction live in a future lock-manager
/// layer; this core only tracks identity, state, and the log-record
/// chain.
#[derive(Debug)]
pub struct Transaction {
    txn_id: TxnId,
    state: RwLock<TransactionState>,
    /// LSN of this transaction's most recent log record.
    prev_lsn: AtomicU64,
}

impl Transaction {
    pub fn new(txn_id: TxnId) -> Self {
        Self {
            txn_id,
            state: RwLock::new(TransactionState::Growing),
            prev_lsn: AtomicU64::new(INVALID_LSN),
        }
    }

    pub fn txn_id(&self) -> TxnId {
        self.txn_id
    }

    pub fn state(&self) -> TransactionState {
        *self.state.read().unwrap()
    }

    /// Transitions the lifecycle state. Leaving a terminal state is a
    /// programmer error.
    pub(crate) fn set_state(&self, state: TransactionState) {
        let mut current = self.state.write().unwrap();
        debug_assert!(
            !current.is_terminal(),
            "Transaction {} is already {:?}.",
            self.txn_id,
            *current
        );
        *current = state;
    }

    pub fn prev_lsn(&self) -> Lsn {
        self.prev_lsn.load(Ordering::SeqCst)
    }

    pub(crate) fn set_prev_lsn(&self, lsn: Lsn) {
        self.prev_lsn.store(lsn, Ordering::SeqCst);
    }
}
