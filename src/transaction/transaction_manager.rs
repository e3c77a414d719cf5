use crate::common::ReaderWriterLatch;
use crate::config::config::logging_enabled;
use crate::recovery::{LogManager, LogRecord, LogRecordType};
use crate::transaction::transaction::{Transaction, TransactionState, TxnId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Assigns transaction identities, drives lifecycle transitions, and
/// couples commit and abort to the write-ahead log.
///
/// Every live transaction holds one shared reference on the global
/// transaction latch, released exactly once at commit or abort. Acquiring
/// the latch exclusively therefore waits out all live transactions, which
/// is the checkpoint exclusion window.
#[derive(Debug)]
pub struct TransactionManager {
    next_txn_id: AtomicU32,
    /// Live transactions by id; entries are removed at commit/abort.
    txn_map: Mutex<HashMap<TxnId, Arc<Transaction>>>,
    log_manager: Arc<LogManager>,
    global_txn_latch: ReaderWriterLatch,
}

impl TransactionManager {
    pub fn new(log_manager: Arc<LogManager>) -> Self {
        Self {
            next_txn_id: AtomicU32::new(0),
            txn_map: Mutex::new(HashMap::new()),
            log_manager,
            global_txn_latch: ReaderWriterLatch::new(),
        }
    }

    /// Starts a transaction. When `txn` is `None`, a new transaction with
    /// the next id is created; transaction ids start at 1.
    ///
    /// Takes a shared hold on the global transaction latch, which the
    /// transaction keeps until it commits or aborts.
    pub fn begin(&self, txn: Option<Arc<Transaction>>) -> Arc<Transaction> {
        self.global_txn_latch.lock_shared();

        let txn = txn.unwrap_or_else(|| {
            let txn_id = self.next_txn_id.fetch_add(1, Ordering::SeqCst) + 1;
            Arc::new(Transaction::new(txn_id))
        });

        if logging_enabled() {
            let mut record =
                LogRecord::new(txn.txn_id(), txn.prev_lsn(), LogRecordType::Begin);
            let lsn = self.log_manager.append_log_record(&mut record);
            txn.set_prev_lsn(lsn);
        }

        log::debug!("transaction {} began", txn.txn_id());
        self.txn_map
            .lock()
            .unwrap()
            .insert(txn.txn_id(), Arc::clone(&txn));
        txn
    }

    /// Commits the transaction. Does not return until the COMMIT log
    /// record is durable.
    pub fn commit(&self, txn: &Arc<Transaction>) {
        txn.set_state(TransactionState::Committed);

        // Deferred write-set deletes are applied here once a lock manager
        // and table heap are integrated.

        if logging_enabled() {
            let mut record =
                LogRecord::new(txn.txn_id(), txn.prev_lsn(), LogRecordType::Commit);
            let lsn = self.log_manager.append_log_record(&mut record);
            txn.set_prev_lsn(lsn);
            self.log_manager.flush();
        }

        log::debug!("transaction {} committed", txn.txn_id());
        self.release_locks(txn);
        self.txn_map.lock().unwrap().remove(&txn.txn_id());
        self.global_txn_latch.unlock_shared();
    }

    /// Aborts the transaction. The ABORT record is appended but not
    /// force-flushed; nothing downstream depends on its durability.
    pub fn abort(&self, txn: &Arc<Transaction>) {
        txn.set_state(TransactionState::Aborted);

        // Write-set rollback (LIFO: undo updates, re-insert deletes,
        // delete inserts) is applied here once a lock manager and table
        // heap are integrated.

        if logging_enabled() {
            let mut record =
                LogRecord::new(txn.txn_id(), txn.prev_lsn(), LogRecordType::Abort);
            let lsn = self.log_manager.append_log_record(&mut record);
            txn.set_prev_lsn(lsn);
        }

        log::debug!("transaction {} aborted", txn.txn_id());
        self.release_locks(txn);
        self.txn_map.lock().unwrap().remove(&txn.txn_id());
        self.global_txn_latch.unlock_shared();
    }

    /// Blocks until every live transaction has committed or aborted, then
    /// holds off new transactions. This opens a checkpoint window.
    pub fn block_all_transactions(&self) {
        self.global_txn_latch.lock_exclusive();
    }

    /// Closes the checkpoint window opened by
    /// [`Self::block_all_transactions`].
    pub fn resume_transactions(&self) {
        self.global_txn_latch.unlock_exclusive();
    }

    /// Number of transactions that have begun but not yet committed or
    /// aborted.
    pub fn active_transaction_count(&self) -> usize {
        self.txn_map.lock().unwrap().len()
    }

    pub fn get_transaction(&self, txn_id: &TxnId) -> Option<Arc<Transaction>> {
        self.txn_map.lock().unwrap().get(txn_id).cloned()
    }

    fn release_locks(&self, _txn: &Arc<Transaction>) {
        // Lock-manager integration point; there are no locks to release
        // in this core.
    }
}
