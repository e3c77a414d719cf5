use crate::transaction::TxnId;
use serde::{Deserialize, Serialize};

/// Log sequence number: a monotonic identifier for a log record.
pub type Lsn = u64;

/// Sentinel for "no log record", e.g. the prev_lsn of a transaction that
/// has not logged anything yet.
pub const INVALID_LSN: Lsn = Lsn::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogRecordType {
    Begin,
    Commit,
    Abort,
}

/// A transaction lifecycle record in the write-ahead log. Each record
/// links back to the previous record of the same transaction through
/// `prev_lsn`, forming a per-transaction chain a recovery layer can walk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Assigned by the log manager when the record is appended.
    pub lsn: Lsn,
    /// The transaction's most recent earlier record, or [`INVALID_LSN`].
    pub prev_lsn: Lsn,
    pub txn_id: TxnId,
    pub record_type: LogRecordType,
}

impl LogRecord {
    pub fn new(txn_id: TxnId, prev_lsn: Lsn, record_type: LogRecordType) -> Self {
        Self {
            lsn: INVALID_LSN,
            prev_lsn,
            txn_id,
            record_type,
        }
    }
}
