use super::*;
use crate::config::config::FERRO_DB_DATA_DIR;
use std::io::Read;
use tempfile::NamedTempFile;

#[test]
fn test_append_assigns_sequential_lsns() {
    let log_manager = LogManager::new_for_test();

    let mut record = LogRecord::new(1, INVALID_LSN, LogRecordType::Begin);
    assert_eq!(log_manager.append_log_record(&mut record), 0);
    assert_eq!(record.lsn, 0);

    let mut record = LogRecord::new(1, 0, LogRecordType::Commit);
    assert_eq!(log_manager.append_log_record(&mut record), 1);
    assert_eq!(record.lsn, 1);

    assert_eq!(log_manager.next_lsn(), 2);
}

#[test]
fn test_persistent_lsn_lags_until_flush() {
    let log_manager = LogManager::new_for_test();

    let mut record = LogRecord::new(3, INVALID_LSN, LogRecordType::Begin);
    let lsn = log_manager.append_log_record(&mut record);
    assert_eq!(log_manager.persistent_lsn(), INVALID_LSN);

    log_manager.flush();
    assert_eq!(log_manager.persistent_lsn(), lsn);
}

#[test]
fn test_flush_with_empty_buffer_is_noop() {
    let log_manager = LogManager::new_for_test();

    log_manager.flush();
    assert_eq!(log_manager.persistent_lsn(), INVALID_LSN);

    let mut record = LogRecord::new(1, INVALID_LSN, LogRecordType::Begin);
    let lsn = log_manager.append_log_record(&mut record);
    log_manager.flush();

    // A second flush with nothing buffered must not move the probe.
    log_manager.flush();
    assert_eq!(log_manager.persistent_lsn(), lsn);
}

#[test]
fn test_flushed_records_survive_on_disk() {
    std::fs::create_dir_all(FERRO_DB_DATA_DIR).expect("Failed to create data dir");
    let temp_file = NamedTempFile::new_in(FERRO_DB_DATA_DIR).expect("Failed to create temp file");
    let file_name = temp_file
        .path()
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let appended = {
        let log_manager = LogManager::new(&file_name);
        let mut records = vec![
            LogRecord::new(1, INVALID_LSN, LogRecordType::Begin),
            LogRecord::new(2, INVALID_LSN, LogRecordType::Begin),
            LogRecord::new(1, 0, LogRecordType::Commit),
            LogRecord::new(2, 1, LogRecordType::Abort),
        ];
        for record in records.iter_mut() {
            log_manager.append_log_record(record);
        }
        log_manager.flush();
        records
    };

    // Decode the raw log file and compare against what was appended.
    let mut raw = Vec::new();
    std::fs::File::open(temp_file.path())
        .expect("Failed to reopen log file")
        .read_to_end(&mut raw)
        .expect("Failed to read log file");

    let decoded = decode_all(&raw);
    assert_eq!(decoded, appended);
}

fn decode_all(mut raw: &[u8]) -> Vec<LogRecord> {
    let mut records = Vec::new();
    while !raw.is_empty() {
        let len = u32::from_le_bytes(raw[..4].try_into().unwrap()) as usize;
        let record: LogRecord =
            bincode::deserialize(&raw[4..4 + len]).expect("Failed to decode log record");
        records.push(record);
        raw = &raw[4 + len..];
    }
    records
}
