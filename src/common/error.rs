use serde::{Deserialize, Serialize};

use crate::storage::disk::disk_manager::PageId;

/// Crate-wide result type, returned by all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A ferrodb error. All errors that cross a module boundary are collapsed
/// into this enum so callers can match on them without caring which layer
/// produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// Data was found to be in an unexpected or corrupt state.
    InvalidData(String),
    /// A caller supplied an invalid argument, e.g. an out-of-range column
    /// reference.
    InvalidInput(String),
    /// An I/O error from the backing file or the write-ahead log.
    Io(String),
    /// The requested page is not resident in the buffer pool.
    PageNotFound(PageId),
    /// The page is pinned and cannot be deleted; the caller must unpin it
    /// first.
    PagePinned(PageId),
    /// The operation is outside the contract of the component it was
    /// invoked on.
    NotImplemented(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::Io(msg) => write!(f, "io error: {msg}"),
            Error::PageNotFound(page_id) => {
                write!(f, "page {page_id} is not in the buffer pool")
            }
            Error::PagePinned(page_id) => write!(f, "page {page_id} is pinned"),
            Error::NotImplemented(msg) => write!(f, "not implemented: {msg}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

impl<T> From<Error> for Result<T> {
    fn from(error: Error) -> Self {
        Err(error)
    }
}

/// Constructs an `Error::InvalidInput` result from a format string.
#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => {
        ::std::result::Result::Err($crate::common::Error::InvalidInput(format!($($args)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert_eq!(err, Error::Io("no such file".to_string()));
    }

    #[test]
    fn test_errinput_macro() {
        let result: Result<()> = errinput!("bad column {}", 3);
        assert_eq!(
            result,
            Err(Error::InvalidInput("bad column 3".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::PageNotFound(7).to_string(),
            "page 7 is not in the buffer pool"
        );
        assert_eq!(Error::PagePinned(2).to_string(), "page 2 is pinned");
    }
}
