pub mod constants;
mod error;
mod rwlatch;

pub use error::{Error, Result};
pub use rwlatch::ReaderWriterLatch;
