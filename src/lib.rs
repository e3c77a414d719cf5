#![crate_type = "lib"]
#![crate_name = "ferrodb"]

pub mod common;
pub mod config;
pub mod execution;
pub mod recovery;
pub mod storage;
pub mod transaction;
pub mod types;
