//! SQLite mirror of the record store

pub mod filter;
pub mod init;
pub mod mirror;

pub use filter::{Column, FilterValue, RecordFilter};
pub use init::*;
pub use mirror::Mirror;
