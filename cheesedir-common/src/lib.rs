//! # Cheese Directory Common Library
//!
//! Shared code for the cheese directory application:
//! - Record model and field normalization
//! - CSV row codec (bilingual source layout, flat export layout)
//! - In-memory record store with CSV import/export
//! - SQLite mirror kept in sync with the store
//! - Configuration loading

pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod normalize;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::Record;
pub use store::RecordStore;
