//! Core types and traits for the hashlink URL shortener.
//!
//! This crate holds the vocabulary shared by every other crate in the
//! workspace: the [`ShortCode`] and [`UrlMapping`] types, the store
//! contracts the coordinator consumes ([`UrlCache`], [`ReadRepository`],
//! [`Repository`]) and the error taxonomy for each layer.

pub mod cache;
pub mod error;
pub mod mapping;
pub mod repository;
pub mod shortcode;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, StorageError};
pub use mapping::UrlMapping;
pub use repository::{ReadRepository, Repository};
pub use shortcode::{ShortCode, SHORT_CODE_LENGTH};
