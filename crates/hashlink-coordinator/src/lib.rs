//! Mapping resolution and creation.
//!
//! [`Coordinator`] sits between request handlers and the two backing
//! stores. It derives short codes, checks both stores concurrently, and
//! keeps the cache consistent with the durable store on write. Every call
//! runs inside one critical section per coordinator, so two requests for
//! the same unmapped URL can never both insert it.
//!
//! # Example
//!
//! ```rust,ignore
//! use hashlink_cache::MokaUrlCache;
//! use hashlink_coordinator::{Coordinator, MappingCoordinator};
//! use hashlink_storage::InMemoryRepository;
//!
//! let coordinator = Coordinator::new(MokaUrlCache::new(), InMemoryRepository::new());
//! let code = coordinator.resolve_or_create("https://example.com").await?;
//! assert_eq!(code.as_str(), "100680ad54");
//! assert_eq!(
//!     coordinator.lookup(&code).await?.as_deref(),
//!     Some("https://example.com")
//! );
//! ```

pub mod config;
pub mod coordinator;
pub mod error;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, MappingCoordinator};
pub use error::{CoordinatorError, Result};
