//! [`UrlCache`](hashlink_core::UrlCache) adapters.
//!
//! - [`MokaUrlCache`]: bounded in-process cache, for single-node deployments
//!   and tests.
//! - [`RedisUrlCache`]: wraps an established Redis connection.

pub mod moka;
pub mod redis;

pub use self::moka::{CacheConfig, MokaUrlCache};
pub use self::redis::RedisUrlCache;
pub use hashlink_core::{CacheError, UrlCache};
