//! Disposable backing services for integration tests.
//!
//! Every fixture starts a container on construction and stops it when
//! dropped, so keep the fixture alive for as long as the test uses it.

pub mod error;
pub mod mysql;
pub mod redis;

pub use error::{Result, TestInfraError};
