//! Durable [`Repository`] adapters.

pub mod memory;
pub mod mysql;

pub use hashlink_core::{ReadRepository, Repository, StorageError};
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
