pub mod digest;

pub use digest::Sha256Generator;

use hashlink_core::ShortCode;

/// Trait for deriving short codes from long URLs.
///
/// Implementations are pure functions of their input: they never touch
/// storage and the same long URL always yields the same code.
pub trait CodeGenerator: Send + Sync + 'static {
    /// Derives the short code for `long_url`.
    fn generate(&self, long_url: &str) -> ShortCode;
}
