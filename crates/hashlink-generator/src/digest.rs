use crate::CodeGenerator;
use hashlink_core::{ShortCode, SHORT_CODE_LENGTH};
use sha2::{Digest, Sha256};

/// Derives codes from the sha256 digest of the long URL.
///
/// The digest is hex encoded and truncated to [`SHORT_CODE_LENGTH`]
/// characters. Truncation makes collisions possible; callers that persist
/// codes must compare the stored long URL before treating a hit as a match.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Generator;

impl Sha256Generator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for Sha256Generator {
    fn generate(&self, long_url: &str) -> ShortCode {
        let digest = Sha256::digest(long_url.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(SHORT_CODE_LENGTH);
        ShortCode::new_unchecked(encoded)
    }
}
