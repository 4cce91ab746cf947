use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A short code together with the long URL it resolves to.
///
/// Field names match the persisted layout (`short_url`, `long_url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    #[serde(rename = "short_url")]
    pub short_code: ShortCode,
    pub long_url: String,
}

impl UrlMapping {
    pub fn new(short_code: ShortCode, long_url: impl Into<String>) -> Self {
        Self {
            short_code,
            long_url: long_url.into(),
        }
    }
}
