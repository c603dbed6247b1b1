use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::Clock;

/// Opaque identifier correlating a submission with its e-mails,
/// e.g. `Q-20250110-3F9A1C2B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    pub fn generate(clock: &dyn Clock) -> Self {
        let day = clock.now().format("%Y%m%d");
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("Q-{}-{}", day, suffix[..8].to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QuoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
