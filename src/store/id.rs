//! Document identifiers.

use super::StoreError;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A store-generated document identifier.
///
/// Rendered as 32 lowercase hex digits without hyphens. Parsing also accepts
/// the hyphenated form, but anything else is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the simple (32) and hyphenated (36) forms; braced and URN
        // spellings of the same id are malformed here.
        if s.len() != 32 && s.len() != 36 {
            return Err(StoreError::InvalidId(s.to_string()));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}
