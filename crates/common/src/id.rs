use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of characters kept from a generated UUID
pub const ID_LENGTH: usize = 8;

/// Short opaque certificate identifier, e.g. `3F2A9C1B`
///
/// Generated identifiers are not guaranteed unique on their own; the store
/// rejects collisions and issuers are expected to retry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(String);

impl CertificateId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().to_string();
        Self(uuid[..ID_LENGTH].to_uppercase())
    }

    /// Normalize user input into an identifier (trimmed, uppercased)
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CertificateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CertificateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CertificateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CertificateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CertificateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
