//! Certificate record model

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::id::CertificateId;

/// Format of the `date` field, e.g. `07-03-2025`
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Format of the `issued_at` field, e.g. `2025-03-07T10:30:00.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single issued certificate
///
/// Serialized field order is `id, name, course, date, issued_at`, all as
/// strings, which is the on-disk layout of the certificate collection.
/// Stored values are kept verbatim so rewriting a loaded collection never
/// alters existing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Short opaque identifier
    pub id: CertificateId,

    /// Holder's display name
    pub name: String,

    /// Course or program title
    pub course: String,

    /// Issue date, `DD-MM-YYYY` for certificates issued here
    pub date: String,

    /// Creation timestamp (local time, no zone); absent in some legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
}

impl Certificate {
    /// Create a certificate with explicit dates
    pub fn new(
        id: CertificateId,
        name: impl Into<String>,
        course: impl Into<String>,
        date: impl Into<String>,
        issued_at: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            course: course.into(),
            date: date.into(),
            issued_at,
        }
    }

    /// Create a certificate issued right now
    pub fn issue(id: CertificateId, name: impl Into<String>, course: impl Into<String>) -> Self {
        Self::issue_at(id, name, course, Local::now().naive_local())
    }

    /// Create a certificate issued at `at`, formatted to microsecond precision
    pub fn issue_at(
        id: CertificateId,
        name: impl Into<String>,
        course: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self::new(
            id,
            name,
            course,
            at.format(DATE_FORMAT).to_string(),
            Some(at.format(TIMESTAMP_FORMAT).to_string()),
        )
    }

    /// Case-insensitive match on holder name and course
    pub fn matches_holder(&self, name: &str, course: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
            && self.course.to_lowercase() == course.to_lowercase()
    }
}
