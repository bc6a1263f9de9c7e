//! Request and response models for the certificate service

use certify_common::{Certificate, CertificateId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum holder name length, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum course title length, in characters
pub const MAX_COURSE_LEN: usize = 200;

/// Rejected user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Input too long. Please shorten your text.")]
    TooLong,

    #[error("Please provide either Certificate ID or both Name and Course.")]
    MissingLookupKey,
}

/// Request to issue a new certificate
#[derive(Debug, Deserialize)]
pub struct IssueCertificateRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub course: String,

    /// Issue even if the holder already has a certificate for this course
    #[serde(default)]
    pub reissue: bool,
}

/// Issue request after trimming and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIssue {
    pub name: String,
    pub course: String,
    pub reissue: bool,
}

impl IssueCertificateRequest {
    /// Trim and check the submitted fields
    pub fn validate(&self) -> Result<ValidatedIssue, InputError> {
        let name = self.name.trim();
        let course = self.course.trim();

        if name.is_empty() || course.is_empty() {
            return Err(InputError::MissingFields);
        }

        if name.chars().count() > MAX_NAME_LEN || course.chars().count() > MAX_COURSE_LEN {
            return Err(InputError::TooLong);
        }

        Ok(ValidatedIssue {
            name: name.to_string(),
            course: course.to_string(),
            reissue: self.reissue,
        })
    }
}

/// Response from issuance
#[derive(Debug, Serialize)]
pub struct IssueCertificateResponse {
    pub success: bool,
    pub message: String,
    pub certificate: Certificate,
}

/// Request to verify a certificate, by ID or by holder and course
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub cert_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub course: Option<String>,
}

/// How a verification request identifies the certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(CertificateId),
    ByHolder { name: String, course: String },
}

impl VerifyRequest {
    /// A non-empty ID takes precedence over name and course
    pub fn lookup(&self) -> Result<Lookup, InputError> {
        let trimmed = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        if let Some(id) = trimmed(&self.cert_id) {
            return Ok(Lookup::ById(CertificateId::normalize(&id)));
        }

        match (trimmed(&self.name), trimmed(&self.course)) {
            (Some(name), Some(course)) => Ok(Lookup::ByHolder { name, course }),
            _ => Err(InputError::MissingLookupKey),
        }
    }
}

/// Verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    NotFound,
}

/// Response from verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: VerificationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
}

impl VerifyResponse {
    pub fn verified(certificate: Certificate) -> Self {
        Self {
            status: VerificationStatus::Verified,
            message: "Certificate verified successfully!".to_string(),
            certificate: Some(certificate),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: VerificationStatus::NotFound,
            message: "Certificate not found. Please check your details.".to_string(),
            certificate: None,
        }
    }
}

/// Single certificate
#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    pub certificate: Certificate,
}

/// List of certificates
#[derive(Debug, Serialize)]
pub struct CertificatesListResponse {
    pub certificates: Vec<Certificate>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(name: &str, course: &str) -> IssueCertificateRequest {
        IssueCertificateRequest {
            name: name.to_string(),
            course: course.to_string(),
            reissue: false,
        }
    }

    #[test]
    fn test_validate_trims_fields() {
        let validated = issue("  Alex Johnson ", "\tPython Programming\n")
            .validate()
            .unwrap();
        assert_eq!(validated.name, "Alex Johnson");
        assert_eq!(validated.course, "Python Programming");
        assert!(!validated.reissue);
    }

    #[test]
    fn test_validate_requires_both_fields() {
        assert_eq!(issue("", "Python").validate(), Err(InputError::MissingFields));
        assert_eq!(issue("Alex", "   ").validate(), Err(InputError::MissingFields));
    }

    #[test]
    fn test_validate_length_limits() {
        let name = "a".repeat(MAX_NAME_LEN);
        let course = "c".repeat(MAX_COURSE_LEN);
        assert!(issue(&name, &course).validate().is_ok());

        let long_name = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(issue(&long_name, "Python").validate(), Err(InputError::TooLong));

        let long_course = "c".repeat(MAX_COURSE_LEN + 1);
        assert_eq!(issue("Alex", &long_course).validate(), Err(InputError::TooLong));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(issue(&name, "Python").validate().is_ok());
    }

    #[test]
    fn test_lookup_prefers_id() {
        let request = VerifyRequest {
            cert_id: Some(" ab12cd34 ".to_string()),
            name: Some("Alex".to_string()),
            course: Some("Python".to_string()),
        };
        assert_eq!(
            request.lookup(),
            Ok(Lookup::ById(CertificateId::from("AB12CD34")))
        );
    }

    #[test]
    fn test_lookup_by_holder() {
        let request = VerifyRequest {
            cert_id: Some("   ".to_string()),
            name: Some(" Alex Johnson".to_string()),
            course: Some("Python ".to_string()),
        };
        assert_eq!(
            request.lookup(),
            Ok(Lookup::ByHolder {
                name: "Alex Johnson".to_string(),
                course: "Python".to_string(),
            })
        );
    }

    #[test]
    fn test_lookup_needs_a_key() {
        let request = VerifyRequest {
            name: Some("Alex Johnson".to_string()),
            ..Default::default()
        };
        assert_eq!(request.lookup(), Err(InputError::MissingLookupKey));
        assert_eq!(
            VerifyRequest::default().lookup(),
            Err(InputError::MissingLookupKey)
        );
    }
}
