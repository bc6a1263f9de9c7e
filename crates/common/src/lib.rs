//! Shared types for the certificate registry: the certificate record model,
//! its identifier and the error type used across crates.

pub mod certificate;
pub mod error;
pub mod id;

pub use certificate::Certificate;
pub use error::{Error, Result};
pub use id::CertificateId;
