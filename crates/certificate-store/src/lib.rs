//! Certificate Store
//!
//! Durable persistence for issued certificates, kept as a single JSON array
//! on disk. Mutations go through one writer lock per store handle and replace
//! the file atomically, so concurrent additions are never lost and readers
//! never see a partially written collection.

mod atomic;
pub mod storage;

pub use storage::CertificateStore;
