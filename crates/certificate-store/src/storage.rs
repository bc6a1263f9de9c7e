//! JSON file storage for issued certificates

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use certify_common::{Certificate, Error, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::atomic::{parent_dir, write_atomic};

/// One element of the stored array
///
/// Entries that are not certificates are skipped by reads but written back
/// untouched by additions, so a single bad record never hides or destroys
/// the rest of the collection.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Entry {
    Certificate(Certificate),
    Unreadable(serde_json::Value),
}

impl Entry {
    fn certificate(&self) -> Option<&Certificate> {
        match self {
            Entry::Certificate(certificate) => Some(certificate),
            Entry::Unreadable(_) => None,
        }
    }
}

/// Storage backend for certificates
///
/// Cloning yields another handle on the same file and the same writer lock.
/// Reads take no lock; every mutation holds the writer lock for its whole
/// read-modify-write cycle and replaces the file atomically.
#[derive(Debug, Clone)]
pub struct CertificateStore {
    path: Arc<PathBuf>,
    writer: Arc<Mutex<()>>,
}

impl CertificateStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// Each call creates a new writer lock. Mutations are only serialized
    /// between clones of one handle, so share a single store (clone it)
    /// rather than calling `new` twice for the same path. Separate processes
    /// writing the same file are not coordinated.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file as an empty collection if it does not exist
    pub async fn ensure_store(&self) -> Result<()> {
        let _guard = self.writer.lock().await;

        let exists = fs::try_exists(self.path.as_path())
            .await
            .map_err(|e| self.write_error(e))?;
        if exists {
            debug!("Certificate store already present at {}", self.path.display());
            return Ok(());
        }

        self.write_collection::<Certificate>(&[]).await?;
        info!("Initialized empty certificate store at {}", self.path.display());
        Ok(())
    }

    /// Load every certificate, degrading to an empty collection on failure
    ///
    /// Array elements that do not describe a certificate are skipped.
    pub async fn load_all(&self) -> Vec<Certificate> {
        match self.read_collection().await {
            Ok(entries) => entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| match entry {
                    Entry::Certificate(certificate) => Some(certificate),
                    Entry::Unreadable(value) => {
                        warn!(
                            "Skipping unreadable certificate entry {} in {}: {}",
                            index,
                            self.path.display(),
                            value
                        );
                        None
                    }
                })
                .collect(),
            Err(e) => {
                match &e {
                    Error::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                        warn!("Error loading certificates: {}", e);
                    }
                    _ => error!("Error loading certificates: {}", e),
                }
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection
    pub async fn save_all(&self, certificates: &[Certificate]) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.write_collection(certificates).await
    }

    /// Append a new certificate
    ///
    /// Fails with [`Error::DuplicateId`] if the ID is taken and with
    /// [`Error::DuplicateHolder`] if the holder already has a certificate
    /// for the same course.
    pub async fn add(&self, certificate: &Certificate) -> Result<()> {
        self.insert(certificate, false).await
    }

    /// Append a certificate for a holder who may already have one for the
    /// same course. The ID must still be unused.
    pub async fn add_reissue(&self, certificate: &Certificate) -> Result<()> {
        self.insert(certificate, true).await
    }

    /// Find a certificate by exact ID
    pub async fn find_by_id(&self, id: &str) -> Option<Certificate> {
        self.load_all()
            .await
            .into_iter()
            .find(|c| c.id.as_str() == id)
    }

    /// Find a certificate by holder name and course, ignoring case
    pub async fn find_by_name_and_course(&self, name: &str, course: &str) -> Option<Certificate> {
        self.load_all()
            .await
            .into_iter()
            .find(|c| c.matches_holder(name, course))
    }

    /// Number of stored certificates
    pub async fn count(&self) -> usize {
        self.load_all().await.len()
    }

    async fn insert(&self, certificate: &Certificate, allow_repeat: bool) -> Result<()> {
        let _guard = self.writer.lock().await;

        let mut entries = self.load_for_update().await?;
        let mut stored = entries.iter().filter_map(Entry::certificate);

        if stored.clone().any(|c| c.id == certificate.id) {
            debug!("Certificate ID already taken: {}", certificate.id);
            return Err(Error::DuplicateId(certificate.id.to_string()));
        }

        if !allow_repeat {
            if let Some(existing) =
                stored.find(|c| c.matches_holder(&certificate.name, &certificate.course))
            {
                debug!(
                    "Certificate for {} in {} already exists: {}",
                    certificate.name, certificate.course, existing.id
                );
                return Err(Error::DuplicateHolder {
                    name: certificate.name.clone(),
                    course: certificate.course.clone(),
                    existing_id: existing.id.to_string(),
                });
            }
        }

        entries.push(Entry::Certificate(certificate.clone()));
        self.write_collection(&entries).await?;

        info!(
            "Certificate {} added for {}",
            certificate.id, certificate.name
        );
        Ok(())
    }

    /// Strict read for mutations: a missing file is an empty collection, but
    /// content that is not a JSON array is an error so it never gets
    /// overwritten.
    async fn load_for_update(&self) -> Result<Vec<Entry>> {
        match self.read_collection().await {
            Ok(entries) => Ok(entries),
            Err(Error::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn read_collection(&self) -> Result<Vec<Entry>> {
        let bytes = fs::read(self.path.as_path())
            .await
            .map_err(|source| Error::Read {
                path: self.path.to_path_buf(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::Corrupt {
            path: self.path.to_path_buf(),
            source,
        })
    }

    /// Caller must hold the writer lock
    async fn write_collection<T: Serialize>(&self, entries: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(entries)?;

        fs::create_dir_all(parent_dir(&self.path))
            .await
            .map_err(|e| self.write_error(e))?;

        write_atomic(&self.path, &json).await.map_err(|e| {
            error!("Error saving certificates: {}", e);
            self.write_error(e)
        })?;

        debug!(
            "Wrote {} entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::Write {
            path: self.path.to_path_buf(),
            source,
        }
    }
}
