use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read certificate store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write certificate store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Certificate store {} is not a valid certificate collection: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Certificate ID already exists: {0}")]
    DuplicateId(String),

    #[error("A certificate for {name} in {course} already exists: {existing_id}")]
    DuplicateHolder {
        name: String,
        course: String,
        existing_id: String,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl Error {
    /// ID of the stored certificate a rejected addition collided with
    pub fn conflicting_id(&self) -> Option<&str> {
        match self {
            Error::DuplicateId(id) => Some(id),
            Error::DuplicateHolder { existing_id, .. } => Some(existing_id),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
