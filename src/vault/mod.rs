//! Vault Module
//!
//! The entry collection, its modified flag, and plain JSON file storage.

pub mod entry;
pub mod model;
pub mod store;

use thiserror::Error;

/// Vault errors
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Entry not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid entries file: {0}")]
    Format(#[from] serde_json::Error),
}

pub type VaultResult<T> = Result<T, VaultError>;

// Re-exports
pub use entry::Entry;
pub use model::DataModel;
pub use store::FileStore;
