use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductsError {
    /// Carries the requested id.
    #[error("Product not found")]
    NotFound(String),

    #[error("Failed to read {path}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    StorageWrite { path: PathBuf, reason: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProductsError {
    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ProductsError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ProductsError::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Map this error to the HTTP status the adapter answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductsError::NotFound(_) => 404,
            ProductsError::InvalidBody(_) => 400,
            ProductsError::StorageRead { .. }
            | ProductsError::StorageWrite { .. }
            | ProductsError::Config(_)
            | ProductsError::Internal(_) => 500,
        }
    }
}

impl From<confique::Error> for ProductsError {
    fn from(err: confique::Error) -> Self {
        ProductsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProductsError>;
