//! Custom error types and result handling for mustepub operations.
//!
//! Every fallible operation in the crate returns a [`Result<T>`], which is a type
//! alias for `std::result::Result<T, Error>`. Errors are never retried; they bubble
//! up to the caller (or to `main`, which reports them and exits with a failure code).
//!
use std::path::PathBuf;

/// Type alias for Results with mustepub errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all mustepub operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O errors while opening, reading or writing files
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// EPUB generation errors
    #[error(transparent)]
    Epub(#[from] epub_builder::Error),
    /// Configuration builder errors (missing or invalid fields)
    #[error(transparent)]
    ConfigBuilder(#[from] crate::mustepub::MustEpubConfigBuilderError),
    /// Error for invalid file or directory paths
    #[error("The given path '{0:?}' is invalid: {1}")]
    InvalidPath(PathBuf, String),
    /// Error for resources that couldn't be found (e.g., the input manuscript)
    #[error("Not found: {0}")]
    NotFound(String),
    /// Other errors that don't fit into specific categories
    #[error("Other error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
