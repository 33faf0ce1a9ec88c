//! Generator module provides the trait and implementations for document generators.
//!
//! A generator receives finalized sections one by one, in reading order, and writes
//! the finished document in a single step at the end.

use crate::error::Result;
use crate::types::EbookMetadata;
use std::path::{Path, PathBuf};

pub mod epub;

/// Common interface for all document generators.
///
/// Implementations own the in-memory document until [`save`](Generator::save) is
/// called. Sections already added are never rolled back; if `save` fails, nothing
/// is guaranteed about the output file.
pub trait Generator {
    /// Creates a new generator instance.
    ///
    /// # Parameters
    /// * `output_dir` - Directory where the generated file will be saved
    /// * `base_filename` - Base name of the output file, without extension
    ///
    /// # Returns
    /// * `Result<Self>` - A new generator instance or an error if creation fails
    fn new(output_dir: &Path, base_filename: &str) -> Result<Self>
    where
        Self: Sized;

    /// Sets the book-level metadata (title, language, authors, ...).
    ///
    /// # Returns
    /// * `Result<&mut Self>` - Self reference for method chaining, or an error if failed
    fn set_metadata(&mut self, metadata: &EbookMetadata) -> Result<&mut Self>
    where
        Self: Sized;

    /// Adds one navigable section to the document.
    ///
    /// # Parameters
    /// * `title` - Raw section title, used for the table of contents
    /// * `body` - HTML fragment making up the section body
    ///
    /// # Returns
    /// * `Result<&mut Self>` - Self reference for method chaining, or an error if failed
    fn add_section(&mut self, title: &str, body: &str) -> Result<&mut Self>
    where
        Self: Sized;

    /// Finalizes the document and writes it to disk.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the written file, or an error if saving fails
    fn save(self) -> Result<PathBuf>;
}
