//! mustepub - Plain-text manuscript to EPUB conversion library
//!
//! This crate turns a line-oriented text manuscript into an EPUB ebook. Lines that
//! start with `"# "` open a new section; every other non-blank line becomes a
//! paragraph of the current section. Each section is prefixed with a count of its
//! CJK (logographic) characters.
//!
//! # Getting Started
//!
//! ```rust,no_run
//! use mustepub::prelude::*;
//!
//! fn main() -> mustepub::error::Result<()> {
//!     let config = MustEpubConfig::builder()
//!         .input_path(PathBuf::from("./books/三体.txt"))
//!         .print_progress(false)
//!         .build()?;
//!
//!     // Writes ./books/三体.epub
//!     let summary = config.convert()?;
//!     for section in &summary.sections {
//!         println!("{}: {}", section.title, section.word_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! To segment text without writing a file, use [`section::build_sections`] or drive
//! a [`section::SectionBuilder`] with your own [`section::SectionSink`].

pub mod error;
pub mod generator;
pub mod mustepub;
pub mod normalize;
pub mod path_utils;
pub mod section;
pub mod types;

// Publicly expose the main `MustEpubConfig` struct and its builder
pub use mustepub::MustEpubConfig;
pub use mustepub::MustEpubConfigBuilder;

// Re-export core types for direct access
pub use types::{
    ConversionSummary, EbookMetadata, EpubVersion, RenderedSection, SectionSummary,
};

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types and traits, so a single
/// `use mustepub::prelude::*;` is enough for typical usage.
pub mod prelude {
    pub use super::{
        ConversionSummary, EbookMetadata, EpubVersion, MustEpubConfig, MustEpubConfigBuilder,
        RenderedSection, SectionSummary, error, generator, types,
    };
    pub use crate::generator::Generator;
    pub use crate::generator::epub::EPub;
    pub use crate::normalize::{decode_line, normalize_line};
    pub use crate::section::{
        LineKind, Section, SectionBuilder, SectionSink, build_sections, count_logographic,
        escape_html,
    };
    pub use std::path::{Path, PathBuf};
}
