//! Core data types and reports for the mustepub conversion library.
//!
//! This module defines the data structures shared between the section builder,
//! the document generators and the conversion driver:
//! - Book metadata (`EbookMetadata`)
//! - Finalized section output (`RenderedSection`)
//! - Reporting types (`SectionSummary`, `ConversionSummary`)
//! - Output format selection (`EpubVersion`)

use std::path::PathBuf;

/// Language tag declared in every generated document.
pub const DEFAULT_LANGUAGE: &str = "zh";

/// Title of the implicit section that collects text before the first heading.
pub const PREFACE_TITLE: &str = "前言";

/// EPUB specification version of the generated document.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpubVersion {
    V20,
    #[default]
    V30,
}

impl From<EpubVersion> for epub_builder::EpubVersion {
    fn from(version: EpubVersion) -> Self {
        match version {
            EpubVersion::V20 => epub_builder::EpubVersion::V20,
            EpubVersion::V30 => epub_builder::EpubVersion::V30,
        }
    }
}

/// Metadata embedded into the generated ebook.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EbookMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub language: String, // e.g., "zh"
    pub description: Option<String>,
    pub tags: Vec<String>, // General tags/subjects
}

impl EbookMetadata {
    /// Creates an `EbookMetadata` instance with a title and the default language "zh".
    pub fn default_with_title(title: String) -> Self {
        Self {
            title,
            language: DEFAULT_LANGUAGE.to_string(),
            ..Default::default()
        }
    }
}

/// A finalized section, ready to be handed to a document generator.
///
/// `title` is the raw heading text (used for the table of contents), `body` is the
/// complete HTML fragment: heading, word count paragraph, then the content paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub body: String,
    pub word_count: usize,
}

/// Per-section entry of a [`ConversionSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSummary {
    pub title: String,
    pub word_count: usize,
}

/// Report returned after a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub sections: Vec<SectionSummary>,
}

impl ConversionSummary {
    /// Sum of the logographic character counts of every section.
    pub fn total_word_count(&self) -> usize {
        self.sections.iter().map(|s| s.word_count).sum()
    }
}
