use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::generator::{Generator, epub::EPub};
use crate::path_utils::{file_name_without_extension, parent_dir, path_to_string_lossy};
use crate::section::SectionBuilder;
use crate::types::{ConversionSummary, DEFAULT_LANGUAGE, EbookMetadata, EpubVersion};

/// The mustepub conversion configuration, built declaratively using the builder pattern.
///
/// A configuration describes one manuscript-to-EPUB conversion: where the text
/// comes from, where the document goes, and the metadata to embed. Once built, run
/// it with [`convert`](MustEpubConfig::convert).
///
/// ## Builder Pattern
///
/// ```rust,no_run
/// # use mustepub::prelude::*;
/// # fn main() -> mustepub::error::Result<()> {
/// let config = MustEpubConfig::builder()
///     .input_path(PathBuf::from("./manuscripts/novel.txt"))
///     .authors(vec!["佚名".to_string()])
///     .build()?;
///
/// let summary = config.convert()?;
/// println!("{} sections written to {:?}", summary.sections.len(), summary.output_path);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(setter(into, strip_option), build_fn(validate = "Self::validate"))]
pub struct MustEpubConfig {
    /// Plain-text manuscript to convert. Required.
    pub input_path: PathBuf,

    /// Directory where the EPUB is written.
    ///
    /// Defaults to the directory containing [`input_path`](MustEpubConfig::input_path).
    /// Created if it does not exist.
    #[builder(default)]
    pub output_dir: Option<PathBuf>,

    /// Book title override.
    ///
    /// Defaults to the input file name without its final extension. The output file
    /// is always named after the input, not after this override.
    #[builder(default)]
    pub title: Option<String>,

    /// Authors embedded as creator metadata.
    #[builder(default)]
    pub authors: Vec<String>,

    /// Optional book description.
    #[builder(default)]
    pub description: Option<String>,

    /// Subject tags embedded as `dc:subject` metadata.
    #[builder(default)]
    pub tags: Vec<String>,

    /// Declared language of the document.
    #[builder(default = "DEFAULT_LANGUAGE.to_string()")]
    pub language: String,

    /// Whether to print `added section: ...` and `writing...` progress lines to stdout.
    #[builder(default = "true")]
    pub print_progress: bool,

    /// EPUB specification version of the output.
    #[builder(default)]
    pub epub_version: EpubVersion,
}

impl MustEpubConfig {
    /// Creates a new builder for configuring `MustEpubConfig`.
    pub fn builder() -> MustEpubConfigBuilder {
        MustEpubConfigBuilder::default()
    }

    /// Checks that the configured input can be converted, without reading it.
    ///
    /// # Returns
    ///
    /// * `Ok(&self)` - The input path exists and is a file
    /// * `Err(Error)` - `NotFound` for a missing input, `InvalidPath` for a directory
    pub fn preflight_check(&self) -> Result<&Self> {
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::Other("`input_path` must not be empty.".to_string()));
        }
        if !self.input_path.exists() {
            return Err(Error::NotFound(format!(
                "Input file does not exist: {:?}",
                self.input_path
            )));
        }
        if !self.input_path.is_file() {
            return Err(Error::InvalidPath(
                self.input_path.clone(),
                "Input path is not a file.".to_string(),
            ));
        }
        Ok(self)
    }

    /// Base name shared by the book title and the output file.
    pub fn base_name(&self) -> String {
        file_name_without_extension(&self.input_path)
    }

    /// Metadata that will be embedded into the document.
    pub fn resolve_metadata(&self) -> EbookMetadata {
        let title = self.title.clone().unwrap_or_else(|| self.base_name());
        EbookMetadata {
            authors: self.authors.clone(),
            language: self.language.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            ..EbookMetadata::default_with_title(title)
        }
    }

    /// Directory the document is written to.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| parent_dir(&self.input_path))
    }

    /// Runs the full conversion: read, segment, and write the EPUB.
    ///
    /// Sections are added to the in-memory document as they are finalized; the file
    /// is only written once the whole input has been read successfully. Any read
    /// error aborts the conversion before anything is written.
    ///
    /// # Returns
    ///
    /// * `Ok(ConversionSummary)` - Output path and per-section word counts
    /// * `Err(Error)` - Validation, I/O or EPUB generation failure
    pub fn convert(&self) -> Result<ConversionSummary> {
        self.preflight_check()?;

        let metadata = self.resolve_metadata();
        let output_dir = self.resolve_output_dir();
        info!(
            "Converting '{}' into '{}'",
            path_to_string_lossy(&self.input_path),
            metadata.title
        );

        let file = File::open(&self.input_path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to open input file '{}': {}",
                    path_to_string_lossy(&self.input_path),
                    e
                ),
            ))
        })?;

        let mut generator = EPub::new(&output_dir, &self.base_name())?;
        generator.set_version(self.epub_version);
        generator.set_metadata(&metadata)?;

        let mut builder = SectionBuilder::new(&mut generator);
        builder.read_lines(BufReader::new(file), |title| {
            if self.print_progress {
                println!("added section: {}", title);
            }
        })?;
        let sections = builder.finish()?;

        if sections.len() == 1 {
            warn!(
                "No headings found in '{}', all text went into a single section",
                path_to_string_lossy(&self.input_path)
            );
        }

        if self.print_progress {
            println!("writing...");
        }
        debug!(
            "Saving {} sections to {:?}",
            generator.section_count(),
            generator.output_file()
        );
        let output_path = generator.save()?;
        info!("Wrote '{}'", path_to_string_lossy(&output_path));

        Ok(ConversionSummary {
            output_path,
            sections,
        })
    }
}

impl MustEpubConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err("Language must not be empty.".to_string());
            }
        }
        if let Some(Some(title)) = &self.title {
            if title.trim().is_empty() {
                return Err("Title override must not be empty.".to_string());
            }
        }
        Ok(())
    }
}
