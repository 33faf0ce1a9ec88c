use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::path_utils::{output_file_path, path_to_string_lossy, prepare_long_path};
use crate::section::{SectionSink, escape_html};
use crate::types::{DEFAULT_LANGUAGE, EbookMetadata, EpubVersion, RenderedSection};
use epub_builder::{EpubBuilder, EpubContent, ZipLibrary};
use log::debug;

/// File extension of the generated documents.
pub const EPUB_EXTENSION: &str = "epub";

/// Wraps a section body into a complete XHTML document.
///
/// # Arguments
///
/// * `escaped_title` - Section title, already HTML-escaped
/// * `language` - Language tag for the `lang` attributes
/// * `body` - HTML fragment placed inside `<body>`
fn generate_xhtml(escaped_title: &str, language: &str, body: &str) -> String {
    const TEMPLATE: &str = include_str!("../../templates/Section.xhtml");
    // Split first so placeholders inside the body are left alone.
    let (head, tail) = TEMPLATE.split_once("%body%").unwrap_or((TEMPLATE, ""));
    let head = head
        .replace("%lang%", language)
        .replace("%title%", escaped_title);
    let mut xhtml = String::with_capacity(head.len() + body.len() + tail.len());
    xhtml.push_str(&head);
    xhtml.push_str(body);
    xhtml.push_str(tail);
    xhtml
}

/// A generator for creating EPUB files from text sections.
///
/// This struct wraps the `EpubBuilder` functionality and implements the `Generator`
/// trait. Each added section becomes its own XHTML file and table of contents entry.
pub struct EPub {
    epub: EpubBuilder<ZipLibrary>,
    output_path: PathBuf,
    filename_base: String,
    language: String,
    section_count: usize,
}

impl EPub {
    /// Selects the EPUB specification version of the output (EPUB 3 by default).
    pub fn set_version(&mut self, version: EpubVersion) -> &mut Self {
        self.epub.epub_version(version.into());
        self
    }

    /// Number of sections added so far.
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Path the document will be written to by [`save`](Generator::save).
    pub fn output_file(&self) -> PathBuf {
        output_file_path(&self.output_path, &self.filename_base, EPUB_EXTENSION)
    }
}

impl Generator for EPub {
    fn new(output_dir: &Path, filename_base: &str) -> Result<Self> {
        let mut epub = EpubBuilder::new(ZipLibrary::new()?)?;

        epub.epub_version(EpubVersion::default().into());

        epub.stylesheet(include_bytes!("../../templates/Epub.css").as_slice())?;

        // Ensure output directory exists
        if !output_dir.as_os_str().is_empty() && !output_dir.exists() {
            std::fs::create_dir_all(output_dir)?;
        }

        Ok(EPub {
            epub,
            output_path: output_dir.to_path_buf(),
            filename_base: filename_base.to_string(),
            language: DEFAULT_LANGUAGE.to_string(), // Updated by set_metadata
            section_count: 0,
        })
    }

    fn set_metadata(&mut self, metadata: &EbookMetadata) -> Result<&mut Self> {
        self.epub.metadata("title", &metadata.title)?;

        for author in &metadata.authors {
            self.epub.metadata("author", author)?;
        }

        if !metadata.language.is_empty() {
            self.language = metadata.language.clone();
        }
        self.epub.set_lang(&self.language);

        if let Some(description) = &metadata.description {
            self.epub.metadata("description", description)?;
        }
        for tag in &metadata.tags {
            self.epub.metadata("subject", tag)?;
        }

        Ok(self)
    }

    fn add_section(&mut self, title: &str, body: &str) -> Result<&mut Self> {
        self.section_count += 1;
        let file_name = format!("section_{:04}.xhtml", self.section_count);
        let xhtml = generate_xhtml(&escape_html(title), &self.language, body);

        debug!("Adding EPUB content '{}' for section '{}'", file_name, title);
        self.epub
            .add_content(EpubContent::new(file_name, xhtml.as_bytes()).title(title))?;
        Ok(self)
    }

    fn save(mut self) -> Result<PathBuf> {
        let output_file = self.output_file();
        let prepared_output_file = prepare_long_path(&output_file)?;

        let file = File::create(&prepared_output_file).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create EPUB file '{}': {}",
                    path_to_string_lossy(&output_file),
                    e
                ),
            ))
        })?;

        self.epub.generate(file)?;
        debug!(
            "Wrote {} sections to '{}'",
            self.section_count,
            path_to_string_lossy(&output_file)
        );
        Ok(output_file)
    }
}

impl SectionSink for EPub {
    fn accept(&mut self, section: RenderedSection) -> Result<()> {
        self.add_section(&section.title, &section.body)?;
        Ok(())
    }
}
