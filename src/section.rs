//! Line-stream to section segmentation.
//!
//! The [`SectionBuilder`] consumes normalized lines and groups them into titled
//! [`Section`]s. A line starting with [`HEADING_MARKER`] closes the current section
//! and opens a new one; every other non-blank line becomes an escaped `<p>` paragraph
//! of the current section. Text before the first heading lands in an implicit
//! preface section titled [`PREFACE_TITLE`].
//!
//! Finalized sections are pushed, in order, into a [`SectionSink`]. The EPUB
//! generator is a sink; so is a plain `Vec<RenderedSection>`, which is handy when
//! the HTML is needed without writing a file.

use std::io::BufRead;

use log::debug;

use crate::error::Result;
use crate::normalize::{decode_line, normalize_line};
use crate::types::{PREFACE_TITLE, RenderedSection, SectionSummary};

/// Prefix that marks a line as a section heading.
pub const HEADING_MARKER: &str = "# ";

/// Inclusive codepoint ranges counted as logographic characters:
/// CJK Unified Ideographs, Extension A and Extension B.
const LOGOGRAPHIC_RANGES: [(u32, u32); 3] = [
    (0x4E00, 0x9FFF),
    (0x3400, 0x4DBF),
    (0x20000, 0x2A6DF),
];

/// Receives finalized sections in the order they were opened.
pub trait SectionSink {
    /// Takes ownership of one finalized section.
    fn accept(&mut self, section: RenderedSection) -> Result<()>;
}

impl SectionSink for Vec<RenderedSection> {
    fn accept(&mut self, section: RenderedSection) -> Result<()> {
        self.push(section);
        Ok(())
    }
}

/// Escapes the HTML-significant characters `&`, `'`, `<`, `>` and `"`.
///
/// # Examples
///
/// ```
/// use mustepub::section::escape_html;
///
/// assert_eq!(escape_html("<b>你好</b>"), "&lt;b&gt;你好&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Counts the codepoints of `text` that fall in one of the logographic ranges.
///
/// Punctuation (including full-width CJK punctuation), Latin letters and digits
/// are not counted.
pub fn count_logographic(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            let cp = c as u32;
            LOGOGRAPHIC_RANGES
                .iter()
                .any(|&(start, end)| (start..=end).contains(&cp))
        })
        .count()
}

/// Returns the raw title if `line` is a heading line.
pub fn heading_title(line: &str) -> Option<&str> {
    line.strip_prefix(HEADING_MARKER)
}

/// One chapter of the output document, accumulated line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    raw_title: String,
    content: Vec<String>,
    word_count: usize,
}

impl Section {
    /// Opens an empty section. The title is escaped on the way in.
    pub fn new(raw_title: &str) -> Self {
        Self {
            title: escape_html(raw_title),
            raw_title: raw_title.to_string(),
            content: Vec::new(),
            word_count: 0,
        }
    }

    /// The implicit section that precedes the first heading.
    pub fn preface() -> Self {
        Self::new(PREFACE_TITLE)
    }

    /// Escaped title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title as it appeared after the heading marker.
    pub fn raw_title(&self) -> &str {
        &self.raw_title
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Escaped `<p>` paragraphs in reading order, concatenated.
    pub fn content(&self) -> String {
        self.content.concat()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Appends a body line as a paragraph and returns its logographic count.
    pub fn push_paragraph(&mut self, line: &str) -> usize {
        let count = count_logographic(line);
        self.content.push(format!("<p>{}</p>", escape_html(line)));
        self.word_count += count;
        count
    }

    /// Renders the section into its final HTML fragment.
    pub fn render(self) -> RenderedSection {
        let mut body = format!(
            "<h2>{}</h2><p><i>字数：{}</i></p>",
            self.title, self.word_count
        );
        body.push_str(&self.content());
        RenderedSection {
            title: self.raw_title,
            body,
            word_count: self.word_count,
        }
    }
}

/// What a pushed line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The line was empty and ignored.
    Blank,
    /// The line opened a new section with this raw title.
    Heading(String),
    /// The line was appended to the current section.
    Body { logographic: usize },
}

/// Line-stream state machine that turns normalized lines into sections.
///
/// There is always exactly one current section. A heading flushes it to the sink
/// and opens the next; [`finish`](SectionBuilder::finish) flushes the last one,
/// even when it is the untouched preface.
pub struct SectionBuilder<'a, S: SectionSink> {
    sink: &'a mut S,
    current: Section,
    finalized: Vec<SectionSummary>,
}

impl<'a, S: SectionSink> SectionBuilder<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            current: Section::preface(),
            finalized: Vec::new(),
        }
    }

    /// The section currently being accumulated.
    pub fn current(&self) -> &Section {
        &self.current
    }

    /// Feeds one already-normalized line into the builder.
    pub fn push_line(&mut self, line: &str) -> Result<LineKind> {
        if line.is_empty() {
            return Ok(LineKind::Blank);
        }
        if let Some(title) = heading_title(line) {
            let next = Section::new(title);
            let previous = std::mem::replace(&mut self.current, next);
            self.flush(previous)?;
            return Ok(LineKind::Heading(title.to_string()));
        }
        let logographic = self.current.push_paragraph(line);
        Ok(LineKind::Body { logographic })
    }

    /// Reads `reader` to the end, normalizing each line before pushing it.
    ///
    /// Lines are split on `\n` with an optional trailing `\r` removed. Each invalid
    /// UTF-8 byte is replaced with U+FFFD rather than rejected. `on_heading` is called with the
    /// raw title of every heading, after the new section has been opened.
    pub fn read_lines<R, F>(&mut self, mut reader: R, mut on_heading: F) -> Result<()>
    where
        R: BufRead,
        F: FnMut(&str),
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let raw = decode_line(&buf);
            if let LineKind::Heading(title) = self.push_line(&normalize_line(&raw))? {
                on_heading(&title);
            }
        }
        Ok(())
    }

    /// Flushes the current section and returns the summaries of every section,
    /// in the order they were finalized.
    pub fn finish(mut self) -> Result<Vec<SectionSummary>> {
        let last = std::mem::replace(&mut self.current, Section::preface());
        self.flush(last)?;
        Ok(self.finalized)
    }

    fn flush(&mut self, section: Section) -> Result<()> {
        debug!(
            "Finalizing section '{}' ({} paragraphs, {} characters)",
            section.raw_title(),
            section.content.len(),
            section.word_count()
        );
        self.finalized.push(SectionSummary {
            title: section.raw_title().to_string(),
            word_count: section.word_count(),
        });
        self.sink.accept(section.render())
    }
}

/// Segments `lines` into rendered sections without writing any document.
///
/// Each line is normalized first, exactly as when reading from a file.
pub fn build_sections<I, L>(lines: I) -> Result<Vec<RenderedSection>>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut sections = Vec::new();
    let mut builder = SectionBuilder::new(&mut sections);
    for line in lines {
        builder.push_line(&normalize_line(line.as_ref()))?;
    }
    builder.finish()?;
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_five_characters() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&#34;&#39;");
        assert_eq!(escape_html("plain 文本"), "plain 文本");
    }

    #[test]
    fn test_count_logographic_ranges() {
        assert_eq!(count_logographic("Hello 世界"), 2);
        assert_eq!(count_logographic("\u{4E00}\u{9FFF}"), 2);
        assert_eq!(count_logographic("\u{3400}\u{4DBF}"), 2);
        assert_eq!(count_logographic("\u{20000}\u{2A6DF}"), 2);
        assert_eq!(count_logographic("\u{4DFF}\u{A000}\u{2A700}"), 0);
    }

    #[test]
    fn test_count_ignores_punctuation_latin_and_digits() {
        assert_eq!(count_logographic("，。！？“”《》"), 0);
        assert_eq!(count_logographic("abc XYZ 0123456789"), 0);
        assert_eq!(count_logographic("第1章：开始!"), 4);
    }

    #[test]
    fn test_heading_requires_marker_with_space() {
        assert_eq!(heading_title("# Intro"), Some("Intro"));
        assert_eq!(heading_title("#Intro"), None);
        assert_eq!(heading_title("## Intro"), None);
        assert_eq!(heading_title(" # Intro"), None);
    }

    #[test]
    fn test_heading_keeps_space_before_non_ascii_space() -> Result<()> {
        let sections = build_sections(["# Intro \u{A0}"])?;
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].title, "Intro ");
        assert!(sections[1].body.starts_with("<h2>Intro </h2>"));
        Ok(())
    }

    #[test]
    fn test_read_lines_replaces_each_invalid_byte() -> Result<()> {
        let mut sink: Vec<RenderedSection> = Vec::new();
        let mut builder = SectionBuilder::new(&mut sink);
        builder.read_lines(&b"\xE4\xB8x\n"[..], |_| {})?;
        builder.finish()?;
        assert!(sink[0].body.ends_with("<p>\u{FFFD}\u{FFFD}x</p>"));
        Ok(())
    }

    #[test]
    fn test_render_fragment_layout() {
        let mut section = Section::new("A & B");
        section.push_paragraph("第一段");
        section.push_paragraph("second");
        assert_eq!(section.content(), "<p>第一段</p><p>second</p>");
        let rendered = section.render();
        assert_eq!(rendered.title, "A & B");
        assert_eq!(rendered.word_count, 3);
        assert_eq!(
            rendered.body,
            "<h2>A &amp; B</h2><p><i>字数：3</i></p><p>第一段</p><p>second</p>"
        );
    }

    #[test]
    fn test_push_line_kinds() -> Result<()> {
        let mut sink: Vec<RenderedSection> = Vec::new();
        let mut builder = SectionBuilder::new(&mut sink);
        assert_eq!(builder.push_line("")?, LineKind::Blank);
        assert_eq!(
            builder.push_line("你好 world")?,
            LineKind::Body { logographic: 2 }
        );
        assert_eq!(
            builder.push_line("# 第二章")?,
            LineKind::Heading("第二章".to_string())
        );
        assert_eq!(builder.current().raw_title(), "第二章");
        assert!(builder.current().is_empty());
        let summaries = builder.finish()?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(sink.len(), 2);
        Ok(())
    }
}
