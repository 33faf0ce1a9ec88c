//! Common test utilities and constants for the mustepub crate.
//!
//! Provides functions for setting up scratch directories, writing manuscript
//! fixtures and inspecting the generated EPUB archives.

use rand::{Rng, distributions::Alphanumeric};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub const TEST_TMP_DIR: &str = "tests/tmp";

/// Creates a clean, uniquely named scratch directory for one test.
#[allow(dead_code)]
pub fn setup_test_dir(sub_path: &str) -> PathBuf {
    let rand_string: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let test_dir = PathBuf::from(TEST_TMP_DIR).join(format!("{}-{}", sub_path, rand_string));
    if test_dir.exists() {
        fs::remove_dir_all(&test_dir).unwrap();
    }
    fs::create_dir_all(&test_dir).unwrap();
    test_dir
}

/// Writes `lines` joined with `\n` to `dir/name` and returns the file path.
#[allow(dead_code)]
pub fn write_manuscript(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Checks that a ZIP file (EPUB) exists and contains at least one entry.
#[allow(dead_code)]
pub fn assert_valid_zip_file(path: &Path) {
    assert!(path.exists(), "Output ZIP file does not exist: {:?}", path);
    assert!(path.is_file(), "Output ZIP path is not a file: {:?}", path);

    let file = fs::File::open(path).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    assert!(zip.len() > 0, "Output ZIP file is empty: {:?}", path);
}

/// Reads every entry whose name ends with `suffix`, in archive order.
#[allow(dead_code)]
pub fn read_entries_with_suffix(epub_path: &Path, suffix: &str) -> Vec<(String, String)> {
    let file = fs::File::open(epub_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        if name.ends_with(suffix) {
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            entries.push((name, content));
        }
    }
    entries
}

/// Contents of the section documents (`section_NNNN.xhtml`), sorted by file name.
#[allow(dead_code)]
pub fn read_section_documents(epub_path: &Path) -> Vec<String> {
    let mut sections: Vec<(String, String)> = read_entries_with_suffix(epub_path, ".xhtml")
        .into_iter()
        .filter(|(name, _)| name.contains("section_"))
        .collect();
    sections.sort_by(|a, b| a.0.cmp(&b.0));
    sections.into_iter().map(|(_, content)| content).collect()
}

/// Content of the package document (`*.opf`).
#[allow(dead_code)]
pub fn read_package_document(epub_path: &Path) -> String {
    read_entries_with_suffix(epub_path, ".opf")
        .into_iter()
        .map(|(_, content)| content)
        .next()
        .expect("EPUB has no .opf package document")
}
