//! Path utilities for deriving titles and output locations from input files.
//!
//! The book title comes from the input file name with its final extension removed,
//! and the output document is written next to the input by default. On Windows, long
//! output paths get the `\\?\` prefix before the file is created.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Maximum path length for Windows without long path support
const WINDOWS_MAX_PATH: usize = 260;

/// Windows long path prefix
const WINDOWS_LONG_PATH_PREFIX: &str = r"\\?\";

/// Converts a path to a string with fallback to lossy conversion.
pub fn path_to_string_lossy(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Gets the file name from a path with fallback to lossy conversion.
///
/// Returns an empty string when the path has no file name component (e.g. `..`).
pub fn get_file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Returns the file name of `path` with only its final extension removed.
///
/// Everything from the last `.` of the file name onwards is dropped, so
/// `"book.v2.txt"` becomes `"book.v2"` and a name without a dot is returned as-is.
///
/// # Examples
///
/// ```
/// use mustepub::path_utils::file_name_without_extension;
/// use std::path::Path;
///
/// assert_eq!(file_name_without_extension(Path::new("drafts/book.v2.txt")), "book.v2");
/// assert_eq!(file_name_without_extension(Path::new("README")), "README");
/// ```
pub fn file_name_without_extension(path: &Path) -> String {
    let file_name = get_file_name_lossy(path);
    match file_name.rfind('.') {
        Some(dot) => file_name[..dot].to_string(),
        None => file_name,
    }
}

/// Builds `<dir>/<base>.<extension>`.
///
/// The extension is appended rather than substituted, so dots inside `base` survive.
pub fn output_file_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", base, extension))
}

/// Directory containing `path`, or the current directory for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Prepares a path for Windows long path support if needed.
///
/// On other platforms, or for short paths, the path is returned unchanged.
pub fn prepare_long_path(path: &Path) -> Result<PathBuf> {
    let path_str = path_to_string_lossy(path);

    if cfg!(windows)
        && path_str.len() > WINDOWS_MAX_PATH
        && !path_str.starts_with(WINDOWS_LONG_PATH_PREFIX)
    {
        // The file may not exist yet, so canonicalize its directory instead
        let parent = parent_dir(path);
        let absolute_parent = parent.canonicalize().map_err(|e| {
            Error::InvalidPath(
                path.to_path_buf(),
                format!("Cannot canonicalize path: {}", e),
            )
        })?;
        let absolute_path = absolute_parent.join(get_file_name_lossy(path));
        let long_path = format!(
            "{}{}",
            WINDOWS_LONG_PATH_PREFIX,
            path_to_string_lossy(&absolute_path)
        );
        Ok(PathBuf::from(long_path))
    } else {
        Ok(path.to_path_buf())
    }
}
