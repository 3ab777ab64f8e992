//! Inspection of the Flutter project's native build artifacts.
//!
//! Pure filesystem reads; nothing here shells out. Both artifacts are
//! optional: a freshly created project has neither until `flutter create`
//! and a first build have run.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the Windows native build drops its artifacts.
pub fn build_output_dir(project_dir: &Path) -> PathBuf {
    project_dir.join("build").join("windows").join("x64")
}

/// The CMake entry point `flutter create .` generates for Windows.
pub fn native_cmake_file(project_dir: &Path) -> PathBuf {
    project_dir.join("windows").join("CMakeLists.txt")
}

/// How much of the native CMakeLists.txt the report shows.
pub const CMAKE_PREVIEW_CHARS: usize = 500;

/// List the build output directory's entries, single level, no recursion.
///
/// Returns `None` if the directory does not exist. Entry names come back
/// in directory order, untouched.
pub fn list_build_output(project_dir: &Path) -> Result<Option<Vec<String>>> {
    let dir = build_output_dir(project_dir);
    if !dir.exists() {
        return Ok(None);
    }

    let mut names = Vec::new();
    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("failed to read build directory at {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read an entry in {}", dir.display()))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(Some(names))
}

/// Read the first [`CMAKE_PREVIEW_CHARS`] characters of the native
/// CMakeLists.txt.
///
/// Returns `None` without touching the file when it does not exist. The
/// cut is measured in characters, not bytes, so a multi-byte sequence at
/// the boundary is never split. No truncation indicator is appended.
pub fn native_cmake_preview(project_dir: &Path) -> Result<Option<String>> {
    let path = native_cmake_file(project_dir);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(contents.chars().take(CMAKE_PREVIEW_CHARS).collect()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_build_dir(project: &Path) -> PathBuf {
        let dir = build_output_dir(project);
        std::fs::create_dir_all(&dir).expect("failed to create build dir");
        dir
    }

    #[test]
    fn missing_build_dir_is_none() {
        let project = TempDir::new().expect("failed to create temp dir");
        assert!(list_build_output(project.path()).unwrap().is_none());
    }

    #[test]
    fn build_dir_listing_contains_exactly_the_entries() {
        let project = TempDir::new().expect("failed to create temp dir");
        let dir = make_build_dir(project.path());
        std::fs::create_dir(dir.join("a")).unwrap();
        std::fs::write(dir.join("b.txt"), "x").unwrap();

        let mut names = list_build_output(project.path()).unwrap().unwrap();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn empty_build_dir_lists_nothing() {
        let project = TempDir::new().expect("failed to create temp dir");
        make_build_dir(project.path());

        let names = list_build_output(project.path()).unwrap().unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn missing_cmake_file_is_none() {
        let project = TempDir::new().expect("failed to create temp dir");
        assert!(native_cmake_preview(project.path()).unwrap().is_none());
    }

    #[test]
    fn short_cmake_file_is_returned_whole() {
        let project = TempDir::new().expect("failed to create temp dir");
        let path = native_cmake_file(project.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "cmake_minimum_required(VERSION 3.14)\n").unwrap();

        let preview = native_cmake_preview(project.path()).unwrap().unwrap();
        assert_eq!(preview, "cmake_minimum_required(VERSION 3.14)\n");
    }

    #[test]
    fn long_cmake_file_is_cut_at_500_chars_without_indicator() {
        let project = TempDir::new().expect("failed to create temp dir");
        let path = native_cmake_file(project.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        let contents = "x".repeat(CMAKE_PREVIEW_CHARS + 200);
        std::fs::write(&path, &contents).unwrap();

        let preview = native_cmake_preview(project.path()).unwrap().unwrap();
        assert_eq!(preview.len(), CMAKE_PREVIEW_CHARS);
        assert_eq!(preview, &contents[..CMAKE_PREVIEW_CHARS]);
    }

    #[test]
    fn preview_cut_counts_characters_not_bytes() {
        let project = TempDir::new().expect("failed to create temp dir");
        let path = native_cmake_file(project.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        // Each 'é' is two bytes; a byte-based cut at 500 would split one.
        let contents = "é".repeat(CMAKE_PREVIEW_CHARS + 10);
        std::fs::write(&path, &contents).unwrap();

        let preview = native_cmake_preview(project.path()).unwrap().unwrap();
        assert_eq!(preview.chars().count(), CMAKE_PREVIEW_CHARS);
    }
}
