//! File discovery: collect the image files of a run's scope.
//!
//! ## Ordering
//!
//! Raw `walkdir` order depends on the platform and filesystem, which would
//! make the page order of the output document unstable across machines.
//! Entries are therefore sorted by file name at every directory level, so
//! the same directory always produces the same document.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Collect the image files under `directory` matching `extensions`.
///
/// When `recurse` is false only files directly inside `directory` are
/// considered; nested directories are not inspected at all. Matching is a
/// case-insensitive suffix test on the file name, so `IMG.JPG` matches the
/// selection `jpg`. An empty extension set yields an empty result.
///
/// The caller is responsible for rejecting a missing directory before
/// invoking discovery; an unreadable tree simply contributes no entries.
pub fn discover(directory: &Path, recurse: bool, extensions: &[String]) -> Vec<PathBuf> {
    if extensions.is_empty() {
        return Vec::new();
    }

    let walker = if recurse {
        WalkDir::new(directory)
    } else {
        WalkDir::new(directory).max_depth(1)
    };

    let images: Vec<PathBuf> = walker
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| matches_extension(name, extensions))
        })
        .map(|entry| entry.into_path())
        .collect();

    debug!(
        "Discovered {} images under {} (recurse={})",
        images.len(),
        directory.display(),
        recurse
    );
    images
}

/// Case-insensitive suffix test against the enabled extensions.
pub(crate) fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_ascii_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("b.jpg"));
        touch(&dir.path().join("a.png"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested/deep.jpg"));
        dir
    }

    #[test]
    fn top_level_only_without_recursion() {
        let dir = fixture();
        let found = discover(dir.path(), false, &exts(&["jpg", "png"]));
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn recursion_is_a_superset() {
        let dir = fixture();
        let flat = discover(dir.path(), false, &exts(&["jpg", "png"]));
        let deep = discover(dir.path(), true, &exts(&["jpg", "png"]));
        assert!(deep.len() > flat.len());
        for p in &flat {
            assert!(deep.contains(p));
        }
        assert!(deep.iter().any(|p| p.ends_with("nested/deep.jpg")));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("IMG.JPG"));
        touch(&dir.path().join("Shot.Png"));
        let found = discover(dir.path(), false, &exts(&["jpg", "png"]));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn empty_extension_set_yields_nothing() {
        let dir = fixture();
        assert!(discover(dir.path(), false, &[]).is_empty());
        assert!(discover(dir.path(), true, &[]).is_empty());
    }

    #[test]
    fn unselected_extensions_are_excluded() {
        let dir = fixture();
        let found = discover(dir.path(), false, &exts(&["png"]));
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a.png"));
    }

    #[test]
    fn order_is_deterministic() {
        let dir = TempDir::new().unwrap();
        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            touch(&dir.path().join(name));
        }
        let names: Vec<_> = discover(dir.path(), false, &exts(&["jpg"]))
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }
}
