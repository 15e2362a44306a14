//! Marker resolution: derive the output document's base name.
//!
//! A marker file is any file directly in the top-level directory whose
//! extension is `.fig`; its base name names the output PDF. Resolution never
//! walks into subdirectories — a nested marker belongs to a nested project.

use crate::error::FigPdfError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extension identifying a project's marker file.
pub const MARKER_EXTENSION: &str = "fig";

/// Resolution state handed to validation and to interactive front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerResolution {
    /// Exactly one candidate existed, or an explicit name matched one.
    Resolved(String),
    /// No marker file exists; validation turns this into a warning.
    NoMarker,
    /// Several candidates exist and no explicit name was supplied. The run
    /// should end as a no-op unless a front end obtains a name and retries.
    Ambiguous { candidates: Vec<String> },
}

/// Base names of every marker file directly inside `directory`, sorted.
///
/// Unreadable directories yield an empty list; the existence of the
/// directory itself is validated upstream.
pub fn marker_candidates(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(directory)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            let lower = name.to_ascii_lowercase();
            lower
                .ends_with(&format!(".{MARKER_EXTENSION}"))
                .then(|| name[..name.len() - MARKER_EXTENSION.len() - 1].to_string())
        })
        .collect();
    names.sort();
    names
}

/// Resolve the marker name for a run.
///
/// * Zero candidates ⇒ [`MarkerResolution::NoMarker`].
/// * One candidate ⇒ its base name, automatically.
/// * Several candidates and `explicit_name` given ⇒ the name must match one
///   of them; a mismatch is an error so the caller can re-prompt with the
///   available choices rather than silently proceed.
/// * Several candidates and no explicit name ⇒ [`MarkerResolution::Ambiguous`].
///
/// An explicit name is also honoured (and checked) when only one candidate
/// exists, so a front end can pass the user's choice through unconditionally.
pub fn resolve_marker_name(
    directory: &Path,
    explicit_name: Option<&str>,
) -> Result<MarkerResolution, FigPdfError> {
    let candidates = marker_candidates(directory);
    debug!(
        "Found {} marker file(s) in {}",
        candidates.len(),
        directory.display()
    );

    match (candidates.len(), explicit_name) {
        (0, _) => Ok(MarkerResolution::NoMarker),
        (1, None) => Ok(MarkerResolution::Resolved(candidates[0].clone())),
        (_, Some(name)) => {
            if candidates.iter().any(|c| c == name) {
                Ok(MarkerResolution::Resolved(name.to_string()))
            } else {
                Err(FigPdfError::UnknownMarkerName {
                    name: name.to_string(),
                    available: candidates,
                })
            }
        }
        (_, None) => Ok(MarkerResolution::Ambiguous { candidates }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"x").unwrap();
    }

    #[test]
    fn zero_markers_is_no_marker() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.jpg");
        assert_eq!(
            resolve_marker_name(dir.path(), None).unwrap(),
            MarkerResolution::NoMarker
        );
    }

    #[test]
    fn single_marker_resolves_automatically() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "project.fig");
        assert_eq!(
            resolve_marker_name(dir.path(), None).unwrap(),
            MarkerResolution::Resolved("project".into())
        );
    }

    #[test]
    fn marker_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "Project.FIG");
        assert_eq!(
            resolve_marker_name(dir.path(), None).unwrap(),
            MarkerResolution::Resolved("Project".into())
        );
    }

    #[test]
    fn nested_markers_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir, "sub/inner.fig");
        assert_eq!(
            resolve_marker_name(dir.path(), None).unwrap(),
            MarkerResolution::NoMarker
        );
    }

    #[test]
    fn multiple_markers_without_name_is_ambiguous() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "alpha.fig");
        touch(&dir, "beta.fig");
        assert_eq!(
            resolve_marker_name(dir.path(), None).unwrap(),
            MarkerResolution::Ambiguous {
                candidates: vec!["alpha".into(), "beta".into()],
            }
        );
    }

    #[test]
    fn explicit_name_selects_among_candidates() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "alpha.fig");
        touch(&dir, "beta.fig");
        assert_eq!(
            resolve_marker_name(dir.path(), Some("beta")).unwrap(),
            MarkerResolution::Resolved("beta".into())
        );
    }

    #[test]
    fn invalid_explicit_name_is_a_descriptive_error() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "alpha.fig");
        touch(&dir, "beta.fig");
        let err = resolve_marker_name(dir.path(), Some("gamma")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gamma"), "got: {msg}");
        assert!(msg.contains("alpha"), "got: {msg}");
    }
}
