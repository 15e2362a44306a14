//! Precondition checks between discovery and rendering.
//!
//! Warnings are accumulated rather than short-circuited so a user sees every
//! applicable reason in one message: a run with no marker file *and* an empty
//! extension set reports both.

use std::path::PathBuf;

/// Inspect discovery results against the caller's selections.
///
/// Returns zero or more human-readable warnings; any warning means the run
/// must stop before rendering. Expected negative outcomes never become
/// errors here — the caller decides how to present them.
pub fn validate(
    marker_name: Option<&str>,
    images: &[PathBuf],
    extensions: &[String],
) -> Vec<String> {
    let mut warnings = Vec::new();

    if marker_name.is_none() {
        warnings.push("no marker file found".to_string());
    }

    if extensions.is_empty() {
        warnings.push("no image file types selected".to_string());
    } else if images.is_empty() {
        // Name each selected extension, so the user can tell a bad selection
        // from an empty directory at a glance.
        for ext in extensions {
            warnings.push(format!("no images found for .{ext}"));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn imgs(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn clean_run_has_no_warnings() {
        let w = validate(Some("project"), &imgs(&["a.jpg"]), &exts(&["jpg"]));
        assert!(w.is_empty(), "got: {w:?}");
    }

    #[test]
    fn missing_marker_is_reported() {
        let w = validate(None, &imgs(&["a.jpg"]), &exts(&["jpg"]));
        assert_eq!(w, vec!["no marker file found"]);
    }

    #[test]
    fn empty_extension_set_is_reported() {
        let w = validate(Some("project"), &[], &[]);
        assert_eq!(w, vec!["no image file types selected"]);
    }

    #[test]
    fn each_unmatched_extension_is_named() {
        let w = validate(Some("project"), &[], &exts(&["jpg", "png"]));
        assert_eq!(w, vec!["no images found for .jpg", "no images found for .png"]);
    }

    #[test]
    fn warnings_accumulate() {
        let w = validate(None, &[], &[]);
        assert_eq!(
            w,
            vec!["no marker file found", "no image file types selected"]
        );
    }

    #[test]
    fn no_warning_when_any_image_matched() {
        // One match is enough to render; the per-extension report only
        // applies when the whole discovery came back empty.
        let w = validate(Some("project"), &imgs(&["a.jpg"]), &exts(&["jpg", "png"]));
        assert!(w.is_empty(), "got: {w:?}");
    }
}
