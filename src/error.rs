//! Error types for the figpdf library.
//!
//! Only genuinely exceptional conditions become a [`FigPdfError`]: a source
//! image that cannot be decoded, an output path that cannot be written, an
//! invalid configuration. Expected negative outcomes — no marker file, an
//! ambiguous marker left unresolved, zero matching images — are *not* errors;
//! they surface as [`crate::outcome::RunOutcome`] variants so callers can
//! present them as warnings or quietly end the run.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the figpdf library.
#[derive(Debug, Error)]
pub enum FigPdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Source directory was not found at the given path.
    #[error("Directory not found: '{path}'\nCheck the path exists and is readable.")]
    DirectoryNotFound { path: PathBuf },

    /// The source path exists but is not a directory.
    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// An explicit marker name did not match any marker file in the directory.
    #[error(
        "Marker name '{name}' does not match any marker file.\nAvailable names: {}",
        available.join(", ")
    )]
    UnknownMarkerName {
        name: String,
        available: Vec<String>,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// A discovered image could not be opened or decoded. The run stops with
    /// no output rather than silently skipping the page.
    #[error("Cannot read image '{path}': {source}")]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// JPEG encoding of a rendered page failed.
    #[error("Failed to encode page {page}: {source}")]
    PageEncodeFailed {
        page: usize,
        #[source]
        source: image::ImageError,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write or replace the output PDF.
    #[error("Failed to write output file '{path}': {detail}")]
    OutputWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_marker_name_lists_candidates() {
        let e = FigPdfError::UnknownMarkerName {
            name: "poster".into(),
            available: vec!["project".into(), "draft".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("'poster'"), "got: {msg}");
        assert!(msg.contains("project, draft"), "got: {msg}");
    }

    #[test]
    fn directory_not_found_display() {
        let e = FigPdfError::DirectoryNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(e.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn output_write_failed_display() {
        let e = FigPdfError::OutputWriteFailed {
            path: PathBuf::from("/tmp/out.pdf"),
            detail: "disk full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("out.pdf"));
        assert!(msg.contains("disk full"));
    }
}
