//! Result types returned by the top-level entry points.
//!
//! A run has three terminal shapes that are *not* errors, mirroring how a
//! front end should present them:
//!
//! * [`RunOutcome::Completed`] — the PDF was written; a [`RunSummary`] says
//!   where and how long it took.
//! * [`RunOutcome::Invalid`] — a precondition failed (no marker file, no
//!   extensions selected, no matching images). Every applicable warning is
//!   reported at once so the user can fix them all in one pass.
//! * [`RunOutcome::Aborted`] — the user declined or skipped a required
//!   marker-name disambiguation. A deliberate no-op: nothing was written and
//!   nothing is wrong.
//!
//! Genuine failures (unreadable images, output write errors) are returned as
//! `Err(FigPdfError)` instead — see [`crate::error`].

use serde::Serialize;
use std::path::PathBuf;

/// Terminal state of one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The output document was written.
    Completed(RunSummary),
    /// Preconditions failed; the accumulated warnings explain why.
    /// Nothing was written.
    Invalid { warnings: Vec<String> },
    /// The run ended as a deliberate no-op.
    Aborted { reason: AbortReason },
}

impl RunOutcome {
    /// The output path, if a document was written.
    pub fn output_path(&self) -> Option<&PathBuf> {
        match self {
            RunOutcome::Completed(summary) => Some(&summary.output_path),
            _ => None,
        }
    }
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Path of the written PDF: `<directory>/<marker name>.pdf`.
    pub output_path: PathBuf,
    /// Number of pages in the document, equal to the number of discovered
    /// images, in discovery order.
    pub page_count: usize,
    /// Wall-clock time spent rendering pages.
    pub render_duration_ms: u64,
    /// Wall-clock time for the whole run, serialisation included.
    pub total_duration_ms: u64,
}

/// Why a run ended as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbortReason {
    /// Several marker files exist and no explicit name was supplied.
    MarkerUnresolved { candidates: Vec<String> },
}

/// What a run *would* do, produced by [`crate::inspect`] without writing
/// anything.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    /// Base names of every marker file found in the top-level directory.
    pub marker_candidates: Vec<String>,
    /// Per-extension image counts within the discovery scope, in the order
    /// the extensions were selected.
    pub matches: Vec<ExtensionMatches>,
    /// Total number of images the run would render.
    pub total_images: usize,
}

/// Image count for one selected extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionMatches {
    pub extension: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_only_on_completed() {
        let done = RunOutcome::Completed(RunSummary {
            output_path: PathBuf::from("/p/project.pdf"),
            page_count: 2,
            render_duration_ms: 10,
            total_duration_ms: 12,
        });
        assert_eq!(done.output_path(), Some(&PathBuf::from("/p/project.pdf")));

        let invalid = RunOutcome::Invalid {
            warnings: vec!["no marker file found".into()],
        };
        assert!(invalid.output_path().is_none());

        let aborted = RunOutcome::Aborted {
            reason: AbortReason::MarkerUnresolved {
                candidates: vec!["a".into(), "b".into()],
            },
        };
        assert!(aborted.output_path().is_none());
    }

    #[test]
    fn outcome_serialises_with_tag() {
        let invalid = RunOutcome::Invalid {
            warnings: vec!["no image file types selected".into()],
        };
        let json = serde_json::to_string(&invalid).unwrap();
        assert!(json.contains("\"outcome\":\"invalid\""), "got: {json}");
        assert!(json.contains("no image file types selected"));
    }
}
