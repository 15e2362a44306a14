//! Progress-callback trait for per-page render events.
//!
//! Inject an [`Arc<dyn RenderProgress>`] via
//! [`crate::config::RunConfigBuilder::progress`] to receive an event after
//! each page of the document is rendered.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a GUI widget, or a log line
//! without the library knowing anything about how the host application
//! communicates. The pipeline is strictly sequential, so implementations are
//! invoked from the calling thread, one event at a time; they must be cheap
//! because each call happens between two page renders.
//!
//! Note the timing contract: `on_page_rendered` fires after a page is
//! *rendered*, not after it is written. The final `on_page_rendered(total,
//! total)` therefore arrives before the output file is touched, and
//! `on_run_complete` only after the PDF has been saved.

use std::path::Path;
use std::sync::Arc;

/// Called by the generation pipeline as it renders each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `Send + Sync` is required so the same callback type
/// can be shared with host applications that live on other threads, even
/// though the pipeline itself never calls it concurrently.
pub trait RenderProgress: Send + Sync {
    /// Called once before any page is rendered.
    fn on_run_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page has been rendered (1-indexed).
    fn on_page_rendered(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once after the output document has been written.
    fn on_run_complete(&self, total_pages: usize, output_path: &Path) {
        let _ = (total_pages, output_path);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgress;

impl RenderProgress for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::RunConfig`].
pub type ProgressCallback = Arc<dyn RenderProgress>;
