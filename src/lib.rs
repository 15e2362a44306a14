//! # figpdf
//!
//! Assemble the images of a project directory into one captioned,
//! multi-page PDF.
//!
//! A project directory is any directory holding a `.fig` marker file; the
//! marker's base name names the output document. Every image in the
//! directory (optionally recursively) becomes one page: the source pixels,
//! untouched, with a white caption bar beneath them carrying the file name —
//! a contact sheet where every page stays at full resolution.
//!
//! ## Pipeline Overview
//!
//! ```text
//! directory
//!  │
//!  ├─ 1. Discover  collect image paths (walkdir, deterministic order)
//!  ├─ 2. Marker    resolve the output base name from the .fig file(s)
//!  ├─ 3. Validate  accumulate precondition warnings; stop before rendering
//!  ├─ 4. Caption   composite each image with its file-name bar
//!  └─ 5. Assemble  serialise the canvases as one PDF (JPEG page streams)
//! ```
//!
//! The pipeline is synchronous and single-threaded: one image is loaded and
//! rendered at a time, completed pages are held until the final
//! serialisation call, and a pre-existing output file is only replaced once
//! every page has rendered.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use figpdf::{generate, RunConfig, RunOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::builder("/photos/holiday").recurse(true).build()?;
//!     match generate(&config)? {
//!         RunOutcome::Completed(summary) => {
//!             println!("{} pages → {}", summary.page_count, summary.output_path.display());
//!         }
//!         RunOutcome::Invalid { warnings } => {
//!             for w in warnings {
//!                 eprintln!("warning: {w}");
//!             }
//!         }
//!         RunOutcome::Aborted { .. } => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `figpdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! figpdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod outcome;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RunConfig, RunConfigBuilder, DEFAULT_EXTENSIONS};
pub use error::FigPdfError;
pub use generate::{generate, inspect};
pub use outcome::{AbortReason, ExtensionMatches, InspectReport, RunOutcome, RunSummary};
pub use pipeline::marker::{marker_candidates, resolve_marker_name, MarkerResolution, MARKER_EXTENSION};
pub use progress::{NoopProgress, ProgressCallback, RenderProgress};
