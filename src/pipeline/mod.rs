//! Pipeline stages for directory-to-PDF generation.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap an
//! implementation (e.g. the PDF writer) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! discover ──▶ marker ──▶ validate ──▶ caption ──▶ assemble
//! (walkdir)    (.fig)     (warnings)   (per image)  (lopdf)
//! ```
//!
//! 1. [`discover`] — collect image paths in deterministic order
//! 2. [`marker`]   — resolve the output document's base name from the
//!    directory's `.fig` marker file(s)
//! 3. [`validate`] — accumulate precondition warnings; any warning stops the
//!    run before rendering
//! 4. [`caption`]  — composite each image with its file-name caption bar
//! 5. [`assemble`] — serialise the canvases as JPEG page streams of one PDF
//!
//! Control flows strictly forward; no stage depends on output produced later.

pub mod assemble;
pub mod caption;
pub mod discover;
pub mod marker;
pub mod validate;
