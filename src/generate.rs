//! Top-level entry points wiring the pipeline stages together.
//!
//! [`generate`] runs the whole pipeline eagerly on the calling thread:
//! discover → resolve marker → validate → render each page → assemble.
//! Images are loaded and rendered one at a time; completed canvases are kept
//! in memory until the single serialisation call, so memory scales linearly
//! with page count. [`inspect`] reports what a run would do without writing
//! anything.

use crate::config::RunConfig;
use crate::error::FigPdfError;
use crate::outcome::{
    AbortReason, ExtensionMatches, InspectReport, RunOutcome, RunSummary,
};
use crate::pipeline::caption::{render_page, CaptionFont};
use crate::pipeline::discover::{discover, matches_extension};
use crate::pipeline::marker::{marker_candidates, resolve_marker_name, MarkerResolution};
use crate::pipeline::{assemble, validate};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Run one generation pass over the configured directory.
///
/// # Returns
/// `Ok(RunOutcome)` for every expected ending — document written,
/// preconditions unmet, or a deliberate no-op abort. See
/// [`crate::outcome::RunOutcome`].
///
/// # Errors
/// Returns `Err(FigPdfError)` only for fatal conditions:
/// - the directory does not exist or is not a directory
/// - an explicit marker name matches no marker file
/// - a discovered image cannot be read or decoded
/// - the output path cannot be written
pub fn generate(config: &RunConfig) -> Result<RunOutcome, FigPdfError> {
    let total_start = Instant::now();
    ensure_directory(&config.directory)?;
    info!("Scanning {}", config.directory.display());

    // ── Step 1: Discover images and resolve the marker name ──────────────
    let images = discover(&config.directory, config.recurse, &config.extensions);
    let marker_name = match resolve_marker_name(
        &config.directory,
        config.marker_name.as_deref(),
    )? {
        MarkerResolution::Resolved(name) => Some(name),
        MarkerResolution::NoMarker => None,
        MarkerResolution::Ambiguous { candidates } => {
            debug!("Marker ambiguous, no explicit name: {candidates:?}");
            return Ok(RunOutcome::Aborted {
                reason: AbortReason::MarkerUnresolved { candidates },
            });
        }
    };

    // ── Step 2: Check preconditions ──────────────────────────────────────
    let warnings = validate::validate(marker_name.as_deref(), &images, &config.extensions);
    if !warnings.is_empty() {
        info!("Run stopped by {} warning(s)", warnings.len());
        return Ok(RunOutcome::Invalid { warnings });
    }
    let marker_name = marker_name
        .ok_or_else(|| FigPdfError::Internal("marker name missing after validation".into()))?;

    // ── Step 3: Render every page ────────────────────────────────────────
    let font = CaptionFont::load(config.font_path.as_deref())?;
    let total = images.len();
    if let Some(ref cb) = config.progress {
        cb.on_run_start(total);
    }

    let render_start = Instant::now();
    let mut pages = Vec::with_capacity(total);
    for (idx, path) in images.iter().enumerate() {
        pages.push(render_page(path, &font)?);
        if let Some(ref cb) = config.progress {
            cb.on_page_rendered(idx + 1, total);
        }
    }
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 4: Serialise ────────────────────────────────────────────────
    // All pages rendered; only now may the previous document be replaced.
    let output_path = config.directory.join(format!("{marker_name}.pdf"));
    assemble::assemble(&pages, &output_path, config.dpi, config.jpeg_quality)?;

    if let Some(ref cb) = config.progress {
        cb.on_run_complete(total, &output_path);
    }

    let summary = RunSummary {
        output_path,
        page_count: total,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Generated {} ({} pages, {}ms)",
        summary.output_path.display(),
        summary.page_count,
        summary.total_duration_ms
    );
    Ok(RunOutcome::Completed(summary))
}

/// Report what a run with `config` would do, without writing anything.
pub fn inspect(config: &RunConfig) -> Result<InspectReport, FigPdfError> {
    ensure_directory(&config.directory)?;

    let images = discover(&config.directory, config.recurse, &config.extensions);
    let matches = config
        .extensions
        .iter()
        .map(|ext| {
            let ext_slice = std::slice::from_ref(ext);
            let count = images
                .iter()
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| matches_extension(n, ext_slice))
                })
                .count();
            ExtensionMatches {
                extension: ext.clone(),
                count,
            }
        })
        .collect();

    Ok(InspectReport {
        marker_candidates: marker_candidates(&config.directory),
        matches,
        total_images: images.len(),
    })
}

fn ensure_directory(path: &Path) -> Result<(), FigPdfError> {
    if !path.exists() {
        return Err(FigPdfError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(FigPdfError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
