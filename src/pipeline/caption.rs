//! Page rendering: one source image → one captioned canvas.
//!
//! Each page is the source image with a white caption bar appended beneath
//! it, carrying the image's file name centred in black. Layout:
//!
//! ```text
//! ┌──────────────────────┐ 0,0
//! │     source image     │
//! ├──────────────────────┤ ← 20 px inter-section padding
//! │  ····  a.jpg   ····  │ ← bar: text height + 2×10 px
//! └──────────────────────┘
//! ```
//!
//! Alpha sources are flattened onto opaque white before compositing; the
//! output canvas is always three-channel RGB, ready for a JPEG page stream.

use crate::error::FigPdfError;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{imageops, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Vertical padding above and below the caption text inside the bar.
pub const RECT_PADDING: u32 = 10;
/// Gap between the bottom of the source image and the caption bar.
pub const SECTION_PADDING: u32 = 20;
/// Caption font size as a fraction of the image's pixel width.
const FONT_SIZE_RATIO: f32 = 0.03;
/// Upper bound on the caption font size, in pixels.
const MAX_FONT_SIZE: f32 = 300.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Fallback font compiled into the binary, so a machine without any of the
/// known system fonts still renders captions.
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// System font files tried, in order, when no preferred font is configured.
const SYSTEM_FONT_CANDIDATES: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The font used for every caption of a run, loaded once.
#[derive(Clone)]
pub struct CaptionFont {
    font: FontArc,
}

impl CaptionFont {
    /// Two-tier lookup: the preferred file if given, then the known system
    /// locations, then the bundled default. An unusable preferred or system
    /// font is logged and skipped, never an error.
    pub fn load(preferred: Option<&Path>) -> Result<Self, FigPdfError> {
        if let Some(path) = preferred {
            match load_font_file(path) {
                Some(font) => {
                    debug!("Caption font: {}", path.display());
                    return Ok(Self { font });
                }
                None => warn!(
                    "Preferred font '{}' could not be loaded, falling back",
                    path.display()
                ),
            }
        }

        for candidate in SYSTEM_FONT_CANDIDATES {
            if let Some(font) = load_font_file(Path::new(candidate)) {
                debug!("Caption font: {candidate}");
                return Ok(Self { font });
            }
        }

        debug!("Caption font: bundled default");
        let font = FontArc::try_from_slice(BUNDLED_FONT)
            .map_err(|e| FigPdfError::Internal(format!("bundled caption font: {e}")))?;
        Ok(Self { font })
    }
}

fn load_font_file(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    FontArc::try_from_vec(bytes).ok()
}

/// Measured caption geometry for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionMetrics {
    pub text_width: u32,
    pub text_height: u32,
    /// Caption bar height: text height + 2×[`RECT_PADDING`].
    pub bar_height: u32,
}

/// Compute the caption geometry a page of `image_width` would use for
/// `caption`. Exposed so callers (and tests) can predict canvas sizes
/// without rendering.
pub fn caption_metrics(font: &CaptionFont, image_width: u32, caption: &str) -> CaptionMetrics {
    let scale = caption_scale(image_width);
    let (text_width, text_height) = measure_text(&font.font, scale, caption);
    CaptionMetrics {
        text_width,
        text_height,
        bar_height: text_height + 2 * RECT_PADDING,
    }
}

/// Font size for an image width: 3 % of the width, capped at 300 px.
fn caption_scale(image_width: u32) -> PxScale {
    PxScale::from((image_width as f32 * FONT_SIZE_RATIO).min(MAX_FONT_SIZE).max(1.0))
}

/// Pixel extent of `text` at `scale`: advance-summed width (kerning
/// included) and the font's ascent-to-descent height.
fn measure_text(font: &FontArc, scale: PxScale, text: &str) -> (u32, u32) {
    let scaled = font.as_scaled(scale);

    let mut width: f32 = 0.0;
    let mut prev = None;
    for c in text.chars() {
        let glyph = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, glyph);
        }
        width += scaled.h_advance(glyph);
        prev = Some(glyph);
    }

    (width.ceil() as u32, scaled.height().ceil() as u32)
}

/// Render one discovered image into a captioned page canvas.
///
/// The caption text is the file name, extension included, exactly as it
/// appears on disk. An unreadable or corrupt image is fatal for the run —
/// pages are never silently skipped.
pub fn render_page(path: &Path, font: &CaptionFont) -> Result<RgbImage, FigPdfError> {
    let source = image::open(path).map_err(|source| FigPdfError::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let caption = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Alpha is not preserved in the output; blend onto opaque white first.
    let base: RgbImage = if source.color().has_alpha() {
        flatten_onto_white(&source.to_rgba8())
    } else {
        source.to_rgb8()
    };

    let (width, height) = base.dimensions();
    let scale = caption_scale(width);
    let (text_width, text_height) = measure_text(&font.font, scale, &caption);
    let bar_height = text_height + 2 * RECT_PADDING;
    let canvas_height = height + bar_height + SECTION_PADDING;

    let mut canvas = RgbImage::from_pixel(width, canvas_height, WHITE);
    imageops::replace(&mut canvas, &base, 0, 0);

    // The canvas is already white; the rectangle pins the bar's exact bounds
    // independent of the canvas fill.
    let bar_top = (height + SECTION_PADDING) as i32;
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, bar_top).of_size(width, bar_height),
        WHITE,
    );

    let text_x = (width.saturating_sub(text_width) / 2) as i32;
    let text_y = bar_top + RECT_PADDING as i32;
    draw_text_mut(&mut canvas, BLACK, text_x, text_y, scale, &font.font, &caption);

    debug!(
        "Rendered '{}' → {}x{} px (bar {} px)",
        caption, width, canvas_height, bar_height
    );
    Ok(canvas)
}

/// Blend an RGBA image onto an opaque white background using its alpha
/// channel as the mask.
fn flatten_onto_white(image: &RgbaImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let a = src[3] as u16;
        for c in 0..3 {
            let blended = (src[c] as u16 * a + 255 * (255 - a) + 127) / 255;
            dst[c] = blended as u8;
        }
    }
    out
}
