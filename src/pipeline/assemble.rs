//! PDF assembly: serialise rendered pages as one multi-page document.
//!
//! Each canvas becomes a JPEG-compressed `DCTDecode` image XObject drawn
//! over the full page, with the page's MediaBox sized so that canvas pixels
//! map to physical points at the configured DPI. A pre-existing file at the
//! output path is removed only here, after every page has rendered, so a
//! failure earlier in the run never destroys a valid prior document.

use crate::error::FigPdfError;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Write `pages` to `output_path`, replacing any existing file.
///
/// Pages appear in input order. The caller guarantees the list is non-empty;
/// validation already stopped runs that discovered no images.
pub fn assemble(
    pages: &[RgbImage],
    output_path: &Path,
    dpi: u32,
    jpeg_quality: u8,
) -> Result<(), FigPdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let px_to_pt = 72.0_f32 / dpi as f32;

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (idx, page) in pages.iter().enumerate() {
        let (width, height) = page.dimensions();
        let jpeg = encode_jpeg(page, jpeg_quality).map_err(|source| {
            FigPdfError::PageEncodeFailed {
                page: idx + 1,
                source,
            }
        })?;
        debug!(
            "Page {}: {}x{} px → {} JPEG bytes",
            idx + 1,
            width,
            height,
            jpeg.len()
        );

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let width_pt = width as f32 * px_to_pt;
        let height_pt = height as f32 * px_to_pt;

        // Scale the image XObject over the whole page and draw it once.
        let content = format!("q {width_pt} 0 0 {height_pt} 0 0 cm /Im0 Do Q\n");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut xobjects = Dictionary::new();
        xobjects.set("Im0", image_id);
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => Object::Dictionary(resources),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // Replace-on-write: the old document survives every failure before this
    // point.
    if output_path.exists() {
        fs::remove_file(output_path).map_err(|e| FigPdfError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            detail: format!("could not replace existing file: {e}"),
        })?;
    }
    doc.save(output_path)
        .map_err(|e| FigPdfError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        })?;

    info!(
        "Wrote {} page(s) to {}",
        pages.len(),
        output_path.display()
    );
    Ok(())
}

fn encode_jpeg(page: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(page)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    fn solid(w: u32, h: u32, px: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(px))
    }

    #[test]
    fn page_count_matches_input() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc.pdf");
        let pages = vec![solid(40, 30, [255, 0, 0]), solid(60, 20, [0, 255, 0])];

        assemble(&pages, &out, 300, 95).unwrap();

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn pages_keep_input_order_and_geometry() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc.pdf");
        // Distinct widths so each page is identifiable by its MediaBox.
        let pages = vec![solid(300, 30, [1, 2, 3]), solid(150, 30, [1, 2, 3])];

        assemble(&pages, &out, 300, 95).unwrap();

        let doc = Document::load(&out).unwrap();
        let page_map = doc.get_pages();
        let widths: Vec<f32> = (1..=2)
            .map(|n| {
                let page_id = page_map[&n];
                let media_box = doc
                    .get_object(page_id)
                    .unwrap()
                    .as_dict()
                    .unwrap()
                    .get(b"MediaBox")
                    .unwrap()
                    .as_array()
                    .unwrap()
                    .clone();
                match media_box[2] {
                    Object::Real(v) => v,
                    Object::Integer(v) => v as f32,
                    ref other => panic!("unexpected MediaBox entry: {other:?}"),
                }
            })
            .collect();

        // 300 px at 300 DPI is 72 pt; 150 px is 36 pt.
        assert!((widths[0] - 72.0).abs() < 0.01, "got {widths:?}");
        assert!((widths[1] - 36.0).abs() < 0.01, "got {widths:?}");
    }

    #[test]
    fn existing_output_is_replaced() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc.pdf");
        fs::write(&out, b"stale bytes, not a pdf").unwrap();

        assemble(&[solid(10, 10, [9, 9, 9])], &out, 300, 95).unwrap();

        let doc = Document::load(&out).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn page_streams_are_jpeg() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc.pdf");
        assemble(&[solid(20, 20, [50, 60, 70])], &out, 300, 95).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert!(
            bytes.windows(9).any(|w| w == b"DCTDecode"),
            "image stream should be DCT-compressed"
        );
    }
}
