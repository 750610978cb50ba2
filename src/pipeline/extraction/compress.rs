//! Image size reduction before the OCR provider call.
//!
//! The provider's free tier caps uploads at 1 MB; 900 KB is targeted to
//! leave headroom. Camera photos of paper reports arrive at up to 10 MB, so
//! oversized inputs are re-encoded as JPEG at descending qualities, with a
//! half-dimension resize as the last resort.

use std::borrow::Cow;
use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageOutputFormat};
use tracing::debug;

use super::ExtractionError;

/// Target ceiling for bytes sent to the OCR provider.
const MAX_OCR_BYTES: usize = 900 * 1024;

/// JPEG qualities tried in order before falling back to a resize.
const JPEG_QUALITIES: [u8; 6] = [85, 75, 65, 55, 45, 35];

/// Quality used for the half-dimension last resort.
const RESIZE_QUALITY: u8 = 50;

/// Shrink an image to fit under the OCR upload ceiling.
///
/// Inputs already under the ceiling pass through untouched (borrowed).
pub fn compress_for_ocr(img_bytes: &[u8]) -> Result<Cow<'_, [u8]>, ExtractionError> {
    if img_bytes.len() <= MAX_OCR_BYTES {
        return Ok(Cow::Borrowed(img_bytes));
    }

    let decoded = image::load_from_memory(img_bytes)
        .map_err(|e| ExtractionError::ImageDecoding(e.to_string()))?;
    // JPEG has no alpha channel
    let img = DynamicImage::ImageRgb8(decoded.to_rgb8());

    for quality in JPEG_QUALITIES {
        let compressed = encode_jpeg(&img, quality)?;
        debug!(quality, size_kb = compressed.len() / 1024, "compress attempt");
        if compressed.len() <= MAX_OCR_BYTES {
            return Ok(Cow::Owned(compressed));
        }
    }

    // Last resort: half dimensions
    let (w, h) = (img.width(), img.height());
    let resized = img.resize_exact(w / 2, h / 2, FilterType::Lanczos3);
    let compressed = encode_jpeg(&resized, RESIZE_QUALITY)?;
    debug!(width = w / 2, height = h / 2, "compress resized to half dimensions");
    Ok(Cow::Owned(compressed))
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ExtractionError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageOutputFormat::Jpeg(quality))
        .map_err(|e| ExtractionError::ImageEncoding(e.to_string()))?;
    Ok(buf.into_inner())
}
