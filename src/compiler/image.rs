//! Image re-encoding.
//!
//! JPEG is re-encoded at a fixed quality, PNG with maximum compression and
//! adaptive filtering. The original bytes win whenever re-encoding does not
//! make the file smaller or the format has no encoder here.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageFormat};

/// Result of optimizing one image.
#[derive(Debug, PartialEq, Eq)]
pub enum Optimized {
    /// Re-encoded bytes, smaller than the original.
    Reencoded(Vec<u8>),
    /// Re-encoding did not help or the format is passed through.
    Original,
}

/// Re-encode `bytes` (read from `path`) if that makes them smaller.
///
/// Decoding failures of JPEG/PNG files are errors: a broken image in the
/// source tree should not be shipped silently.
pub fn optimize(path: &Path, bytes: &[u8], jpeg_quality: u8) -> Result<Optimized> {
    let format = match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => format,
        _ => return Ok(Optimized::Original),
    };

    let img = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let encoded = match format {
        ImageFormat::Jpeg => encode_jpeg(&img, jpeg_quality)?,
        _ => encode_png(&img)?,
    };

    if encoded.len() < bytes.len() {
        Ok(Optimized::Reencoded(encoded))
    } else {
        Ok(Optimized::Original)
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .context("JPEG encoding failed")?;
    Ok(buf.into_inner())
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)
        .context("PNG encoding failed")?;
    Ok(buf.into_inner())
}
