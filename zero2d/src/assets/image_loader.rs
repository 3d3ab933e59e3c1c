use crate::error::{Result, Zero2dError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw decoded pixels, always 8-bit RGBA regardless of what the file held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decodes a PNG file into RGBA8 pixels.
///
/// Palette and 16-bit images are expanded by the decoder; the remaining
/// color types are widened to four channels here so the texture upload
/// always sees `width * height * 4` bytes.
pub fn decode_png(path: &Path) -> Result<DecodedImage> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| Zero2dError::ImageLoading(format!("Failed to read PNG header: {}", e)))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| Zero2dError::ImageLoading(format!("Failed to decode PNG: {}", e)))?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => {
            return Err(Zero2dError::ImageLoading(format!(
                "Unsupported PNG color type after expansion: {:?}",
                other
            )));
        }
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        rgba,
    })
}
