//! Final touches on the rendered raster and PNG encoding.
//!
//! The composite is inverted for a dark-background presentation; only RGB is
//! inverted, alpha is carried over unchanged.
use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;

/// Returns a copy with R, G and B replaced by `255 - value`.
pub fn invert_rgb(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    invert_rgb_in_place(&mut out);
    out
}

pub fn invert_rgb_in_place(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

/// Encodes the raster as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Inverts the raster and encodes it, returning both forms.
pub fn postprocess(image: &RgbaImage) -> Result<(RgbaImage, Vec<u8>)> {
    let inverted = invert_rgb(image);
    let png = encode_png(&inverted)?;
    Ok((inverted, png))
}
