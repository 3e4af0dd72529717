//! Colorizes an advantage surface and blends the minimap background over it.
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use super::colormap::{ColorLut, Colormap};
use crate::error::{Error, Result};
use crate::projection::Canvas;
use crate::surface::AdvantageSurface;

pub const DEFAULT_BACKGROUND_ALPHA: f32 = 0.20;

/// Renders advantage surfaces onto a canvas-sized RGBA raster.
#[derive(Clone, Debug)]
pub struct Renderer {
    canvas: Canvas,
    lut: ColorLut,
    background_alpha: f32,
}

impl Renderer {
    pub fn try_new(canvas: Canvas, colormap: Colormap, background_alpha: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&background_alpha) {
            return Err(Error::InvalidConfig(format!(
                "background_alpha must be within [0, 1], got {background_alpha}"
            )));
        }
        Ok(Self {
            canvas,
            lut: colormap.lut(),
            background_alpha,
        })
    }

    /// Maps every cell through the colormap into an opaque raster.
    pub fn colorize(&self, surface: &AdvantageSurface) -> Result<RgbaImage> {
        let (w, h) = surface.size();
        if (w, h) != (self.canvas.width as usize, self.canvas.height as usize) {
            return Err(Error::InvalidConfig(format!(
                "advantage surface is {w}x{h}, canvas is {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(RgbaImage::from_fn(self.canvas.width, self.canvas.height, |x, y| {
            let [r, g, b] = self.lut.color(surface.get(y as usize, x as usize));
            Rgba([r, g, b, 255])
        }))
    }

    /// Colorizes `surface` and blends `background` over it at the configured opacity.
    pub fn render(&self, surface: &AdvantageSurface, background: &RgbaImage) -> Result<RgbaImage> {
        let mut out = self.colorize(surface)?;
        let fitted = self.fit_background(background);
        let bg = fitted.as_ref().unwrap_or(background);

        for (dst, src) in out.pixels_mut().zip(bg.pixels()) {
            *dst = blend_over(*src, *dst, self.background_alpha);
        }
        debug!(
            "Rendered {}x{} heatmap with background alpha {}.",
            self.canvas.width, self.canvas.height, self.background_alpha
        );
        Ok(out)
    }

    fn fit_background(&self, background: &RgbaImage) -> Option<RgbaImage> {
        let (w, h) = background.dimensions();
        if (w, h) == (self.canvas.width, self.canvas.height) {
            return None;
        }
        warn!(
            "Background is {}x{}, resizing to canvas {}x{}.",
            w, h, self.canvas.width, self.canvas.height
        );
        Some(imageops::resize(
            background,
            self.canvas.width,
            self.canvas.height,
            FilterType::Triangle,
        ))
    }
}

/// Porter-Duff "over": `top`, with its alpha scaled by `opacity`, over `bottom`.
pub fn blend_over(top: Rgba<u8>, bottom: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let a_top = top[3] as f32 / 255.0 * opacity;
    let a_bottom = bottom[3] as f32 / 255.0;
    let a_out = a_top + a_bottom * (1.0 - a_top);
    if a_out <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut px = [0u8; 4];
    for c in 0..3 {
        let v = (top[c] as f32 * a_top + bottom[c] as f32 * a_bottom * (1.0 - a_top)) / a_out;
        px[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    px[3] = (a_out * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(px)
}
