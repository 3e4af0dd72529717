//! Diverging colormaps for signed advantage values.
//!
//! The red-blue scale is the 11-stop ColorBrewer `RdBu` ramp, read from blue (-1)
//! through near-white (0) to red (+1), and quantized to a 256-entry lookup table.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const LUT_SIZE: usize = 256;

const RED_BLUE_STOPS: [[u8; 3]; 11] = [
    [5, 48, 97],
    [33, 102, 172],
    [67, 147, 195],
    [146, 197, 222],
    [209, 229, 240],
    [247, 247, 247],
    [253, 219, 199],
    [244, 165, 130],
    [214, 96, 77],
    [178, 24, 43],
    [103, 0, 31],
];

/// Named diverging colormap.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Colormap {
    /// Negative values blue, positive values red.
    #[default]
    DivergingRedBlue,
    /// Negative values red, positive values blue.
    DivergingBlueRed,
}

impl Colormap {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "diverging-red-blue" => Ok(Colormap::DivergingRedBlue),
            "diverging-blue-red" => Ok(Colormap::DivergingBlueRed),
            other => Err(Error::InvalidConfig(format!("unknown colormap '{other}'"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Colormap::DivergingRedBlue => "diverging-red-blue",
            Colormap::DivergingBlueRed => "diverging-blue-red",
        }
    }

    /// Builds the lookup table for this colormap.
    pub fn lut(self) -> ColorLut {
        let mut table = [[0u8; 3]; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            let t = i as f32 / (LUT_SIZE - 1) as f32;
            let t = match self {
                Colormap::DivergingRedBlue => t,
                Colormap::DivergingBlueRed => 1.0 - t,
            };
            *entry = interpolate_stops(&RED_BLUE_STOPS, t);
        }
        ColorLut { table }
    }
}

/// Quantized colormap over the domain `[-1, 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorLut {
    table: [[u8; 3]; LUT_SIZE],
}

impl ColorLut {
    /// Colour for `value`. Values outside `[-1, 1]` are clamped; NaN maps to the midpoint.
    #[inline]
    pub fn color(&self, value: f32) -> [u8; 3] {
        self.table[lut_index(value)]
    }
}

/// Lookup index for `value` after clamping to `[-1, 1]`.
#[inline]
pub fn lut_index(value: f32) -> usize {
    let v = if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    };
    let t = (v + 1.0) / 2.0;
    ((t * LUT_SIZE as f32) as usize).min(LUT_SIZE - 1)
}

fn interpolate_stops(stops: &[[u8; 3]], t: f32) -> [u8; 3] {
    let segments = (stops.len() - 1) as f32;
    let pos = t.clamp(0.0, 1.0) * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let f = pos - i as f32;
    let (lo, hi) = (stops[i], stops[i + 1]);
    let mut out = [0u8; 3];
    for c in 0..3 {
        let v = lo[c] as f32 + (hi[c] as f32 - lo[c] as f32) * f;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
