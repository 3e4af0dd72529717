//! Kernel density estimation over the canvas.
//!
//! Points are binned into a 2D histogram covering `[0, W] x [0, H]` and then smoothed
//! with a separable Gaussian blur. The blur extends the grid by half-sample symmetric
//! reflection (`d c b a | a b c d | d c b a`), so density never wraps around edges.
use tracing::debug;

use super::grid::Grid;
use crate::projection::{Canvas, PixelPoint};

pub const DEFAULT_SIGMA: f32 = 16.0;
pub const DEFAULT_TRUNCATE: f32 = 4.0;

/// Smoothed kill density of one faction. All values are `>= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensitySurface {
    grid: Grid,
}

impl DensitySurface {
    /// An all-zero surface.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::zeros(width, height),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> (usize, usize) {
        self.grid.size()
    }

    /// Density at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.grid.get(row, col)
    }

    /// Peak density, `0.0` for empty or all-zero surfaces.
    pub fn peak(&self) -> f32 {
        self.grid.max().unwrap_or(0.0).max(0.0)
    }
}

/// Counts of points that were binned or dropped for lying off the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinningStats {
    pub binned: usize,
    pub dropped: usize,
}

/// Bins canvas points and smooths the histogram.
#[derive(Clone, Copy, Debug)]
pub struct DensityEstimator {
    /// Canvas whose extent the histogram covers.
    pub canvas: Canvas,
    /// Histogram cells per axis.
    pub bins: usize,
    /// Gaussian standard deviation in cells.
    pub sigma: f32,
    /// Kernel radius in standard deviations.
    pub truncate: f32,
}

impl DensityEstimator {
    pub fn new(canvas: Canvas, bins: usize, sigma: f32) -> Self {
        Self {
            canvas,
            bins,
            sigma,
            truncate: DEFAULT_TRUNCATE,
        }
    }

    pub fn with_truncate(mut self, truncate: f32) -> Self {
        self.truncate = truncate;
        self
    }

    /// Estimates the density surface of `points`.
    pub fn estimate(&self, points: &[PixelPoint]) -> DensitySurface {
        self.estimate_with_stats(points).0
    }

    /// Like [`Self::estimate`], also reporting how many points were dropped.
    pub fn estimate_with_stats(&self, points: &[PixelPoint]) -> (DensitySurface, BinningStats) {
        let (mut grid, stats) = histogram(points, self.canvas, self.bins);
        if stats.binned > 0 {
            gaussian_blur(&mut grid, self.sigma, self.truncate);
        }
        debug!(
            "Estimated density of {} points ({} dropped) on {}x{} bins.",
            stats.binned, stats.dropped, self.bins, self.bins
        );
        (DensitySurface { grid }, stats)
    }
}

impl Default for DensityEstimator {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self::new(canvas, canvas.width as usize, DEFAULT_SIGMA)
    }
}

/// Counts points per cell over `[0, W] x [0, H]`; points on the right or bottom edge
/// fall into the last cell, anything else off the canvas is dropped.
pub fn histogram(points: &[PixelPoint], canvas: Canvas, bins: usize) -> (Grid, BinningStats) {
    let mut grid = Grid::zeros(bins, bins);
    let mut stats = BinningStats::default();
    if bins == 0 || canvas.is_empty() {
        stats.dropped = points.len();
        return (grid, stats);
    }

    let extent = canvas.extent();
    let last = bins - 1;
    let cells = grid.as_mut_slice();
    for p in points {
        if !canvas.contains(*p) {
            stats.dropped += 1;
            continue;
        }
        let col = ((p.x / extent.x * bins as f32) as usize).min(last);
        let row = ((p.y / extent.y * bins as f32) as usize).min(last);
        cells[row * bins + col] += 1.0;
        stats.binned += 1;
    }
    (grid, stats)
}

/// Normalized 1D Gaussian kernel of radius `floor(truncate * sigma + 0.5)`.
pub fn gaussian_kernel(sigma: f32, truncate: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (truncate * sigma + 0.5) as i64;
    let inv = -0.5 / (sigma as f64 * sigma as f64);
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (inv * (x * x) as f64).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Blurs the grid in place, first along rows, then along columns.
pub fn gaussian_blur(grid: &mut Grid, sigma: f32, truncate: f32) {
    let kernel = gaussian_kernel(sigma, truncate);
    if kernel.len() == 1 {
        return;
    }
    let (w, h) = grid.size();
    let data = grid.as_mut_slice();

    let mut line_in = vec![0.0f32; w];
    let mut line_out = vec![0.0f32; w];
    for row in 0..h {
        let start = row * w;
        line_in.copy_from_slice(&data[start..start + w]);
        convolve_reflect(&line_in, &kernel, &mut line_out);
        data[start..start + w].copy_from_slice(&line_out);
    }

    let mut col_in = vec![0.0f32; h];
    let mut col_out = vec![0.0f32; h];
    for col in 0..w {
        for row in 0..h {
            col_in[row] = data[row * w + col];
        }
        convolve_reflect(&col_in, &kernel, &mut col_out);
        for row in 0..h {
            data[row * w + col] = col_out[row];
        }
    }
}

fn convolve_reflect(input: &[f32], kernel: &[f32], output: &mut [f32]) {
    let n = input.len();
    if n == 0 {
        return;
    }
    let radius = (kernel.len() / 2) as isize;
    for (i, out) in output.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, weight) in kernel.iter().enumerate() {
            let j = i as isize + k as isize - radius;
            acc += weight * input[reflect_index(j, n)];
        }
        // Rounding can leave tiny negatives next to empty regions.
        *out = acc.max(0.0);
    }
}

/// Half-sample symmetric reflection of `i` into `0..n`.
#[inline]
fn reflect_index(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period) as usize;
    if m < n {
        m
    } else {
        2 * n - 1 - m
    }
}
