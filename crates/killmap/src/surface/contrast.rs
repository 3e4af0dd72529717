//! Signed advantage between two faction densities.
//!
//! Steps:
//! 1. Each density is divided by its own peak (an all-zero density stays all-zero).
//! 2. `diff = a - b`.
//! 3. `diff` is stretched linearly so that its minimum maps to -1 and its maximum to 1.
//!    A flat `diff` has no meaningful stretch and becomes all-zero.
//! 4. The value of the origin cell `(0, 0)` is subtracted everywhere, so the
//!    uncontested background reads as 0.
//!
//! Values are not clamped after step 4 and may fall slightly outside `[-1, 1]`.
use tracing::{debug, warn};

use super::density::DensitySurface;
use super::grid::Grid;
use crate::error::{Error, Result};

/// Signed advantage per cell. Positive values favour the first faction.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvantageSurface {
    grid: Grid,
}

impl AdvantageSurface {
    /// Wraps precomputed advantage values.
    pub fn from_grid(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> (usize, usize) {
        self.grid.size()
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.grid.get(row, col)
    }
}

/// Diagnostics from a single composition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContrastSummary {
    /// Smallest raw difference before stretching.
    pub raw_min: f32,
    /// Largest raw difference before stretching.
    pub raw_max: f32,
    /// Stretched value of the origin cell that was subtracted.
    pub baseline: f32,
    /// Set when the difference was flat and the output is all-zero.
    pub degenerate: bool,
}

/// Combines two densities into an [`AdvantageSurface`].
///
/// Returns [`Error::InvalidConfig`] if the surfaces differ in size.
pub fn compose(a: &DensitySurface, b: &DensitySurface) -> Result<AdvantageSurface> {
    compose_with_summary(a, b).map(|(surface, _)| surface)
}

/// Like [`compose`], also returning the [`ContrastSummary`].
pub fn compose_with_summary(
    a: &DensitySurface,
    b: &DensitySurface,
) -> Result<(AdvantageSurface, ContrastSummary)> {
    let (w, h) = a.size();
    let diff = normalize_by_peak(a)
        .zip_map(&normalize_by_peak(b), |x, y| x - y)
        .ok_or_else(|| {
            Error::InvalidConfig(format!(
                "density surfaces differ in size: {:?} vs {:?}",
                a.size(),
                b.size()
            ))
        })?;

    let Some((raw_min, raw_max)) = diff.min_max() else {
        return Ok((
            AdvantageSurface::from_grid(diff),
            ContrastSummary {
                degenerate: true,
                ..Default::default()
            },
        ));
    };

    let spread = raw_max - raw_min;
    if !spread.is_finite() || spread <= 0.0 {
        warn!(
            "Kill densities do not differ anywhere (diff = {}); rendering neutral surface.",
            raw_min
        );
        let summary = ContrastSummary {
            raw_min,
            raw_max,
            baseline: 0.0,
            degenerate: true,
        };
        return Ok((AdvantageSurface::from_grid(Grid::zeros(w, h)), summary));
    }

    let stretched = diff.map(|v| -1.0 + 2.0 * (v - raw_min) / spread);
    let baseline = stretched.get(0, 0);
    let grid = stretched.map(|v| v - baseline);

    debug!(
        "Composed advantage: raw range [{}, {}], baseline {}.",
        raw_min, raw_max, baseline
    );

    Ok((
        AdvantageSurface::from_grid(grid),
        ContrastSummary {
            raw_min,
            raw_max,
            baseline,
            degenerate: false,
        },
    ))
}

fn normalize_by_peak(surface: &DensitySurface) -> Grid {
    let peak = surface.peak();
    if peak > 0.0 && peak.is_finite() {
        surface.grid().map(|v| v / peak)
    } else {
        let (w, h) = surface.size();
        Grid::zeros(w, h)
    }
}
