//! Density and advantage surfaces over the canvas grid.
pub mod contrast;
pub mod density;
pub mod grid;

pub use contrast::{compose, compose_with_summary, AdvantageSurface, ContrastSummary};
pub use density::{BinningStats, DensityEstimator, DensitySurface, DEFAULT_SIGMA, DEFAULT_TRUNCATE};
pub use grid::Grid;
