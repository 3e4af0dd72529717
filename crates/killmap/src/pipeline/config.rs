//! Configuration for heatmap generation.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::Canvas;
use crate::render::{Colormap, DEFAULT_BACKGROUND_ALPHA};
use crate::surface::{DensityEstimator, DEFAULT_SIGMA, DEFAULT_TRUNCATE};

/// Parameters shared by every stage of the pipeline.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Output raster size; also the projection target.
    pub canvas: Canvas,
    /// Histogram cells per axis. Must equal both canvas dimensions.
    pub bins: usize,
    /// Gaussian standard deviation in cells.
    pub sigma: f32,
    /// Gaussian kernel radius in standard deviations.
    pub truncate: f32,
    /// Diverging colormap used for the advantage surface.
    pub colormap: Colormap,
    /// Opacity of the minimap background drawn over the colorized surface.
    pub background_alpha: f32,
    /// Fail with [`Error::DegenerateData`] instead of rendering a neutral map when
    /// neither faction has any kills.
    pub reject_empty: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            canvas,
            bins: canvas.width as usize,
            sigma: DEFAULT_SIGMA,
            truncate: DEFAULT_TRUNCATE,
            colormap: Colormap::default(),
            background_alpha: DEFAULT_BACKGROUND_ALPHA,
            reject_empty: false,
        }
    }
}

impl HeatmapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a square canvas and matches the bin count to it.
    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas = Canvas::square(size);
        self.bins = size as usize;
        self
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_truncate(mut self, truncate: f32) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn with_background_alpha(mut self, background_alpha: f32) -> Self {
        self.background_alpha = background_alpha;
        self
    }

    pub fn with_reject_empty(mut self, reject_empty: bool) -> Self {
        self.reject_empty = reject_empty;
        self
    }

    /// Density estimator matching this configuration.
    pub fn density_estimator(&self) -> DensityEstimator {
        DensityEstimator::new(self.canvas, self.bins, self.sigma).with_truncate(self.truncate)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.canvas.is_empty() {
            return Err(Error::InvalidConfig(
                "canvas must be > 0 in both dimensions".into(),
            ));
        }
        if self.bins != self.canvas.width as usize || self.bins != self.canvas.height as usize {
            return Err(Error::InvalidConfig(format!(
                "bins ({}) must equal canvas size ({}x{})",
                self.bins, self.canvas.width, self.canvas.height
            )));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::InvalidConfig("sigma must be finite and >= 0".into()));
        }
        if !self.truncate.is_finite() || self.truncate < 0.0 {
            return Err(Error::InvalidConfig(
                "truncate must be finite and >= 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(Error::InvalidConfig(
                "background_alpha must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = HeatmapConfig::default();
        assert_eq!(c.canvas, Canvas::square(1024));
        assert_eq!(c.bins, 1024);
        assert_eq!(c.sigma, 16.0);
        assert_eq!(c.background_alpha, 0.20);
        assert_eq!(c.colormap, Colormap::DivergingRedBlue);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn bins_must_match_canvas() {
        let c = HeatmapConfig::new().with_bins(512);
        assert!(matches!(c.validate(), Err(Error::InvalidConfig(_))));

        let c = HeatmapConfig::new().with_canvas(Canvas::new(1024, 512));
        assert!(c.validate().is_err());

        assert!(HeatmapConfig::new().with_canvas_size(256).validate().is_ok());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(HeatmapConfig::new().with_sigma(-1.0).validate().is_err());
        assert!(HeatmapConfig::new().with_sigma(f32::NAN).validate().is_err());
        assert!(HeatmapConfig::new().with_truncate(f32::INFINITY).validate().is_err());
        assert!(HeatmapConfig::new()
            .with_background_alpha(1.01)
            .validate()
            .is_err());
        assert!(HeatmapConfig::new().with_canvas_size(0).validate().is_err());
    }

    #[test]
    fn zero_sigma_is_allowed() {
        assert!(HeatmapConfig::new().with_sigma(0.0).validate().is_ok());
    }
}
