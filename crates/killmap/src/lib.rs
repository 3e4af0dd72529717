#![forbid(unsafe_code)]
//! killmap: heatmaps of where two opposing factions score their kills.
//!
//! Modules:
//! - projection: map geometry and the world-to-canvas plan-view projection
//! - surface: kill density estimation (histogram + Gaussian blur) and the signed advantage surface
//! - render: diverging colormaps, background compositing, inversion and PNG encoding
//! - pipeline: configuration, collaborator traits, events, and the generator that ties it together
pub mod error;
pub mod kills;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod surface;

/// Convenient re-exports for common types. Import with `use killmap::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::kills::{Faction, FactionKills, KillEvent, RoundId};
    pub use crate::pipeline::{
        render_heatmap, BackgroundRegistry, BackgroundSource, DirectoryBackgrounds,
        DirectorySink, EventSink, FnSink, GeometryProvider, GeometryRegistry, Heatmap,
        HeatmapConfig, HeatmapEvent, HeatmapGenerator, ImageSink, KillLog, KillSource,
        MemorySink, VecSink,
    };
    pub use crate::projection::{
        parse_position, Canvas, CoordinateMapper, MapGeometry, MinimapExtents, PixelPoint,
    };
    pub use crate::render::{Colormap, Renderer};
    pub use crate::surface::{
        compose, AdvantageSurface, ContrastSummary, DensityEstimator, DensitySurface,
    };
}
