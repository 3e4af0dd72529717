//! Heatmap generation from collaborator data to finished artifact.
//!
//! Stages run strictly in sequence: projection, density estimation (once per faction),
//! contrast, rendering, post-processing. Each stage produces a fresh value; nothing is
//! cached between runs.
pub mod config;
pub mod events;
pub mod runner;
pub mod sources;

pub use config::HeatmapConfig;
pub use events::{EventSink, FnSink, HeatmapEvent, VecSink};
pub use runner::{render_heatmap, Heatmap, HeatmapGenerator};
pub use sources::{
    BackgroundRegistry, BackgroundSource, DirectoryBackgrounds, DirectorySink, GeometryProvider,
    GeometryRegistry, ImageSink, KillLog, KillSource, MemorySink,
};
