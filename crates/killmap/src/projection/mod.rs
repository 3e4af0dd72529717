//! Projection of in-world kill positions onto the heatmap canvas.
pub mod canvas;
pub mod geometry;
pub mod mapper;

pub use canvas::{Canvas, PixelPoint, DEFAULT_CANVAS_SIZE};
pub use geometry::{parse_position, MapGeometry, MinimapExtents};
pub use mapper::{world_to_canvas, CoordinateMapper};
