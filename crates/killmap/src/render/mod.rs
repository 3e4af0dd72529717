//! Turning advantage surfaces into images.
pub mod colormap;
pub mod composite;
pub mod postprocess;

pub use colormap::{ColorLut, Colormap};
pub use composite::{blend_over, Renderer, DEFAULT_BACKGROUND_ALPHA};
pub use postprocess::{encode_png, invert_rgb, postprocess};
