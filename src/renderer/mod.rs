//! Wheel rendering
//!
//! `face` and `shapes` are plain data and run everywhere; `pipeline` draws
//! the cached face with WebGPU.

pub mod face;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use face::{FaceCache, FaceSegment, VIEW_EXTENT, WheelFace, truncate_label};
pub use pipeline::{RenderError, WheelRenderer};
pub use vertex::{Vertex, WheelUniforms};
