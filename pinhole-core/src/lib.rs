/// Pinhole Core Library - software point projection
///
/// Vector algebra, ray-plane intersection, camera view windows and the
/// projection of mesh vertices onto a bounds-checked RGBA framebuffer.
/// Display surfaces and event loops live in the front-end crates.

pub mod camera;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod plane;
pub mod projector;
pub mod render;
pub mod stl;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::Camera;
pub use config::SceneConfig;
pub use error::{RenderError, RenderResult};
pub use framebuffer::{Framebuffer, MemorySurface, Rgb, Surface};
pub use geometry::{Face, Mesh, ProjectedFace, ProjectedMesh};
pub use plane::{Plane, RayMode};
pub use projector::Projector;
pub use render::{render_frame, FrameStats};
pub use transform::Spin;
pub use vector::{Vec3, VectorExt};
