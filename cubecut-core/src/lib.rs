/// cubecut Core Library - Cube and cutting-plane geometry
///
/// This library provides the presentation-free core: the cube wireframe, the
/// random cutting plane, the rotation pipeline, and the 2D primitives a front
/// end draws after every angle change.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod plane;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, Rejection, SceneError};
pub use frame::{FilledPolygon, Frame, Line2, LineStyle, Rgb};
pub use geometry::{Segment, Wireframe};
pub use plane::{CrossSection, PartialPoint, PlaneEquation, PlaneGenerator};
pub use projection::Viewport;
pub use scene::{Scene, SceneConfig};
pub use transform::{Axis, RotationState, Transform};
