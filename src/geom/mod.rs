//! Compact constructive solid geometry kernel.
//!
//! Boolean operations (union, difference, intersection) on closed
//! polygonal solids via BSP trees, plus the handful of primitives the
//! design generators need. All coordinates are millimeters.

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod primitives;
pub mod solid;
pub mod stl;
pub mod vertex;

/// Scalar type used throughout the kernel
pub type Real = f64;

/// Tolerance for point/plane classification, tuned for mm-scale parts
pub const EPSILON: Real = 1e-5;

pub use plane::Plane;
pub use polygon::Polygon;
pub use solid::{Aabb, Solid};
pub use vertex::Vertex;
