use super::Real;
use nalgebra::{Point3, Vector3};

/// A mesh vertex: position plus outward normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    pub const fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Self { pos, normal }
    }

    /// Flip the vertex normal in place
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation towards `other` at parameter `t` in [0, 1]
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }
}
