use super::plane::Plane;
use super::vertex::Vertex;

/// A convex coplanar polygon with at least three vertices,
/// wound counter-clockwise around its plane normal
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Build a polygon, deriving its plane from the first three vertices
    pub fn new(vertices: Vec<Vertex>) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least 3 vertices");
        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        Self { vertices, plane }
    }

    /// Build a polygon carrying a known plane (used for split fragments)
    pub fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least 3 vertices");
        Self { vertices, plane }
    }

    /// Reverse winding and orientation
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate the polygon (valid for the convex faces
    /// produced by the primitives and their BSP fragments)
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        for i in 1..self.vertices.len().saturating_sub(1) {
            triangles.push([self.vertices[0], self.vertices[i], self.vertices[i + 1]]);
        }
        triangles
    }
}
