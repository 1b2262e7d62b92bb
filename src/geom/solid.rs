use super::bsp::Node;
use super::polygon::Polygon;
use super::vertex::Vertex;
use super::{Real, EPSILON};
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<Real>,
    pub max: Point3<Real>,
}

impl Aabb {
    pub fn from_polygons(polygons: &[Polygon]) -> Option<Self> {
        let mut points = polygons.iter().flat_map(|p| p.vertices.iter());
        let first = points.next()?.pos;
        let (mut min, mut max) = (first, first);
        for vertex in points {
            min = min.inf(&vertex.pos);
            max = max.sup(&vertex.pos);
        }
        Some(Self { min, max })
    }

    /// Overlap test with a tolerance so touching boxes count as overlapping
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| {
            self.min[axis] <= other.max[axis] + EPSILON
                && other.min[axis] <= self.max[axis] + EPSILON
        })
    }
}

/// A closed solid represented as a soup of convex polygons
#[derive(Debug, Clone, Default)]
pub struct Solid {
    pub polygons: Vec<Polygon>,
}

impl Solid {
    pub const fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_polygons(&self.polygons)
    }

    /// Partition polygons into (may touch `other_bb`, cannot touch)
    /// so booleans only split faces near the other operand
    fn partition_polys(polygons: &[Polygon], other_bb: &Aabb) -> (Vec<Polygon>, Vec<Polygon>) {
        let mut maybe = Vec::new();
        let mut never = Vec::new();
        for polygon in polygons {
            match Aabb::from_polygons(std::slice::from_ref(polygon)) {
                Some(bb) if bb.intersects(other_bb) => maybe.push(polygon.clone()),
                _ => never.push(polygon.clone()),
            }
        }
        (maybe, never)
    }

    /// Union of two solids
    pub fn union(&self, other: &Solid) -> Solid {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let self_bb = self.bounding_box().expect("non-empty solid");
        let other_bb = other.bounding_box().expect("non-empty solid");

        let (a_clip, a_passthru) = Self::partition_polys(&self.polygons, &other_bb);
        let (b_clip, b_passthru) = Self::partition_polys(&other.polygons, &self_bb);

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        let mut polygons = a.all_polygons();
        polygons.extend(a_passthru);
        polygons.extend(b_passthru);
        Solid::from_polygons(polygons)
    }

    /// This solid minus `other`
    pub fn difference(&self, other: &Solid) -> Solid {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        let self_bb = self.bounding_box().expect("non-empty solid");
        let other_bb = other.bounding_box().expect("non-empty solid");

        let (a_clip, a_passthru) = Self::partition_polys(&self.polygons, &other_bb);
        let (b_clip, _) = Self::partition_polys(&other.polygons, &self_bb);

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        let mut polygons = a.all_polygons();
        polygons.extend(a_passthru);
        Solid::from_polygons(polygons)
    }

    /// Overlap of two solids
    pub fn intersection(&self, other: &Solid) -> Solid {
        if self.is_empty() || other.is_empty() {
            return Solid::new();
        }
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Solid::from_polygons(a.all_polygons())
    }

    /// Apply a rigid transform to every vertex; planes are rebuilt
    /// from the transformed positions
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Solid {
        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| {
                let vertices = polygon
                    .vertices
                    .iter()
                    .map(|v| {
                        Vertex::new(
                            matrix.transform_point(&v.pos),
                            (linear * v.normal).normalize(),
                        )
                    })
                    .collect();
                Polygon::new(vertices)
            })
            .collect();
        Solid::from_polygons(polygons)
    }

    pub fn translate(&self, x: Real, y: Real, z: Real) -> Solid {
        self.transform(&Matrix4::new_translation(&Vector3::new(x, y, z)))
    }

    /// Rotate about the +Z axis by `angle` radians
    pub fn rotate_z(&self, angle: Real) -> Solid {
        self.transform(&Rotation3::from_axis_angle(&Vector3::z_axis(), angle).to_homogeneous())
    }

    /// Number of triangles after fan triangulation
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }
}
