use super::polygon::Polygon;
use super::vertex::Vertex;
use super::{Real, EPSILON};
use nalgebra::{Point3, Vector3};

pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// An oriented plane in normal/offset form (`n . p = w`)
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

impl Plane {
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Self {
            normal: normal.normalize(),
            w,
        }
    }

    /// Plane through three points, normal by the right-hand rule.
    /// Degenerate triangles collapse to the XY plane.
    pub fn from_points(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        let cross = (b - a).cross(&(c - a));
        if cross.norm_squared() < EPSILON * EPSILON {
            return Self {
                normal: Vector3::z(),
                w: 0.0,
            };
        }
        let normal = cross.normalize();
        Self {
            w: normal.dot(&a.coords),
            normal,
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Classify a point as COPLANAR, FRONT, or BACK
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let distance = self.normal.dot(&point.coords) - self.w;
        if distance > EPSILON {
            FRONT
        } else if distance < -EPSILON {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Split `polygon` by this plane into four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Spanning polygons are cut along the plane; fragments keep the
    /// parent polygon's plane so numerical drift cannot reorient them.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(0, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal()) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut split_front: Vec<Vertex> = Vec::new();
                let mut split_back: Vec<Vertex> = Vec::new();

                for i in 0..polygon.vertices.len() {
                    let j = (i + 1) % polygon.vertices.len();
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    // Edge crosses the plane: insert the intersection on both sides
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let crossing = vertex_i.interpolate(vertex_j, t);
                            split_front.push(crossing);
                            split_back.push(crossing);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(split_front, polygon.plane.clone()));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(split_back, polygon.plane.clone()));
                }
            }
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: Real, y: Real, z: Real) -> Vertex {
        Vertex::new(Point3::new(x, y, z), Vector3::z())
    }

    #[test]
    fn from_points_right_hand_rule() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!((plane.normal() - Vector3::z()).norm() < 1e-12);
        assert!(plane.offset().abs() < 1e-12);
    }

    #[test]
    fn orient_point_classification() {
        let plane = Plane::from_normal(Vector3::z(), 1.0);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 2.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 0.0)), BACK);
        assert_eq!(plane.orient_point(&Point3::new(5.0, -3.0, 1.0)), COPLANAR);
    }

    #[test]
    fn split_spanning_triangle() {
        // Triangle straddling the z = 0 plane
        let triangle = Polygon::new(vec![
            vertex(0.0, 0.0, -1.0),
            vertex(2.0, 0.0, -1.0),
            vertex(0.0, 0.0, 1.0),
        ]);
        let plane = Plane::from_normal(Vector3::z(), 0.0);
        let (cf, cb, front, back) = plane.split_polygon(&triangle);

        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        // The back fragment is a quad, the front a triangle
        assert_eq!(back[0].vertices.len(), 4);
        assert_eq!(front[0].vertices.len(), 3);
        for v in front[0].vertices.iter().chain(back[0].vertices.iter()) {
            assert!(v.pos.z >= -1.0 - EPSILON && v.pos.z <= 1.0 + EPSILON);
        }
    }

    #[test]
    fn split_keeps_coplanar_whole() {
        let square = Polygon::new(vec![
            vertex(0.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(1.0, 1.0, 0.0),
            vertex(0.0, 1.0, 0.0),
        ]);
        let plane = Plane::from_normal(Vector3::z(), 0.0);
        let (cf, cb, front, back) = plane.split_polygon(&square);
        assert_eq!(cf.len(), 1);
        assert!(cb.is_empty() && front.is_empty() && back.is_empty());
    }
}
