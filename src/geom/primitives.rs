//! Solid primitives used by the design generators.
//!
//! Conventions: boxes are centered in X/Y with z in `[0, height]`,
//! cylinders sit on the XY plane extruding along +Z. Dimensions in mm.

use super::polygon::Polygon;
use super::solid::Solid;
use super::vertex::Vertex;
use super::Real;
use nalgebra::Point3;

fn quad(points: [Point3<Real>; 4]) -> Polygon {
    let plane = super::plane::Plane::from_points(points[0], points[1], points[2]);
    let normal = plane.normal();
    Polygon::new(points.into_iter().map(|p| Vertex::new(p, normal)).collect())
}

/// Axis-aligned box, centered in X and Y, z in `[0, height]`
pub fn cuboid(width: Real, depth: Real, height: Real) -> Solid {
    let (x0, x1) = (-width / 2.0, width / 2.0);
    let (y0, y1) = (-depth / 2.0, depth / 2.0);
    let (z0, z1) = (0.0, height);
    let p = |x, y, z| Point3::new(x, y, z);

    Solid::from_polygons(vec![
        // bottom (-Z)
        quad([p(x0, y0, z0), p(x0, y1, z0), p(x1, y1, z0), p(x1, y0, z0)]),
        // top (+Z)
        quad([p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)]),
        // front (-Y)
        quad([p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)]),
        // back (+Y)
        quad([p(x1, y1, z0), p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1)]),
        // left (-X)
        quad([p(x0, y1, z0), p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1)]),
        // right (+X)
        quad([p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)]),
    ])
}

/// Circle of `segments` points at height `z`, counter-clockwise
fn ring_points(radius: Real, segments: usize, z: Real) -> Vec<Point3<Real>> {
    (0..segments)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as Real) / (segments as Real);
            Point3::new(radius * theta.cos(), radius * theta.sin(), z)
        })
        .collect()
}

/// Right cylinder along +Z, base on the XY plane
pub fn cylinder(radius: Real, height: Real, segments: usize) -> Solid {
    assert!(segments >= 3, "cylinder needs at least 3 segments");
    let bottom = ring_points(radius, segments, 0.0);
    let top = ring_points(radius, segments, height);
    let center_bottom = Point3::new(0.0, 0.0, 0.0);
    let center_top = Point3::new(0.0, 0.0, height);

    let mut polygons = Vec::with_capacity(3 * segments);
    for i in 0..segments {
        let j = (i + 1) % segments;
        // side wall, outward normal
        polygons.push(quad([bottom[i], bottom[j], top[j], top[i]]));
        // caps as fans around the axis
        polygons.push(triangle([center_bottom, bottom[j], bottom[i]]));
        polygons.push(triangle([center_top, top[i], top[j]]));
    }
    Solid::from_polygons(polygons)
}

fn triangle(points: [Point3<Real>; 3]) -> Polygon {
    let plane = super::plane::Plane::from_points(points[0], points[1], points[2]);
    let normal = plane.normal();
    Polygon::new(points.into_iter().map(|p| Vertex::new(p, normal)).collect())
}

/// Hollow cylinder (outer minus inner), built directly so the
/// coaxial walls never pass through a boolean
pub fn tube(outer_radius: Real, inner_radius: Real, height: Real, segments: usize) -> Solid {
    assert!(
        outer_radius > inner_radius && inner_radius > 0.0,
        "tube radii must satisfy outer > inner > 0"
    );
    let outer_bottom = ring_points(outer_radius, segments, 0.0);
    let outer_top = ring_points(outer_radius, segments, height);
    let inner_bottom = ring_points(inner_radius, segments, 0.0);
    let inner_top = ring_points(inner_radius, segments, height);

    let mut polygons = Vec::with_capacity(4 * segments);
    for i in 0..segments {
        let j = (i + 1) % segments;
        // outer wall faces outward, inner wall faces the bore
        polygons.push(quad([outer_bottom[i], outer_bottom[j], outer_top[j], outer_top[i]]));
        polygons.push(quad([inner_bottom[j], inner_bottom[i], inner_top[i], inner_top[j]]));
        // annular caps
        polygons.push(quad([
            inner_bottom[i],
            inner_bottom[j],
            outer_bottom[j],
            outer_bottom[i],
        ]));
        polygons.push(quad([
            inner_top[j],
            inner_top[i],
            outer_top[i],
            outer_top[j],
        ]));
    }
    Solid::from_polygons(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::EPSILON;
    use nalgebra::Vector3;

    #[test]
    fn cuboid_extents() {
        let solid = cuboid(2.0, 4.0, 6.0);
        let bb = solid.bounding_box().unwrap();
        assert_eq!(bb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(1.0, 2.0, 6.0));
        assert_eq!(solid.polygons.len(), 6);
        assert_eq!(solid.triangle_count(), 12);
    }

    #[test]
    fn cuboid_faces_point_outward() {
        // Every face normal points away from the solid's center
        let solid = cuboid(2.0, 2.0, 2.0);
        let center = Point3::new(0.0, 0.0, 1.0);
        for polygon in &solid.polygons {
            let on_face = polygon.vertices[0].pos;
            assert!(polygon.plane.normal().dot(&(on_face - center)) > 0.0);
        }
    }

    #[test]
    fn cylinder_extents_and_face_count() {
        let solid = cylinder(3.0, 5.0, 16);
        let bb = solid.bounding_box().unwrap();
        assert!((bb.max.x - 3.0).abs() < EPSILON);
        assert!((bb.min.x + 3.0).abs() < EPSILON);
        assert!((bb.max.z - 5.0).abs() < EPSILON);
        assert_eq!(solid.polygons.len(), 3 * 16);
    }

    #[test]
    fn cylinder_side_normals_are_radial() {
        let solid = cylinder(2.0, 1.0, 12);
        for polygon in &solid.polygons {
            let n = polygon.plane.normal();
            if n.z.abs() < 0.5 {
                // side wall: normal must have no vertical component
                assert!(n.z.abs() < 1e-9);
                assert!((n.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn tube_has_bore() {
        let solid = tube(5.0, 3.0, 2.0, 24);
        assert_eq!(solid.polygons.len(), 4 * 24);
        let bb = solid.bounding_box().unwrap();
        assert!((bb.max.x - 5.0).abs() < EPSILON);
        // Inner wall normals point towards the axis
        let inward = solid.polygons.iter().filter(|p| {
            let n = p.plane.normal();
            let at = p.vertices[0].pos;
            n.z.abs() < 1e-9 && n.dot(&Vector3::new(at.x, at.y, 0.0)) < 0.0
        });
        assert_eq!(inward.count(), 24);
    }

    #[test]
    #[should_panic(expected = "outer > inner")]
    fn tube_rejects_inverted_radii() {
        let _ = tube(2.0, 3.0, 1.0, 16);
    }
}
