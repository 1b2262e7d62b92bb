//! BSP tree over polygon soups, the workhorse behind the boolean ops

use super::plane::Plane;
use super::polygon::Polygon;

/// A BSP node: splitting plane plus front/back subtrees, or a leaf
#[derive(Debug, Clone, Default)]
pub struct Node {
    plane: Option<Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Self::new();
        node.build(polygons);
        node
    }

    /// Convert solid space to empty space and vice versa
    pub fn invert(&mut self) {
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }
            std::mem::swap(&mut current.front, &mut current.back);
            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Remove the parts of `polygons` inside this BSP's solid space
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };

        let mut front_polys = Vec::with_capacity(polygons.len());
        let mut back_polys = Vec::with_capacity(polygons.len());

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);

            for coplanar in coplanar_front.into_iter().chain(coplanar_back) {
                if plane.normal().dot(&coplanar.plane.normal()) > 0.0 {
                    front_parts.push(coplanar);
                } else {
                    back_parts.push(coplanar);
                }
            }

            front_polys.append(&mut front_parts);
            back_polys.append(&mut back_parts);
        }

        let mut result = match &self.front {
            Some(front) => front.clip_polygons(&front_polys),
            None => front_polys,
        };
        if let Some(back) = &self.back {
            result.extend(back.clip_polygons(&back_polys));
        }
        // No back subtree: polygons behind the plane are inside the solid
        result
    }

    /// Remove the parts of this BSP's polygons inside `bsp`'s solid space
    pub fn clip_to(&mut self, bsp: &Node) {
        self.polygons = bsp.clip_polygons(&self.polygons);
        if let Some(ref mut front) = self.front {
            front.clip_to(bsp);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(bsp);
        }
    }

    /// Collect every polygon in the tree
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);
            stack.extend(
                [&current.front, &current.back]
                    .iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    /// Insert polygons, splitting them across existing planes
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane.clone());
        }
        let plane = self.plane.as_ref().unwrap();

        let mut front = Vec::with_capacity(polygons.len() / 2);
        let mut back = Vec::with_capacity(polygons.len() / 2);

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);
            self.polygons.extend(coplanar_front);
            self.polygons.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&back);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::primitives::cuboid;

    #[test]
    fn build_and_collect_roundtrip() {
        let cube = cuboid(2.0, 2.0, 2.0);
        let node = Node::from_polygons(&cube.polygons);
        // Splitting never loses area: every input face is represented
        assert!(node.all_polygons().len() >= cube.polygons.len());
    }

    #[test]
    fn clip_disjoint_keeps_everything() {
        let a = cuboid(1.0, 1.0, 1.0);
        let b = cuboid(1.0, 1.0, 1.0).translate(10.0, 0.0, 0.0);
        let node = Node::from_polygons(&b.polygons);
        let clipped = node.clip_polygons(&a.polygons);
        assert_eq!(clipped.len(), a.polygons.len());
    }

    #[test]
    fn clip_contained_removes_everything() {
        let small = cuboid(1.0, 1.0, 1.0).translate(0.0, 0.0, 1.0);
        let big = cuboid(10.0, 10.0, 10.0);
        let node = Node::from_polygons(&big.polygons);
        let clipped = node.clip_polygons(&small.polygons);
        assert!(clipped.is_empty());
    }
}
