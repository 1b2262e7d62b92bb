//! The six metamaterial unit-cell generators.
//!
//! All dimensions are millimeters. Proportions are fixed relative to
//! the cell period so every design stays printable at any resolved
//! scale.

use crate::geom::primitives::{cuboid, cylinder, tube};
use crate::geom::Solid;

/// Concentric-ring lens: a base cylinder with four ring grooves cut
/// through it, thinner towards the center.
pub fn gradient_index_lens(period: f64, height: f64, thickness: f64, segments: usize) -> Solid {
    let n_rings = 5;
    let mut lens = cylinder(period / 2.0, height, segments);

    for i in 1..n_rings {
        let fraction = i as f64 / n_rings as f64;
        let ring_radius = (period / 2.0) * fraction;
        let ring_thickness = thickness * (1.0 - fraction);
        let inner = ring_radius - ring_thickness;
        if inner <= 0.0 {
            continue;
        }
        let groove = tube(ring_radius, inner, height, segments);
        lens = lens.difference(&groove);
    }
    lens
}

/// Rectangular patch over a full-period ground plane, with a feed
/// line running off the patch edge.
pub fn patch_antenna(period: f64, height: f64, thickness: f64) -> Solid {
    let patch_width = period * 0.8;
    let patch_length = period * 0.6;

    let patch = cuboid(patch_width, patch_length, thickness);
    let ground = cuboid(period, period, thickness).translate(0.0, 0.0, height - thickness);

    let feed_width = thickness * 2.0;
    let feed_length = period * 0.3;
    let feed = cuboid(feed_width, feed_length, thickness).translate(
        0.0,
        -patch_length / 2.0 - feed_length / 2.0,
        0.0,
    );

    patch.union(&ground).union(&feed)
}

/// Jerusalem-cross absorber: crossed bars over a ground plane
pub fn metamaterial_absorber(period: f64, height: f64, thickness: f64) -> Solid {
    let cross_width = period * 0.15;
    let cross_length = period * 0.4;

    let vertical = cuboid(cross_width, cross_length, thickness);
    let horizontal = cuboid(cross_length, cross_width, thickness);
    let ground = cuboid(period, period, thickness).translate(0.0, 0.0, height - thickness);

    vertical.union(&horizontal).union(&ground)
}

/// Full-period plate with a cross-shaped slot cut through it
pub fn frequency_selective_surface(period: f64, _height: f64, thickness: f64) -> Solid {
    let slot_width = period * 0.2;
    let slot_length = period * 0.6;

    let plate = cuboid(period, period, thickness);
    let vertical_slot = cuboid(slot_width, slot_length, thickness);
    let horizontal_slot = cuboid(slot_length, slot_width, thickness);

    plate.difference(&vertical_slot).difference(&horizontal_slot)
}

/// Eight parallel wires spanning 80% of the period
pub fn wire_grid_polarizer(period: f64, height: f64, thickness: f64) -> Solid {
    let n_wires = 8;
    let wire_width = thickness;
    let wire_spacing = period / n_wires as f64;

    let mut grid = Solid::new();
    for i in 0..n_wires {
        let x = (i as f64 - n_wires as f64 / 2.0 + 0.5) * wire_spacing;
        let wire = cuboid(wire_width, period * 0.8, height).translate(x, 0.0, 0.0);
        grid = grid.union(&wire);
    }
    grid
}

/// Split-ring resonator: annulus with a gap box cut at the outer edge
pub fn split_ring_resonator(period: f64, height: f64, _thickness: f64, segments: usize) -> Solid {
    let outer_radius = period / 2.5;
    let inner_radius = outer_radius * 0.7;
    let gap_width = period * 0.1;

    let ring = tube(outer_radius, inner_radius, height, segments);
    let gap = cuboid(gap_width, outer_radius * 2.2, height).translate(
        outer_radius + gap_width / 2.0,
        0.0,
        0.0,
    );

    ring.difference(&gap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: f64 = 20.0;
    const HEIGHT: f64 = 30.0;
    const THICKNESS: f64 = 2.0;

    #[test]
    fn lens_fits_inside_period_circle() {
        let lens = gradient_index_lens(PERIOD, HEIGHT, THICKNESS, 16);
        let bb = lens.bounding_box().unwrap();
        assert!(bb.max.x <= PERIOD / 2.0 + 1e-6);
        assert!(bb.min.x >= -PERIOD / 2.0 - 1e-6);
        assert!((bb.max.z - HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn lens_grooves_remove_material() {
        let plain = cylinder(PERIOD / 2.0, HEIGHT, 16);
        let lens = gradient_index_lens(PERIOD, HEIGHT, THICKNESS, 16);
        assert!(lens.triangle_count() > plain.triangle_count());
    }

    #[test]
    fn antenna_ground_sits_at_the_top() {
        let antenna = patch_antenna(PERIOD, HEIGHT, THICKNESS);
        let bb = antenna.bounding_box().unwrap();
        assert!((bb.max.z - HEIGHT).abs() < 1e-6);
        assert!(bb.min.z.abs() < 1e-6);
        // ground plane spans the full period
        assert!((bb.max.x - PERIOD / 2.0).abs() < 1e-6);
    }

    #[test]
    fn antenna_feed_extends_past_the_patch() {
        let antenna = patch_antenna(PERIOD, HEIGHT, THICKNESS);
        let bb = antenna.bounding_box().unwrap();
        // patch edge at -0.3*period, feed reaches -0.45*period
        assert!(bb.min.y < -PERIOD * 0.44);
    }

    #[test]
    fn absorber_cross_is_thinner_than_ground() {
        let absorber = metamaterial_absorber(PERIOD, HEIGHT, THICKNESS);
        let bb = absorber.bounding_box().unwrap();
        assert!((bb.max.z - HEIGHT).abs() < 1e-6);
        assert!((bb.max.x - PERIOD / 2.0).abs() < 1e-6);
    }

    #[test]
    fn fss_slots_pierce_the_plate() {
        let plate = cuboid(PERIOD, PERIOD, THICKNESS);
        let fss = frequency_selective_surface(PERIOD, HEIGHT, THICKNESS);
        let bb = fss.bounding_box().unwrap();
        assert!((bb.max.z - THICKNESS).abs() < 1e-6);
        assert!(fss.triangle_count() > plate.triangle_count());
    }

    #[test]
    fn polarizer_has_eight_disjoint_wires() {
        let polarizer = wire_grid_polarizer(PERIOD, HEIGHT, THICKNESS);
        // disjoint cuboids union without splitting: 8 boxes, 12 tris each
        assert_eq!(polarizer.triangle_count(), 8 * 12);
        let bb = polarizer.bounding_box().unwrap();
        assert!((bb.max.y - PERIOD * 0.4).abs() < 1e-6);
        assert!((bb.max.z - HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn polarizer_wires_are_centered() {
        let bb = wire_grid_polarizer(PERIOD, HEIGHT, THICKNESS)
            .bounding_box()
            .unwrap();
        assert!((bb.max.x + bb.min.x).abs() < 1e-6);
    }

    #[test]
    fn srr_is_a_ring_of_expected_size() {
        let srr = split_ring_resonator(PERIOD, HEIGHT, THICKNESS, 16);
        let bb = srr.bounding_box().unwrap();
        let outer = PERIOD / 2.5;
        assert!(bb.max.x <= outer + 1e-6);
        assert!(bb.min.x >= -outer - 1e-6);
        assert!((bb.max.z - HEIGHT).abs() < 1e-6);
        assert!(srr.triangle_count() > 0);
    }
}
