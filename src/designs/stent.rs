//! Auxetic arterial stent built from the SM3 (square mode 3) pattern.
//!
//! The stent is a cylindrical tube with a grid of auxetic cutouts
//! tiled over its surface and flared ends for anti-migration. The SM3
//! pattern gives the wall a negative Poisson ratio, so the stent
//! widens instead of necking when stretched axially.

use super::MM;
use crate::geom::primitives::{cuboid, tube};
use crate::geom::Solid;
use crate::{Error, Result};
use tracing::{debug, info};

/// SM3 unit cell edge length
const UNIT_CELL_SIZE: f64 = 4e-3;
/// Inner to outer square ratio that produces the auxetic hinges
const INNER_SQUARE_RATIO: f64 = 0.6;
/// Fraction of the wall each cutout penetrates
const PATTERN_DEPTH_RATIO: f64 = 0.7;
/// Flare length at each end
const FLARE_LENGTH: f64 = 5e-3;
/// Diameter increase of the flared ends
const FLARE_DIAMETER_INCREASE: f64 = 2e-3;

/// Stent parameters in meters. Defaults target the aorta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StentSpec {
    pub target_diameter: f64,
    pub length: f64,
    pub wall_thickness: f64,
    pub strut_thickness: f64,
}

impl Default for StentSpec {
    fn default() -> Self {
        Self {
            target_diameter: 20e-3,
            length: 50e-3,
            wall_thickness: 3e-3,
            strut_thickness: 0.8e-3,
        }
    }
}

impl StentSpec {
    pub fn unit_cell_size(&self) -> f64 {
        UNIT_CELL_SIZE
    }

    /// Patterns around the circumference, at least 6 for coverage
    pub fn circumferential_cells(&self) -> usize {
        let circumference = std::f64::consts::PI * self.target_diameter;
        ((circumference / UNIT_CELL_SIZE) as usize).max(6)
    }

    /// Patterns along the length, at least 3 for structure
    pub fn longitudinal_cells(&self) -> usize {
        ((self.length / UNIT_CELL_SIZE) as usize).max(3)
    }

    pub fn flare_length(&self) -> f64 {
        FLARE_LENGTH
    }

    pub fn flare_diameter_increase(&self) -> f64 {
        FLARE_DIAMETER_INCREASE
    }

    /// Cutout depth into the wall
    pub fn pattern_depth(&self) -> f64 {
        self.wall_thickness * PATTERN_DEPTH_RATIO
    }

    /// Reject dimensions that cannot form a hollow tube
    pub fn validate(&self) -> Result<()> {
        if self.target_diameter <= 0.0 || self.length <= 0.0 || self.strut_thickness <= 0.0 {
            return Err(Error::InvalidInput {
                field: "stent".to_string(),
                reason: "diameter, length, and strut thickness must be positive".to_string(),
            });
        }
        if self.wall_thickness <= 0.0 || self.wall_thickness >= self.target_diameter / 2.0 {
            return Err(Error::InvalidInput {
                field: "stent.wall_thickness".to_string(),
                reason: format!(
                    "wall must be positive and thinner than the {:.1} mm radius",
                    self.target_diameter / 2.0 * 1e3,
                ),
            });
        }
        Ok(())
    }
}

/// One SM3 cutout in millimeters: an outer square cavity with the
/// inner square and four connecting beams left standing. Extruded
/// along z from 0 to `depth`.
fn sm3_cutout(strut_thickness: f64, depth: f64) -> Solid {
    let outer_size = UNIT_CELL_SIZE * MM * 0.8;
    let inner_size = outer_size * INNER_SQUARE_RATIO;
    let beam_width = strut_thickness;
    let beam_length = (outer_size - inner_size) / 2.0 + beam_width;

    let cavity = cuboid(outer_size, outer_size, depth);
    let inner_keep = cuboid(inner_size, inner_size, depth);

    let h_beam_1 = cuboid(beam_length, beam_width, depth).translate(0.0, outer_size / 4.0, 0.0);
    let h_beam_2 = cuboid(beam_length, beam_width, depth).translate(0.0, -outer_size / 4.0, 0.0);
    let v_beam_1 = cuboid(beam_width, beam_length, depth).translate(outer_size / 4.0, 0.0, 0.0);
    let v_beam_2 = cuboid(beam_width, beam_length, depth).translate(-outer_size / 4.0, 0.0, 0.0);

    cavity
        .difference(&inner_keep)
        .difference(&h_beam_1)
        .difference(&h_beam_2)
        .difference(&v_beam_1)
        .difference(&v_beam_2)
}

/// Build the full stent solid, centered on the origin with its axis
/// along z. The tube body spans -length/2 to +length/2 and the flares
/// extend past each end.
pub fn generate_stent(spec: &StentSpec, segments: usize) -> Solid {
    let outer_radius = spec.target_diameter / 2.0 * MM;
    let inner_radius = outer_radius - spec.wall_thickness * MM;
    let length = spec.length * MM;
    let pattern_depth = spec.pattern_depth() * MM;
    let pattern_radius = (outer_radius + inner_radius) / 2.0;

    let n_circumferential = spec.circumferential_cells();
    let n_longitudinal = spec.longitudinal_cells();
    info!(
        "Generating SM3 stent: {:.0}mm dia x {:.0}mm, {}x{} cells",
        spec.target_diameter * MM,
        length,
        n_circumferential,
        n_longitudinal,
    );

    let body = tube(outer_radius, inner_radius, length, segments);
    let mut stent = body.translate(0.0, 0.0, -length / 2.0);

    let cutout = sm3_cutout(spec.strut_thickness * MM, pattern_depth);
    for i in 0..n_longitudinal {
        for j in 0..n_circumferential {
            let angle = (j as f64 * 2.0 * std::f64::consts::PI) / n_circumferential as f64;
            let z = (i as f64 + 0.5) * (length / n_longitudinal as f64) - length / 2.0;
            let x = pattern_radius * angle.cos();
            let y = pattern_radius * angle.sin();

            let placed = cutout.rotate_z(angle).translate(x, y, z);
            stent = stent.difference(&placed);
        }
        debug!("Cut pattern row {}/{}", i + 1, n_longitudinal);
    }

    // Flared ends grip the vessel wall against migration
    let flare_length = spec.flare_length() * MM;
    let flare_outer = (spec.target_diameter + spec.flare_diameter_increase()) / 2.0 * MM;
    let flare = tube(flare_outer, inner_radius, flare_length, segments);
    let proximal = flare.translate(0.0, 0.0, -length / 2.0 - flare_length);
    let distal = flare.translate(0.0, 0.0, length / 2.0);

    stent.union(&proximal).union(&distal)
}
