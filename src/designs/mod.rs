//! Parametric generators for printable metamaterial structures.
//!
//! Every generator takes parameters in meters and builds geometry in
//! millimeters, the native unit of the STL files we emit.

pub mod stent;
pub mod unit_cells;

use crate::analysis::{DesignKind, GeometryParams};
use crate::geom::{primitives, Solid};

/// Meters to millimeters
pub(crate) const MM: f64 = 1e3;

/// Build the unit-cell geometry for a classified design
pub fn generate(kind: DesignKind, params: &GeometryParams, segments: usize) -> Solid {
    let period = params.period * MM;
    let height = params.height * MM;
    let thickness = params.thickness * MM;
    match kind {
        DesignKind::GradientIndexLens => {
            unit_cells::gradient_index_lens(period, height, thickness, segments)
        }
        DesignKind::PatchAntenna => unit_cells::patch_antenna(period, height, thickness),
        DesignKind::MetamaterialAbsorber => {
            unit_cells::metamaterial_absorber(period, height, thickness)
        }
        DesignKind::FrequencySelectiveSurface => {
            unit_cells::frequency_selective_surface(period, height, thickness)
        }
        DesignKind::WireGridPolarizer => {
            unit_cells::wire_grid_polarizer(period, height, thickness)
        }
        DesignKind::SplitRingResonator => {
            unit_cells::split_ring_resonator(period, height, thickness, segments)
        }
    }
}

/// Plain rectangular unit cell for direct parametric generation
pub fn plain_cell(period: f64, height: f64) -> Solid {
    primitives::cuboid(period * MM, period * MM, height * MM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_produces_geometry_for_every_kind() {
        let params = GeometryParams {
            period: 20e-3,
            height: 30e-3,
            thickness: 2e-3,
        };
        for kind in [
            DesignKind::GradientIndexLens,
            DesignKind::PatchAntenna,
            DesignKind::MetamaterialAbsorber,
            DesignKind::FrequencySelectiveSurface,
            DesignKind::WireGridPolarizer,
            DesignKind::SplitRingResonator,
        ] {
            let solid = generate(kind, &params, 16);
            assert!(solid.triangle_count() > 0, "{kind:?} produced no geometry");
        }
    }

    #[test]
    fn plain_cell_spans_period_in_millimeters() {
        let cell = plain_cell(80e-6, 150e-6);
        let bb = cell.bounding_box().unwrap();
        assert!((bb.max.x - bb.min.x - 0.08).abs() < 1e-9);
        assert!((bb.max.z - 0.15).abs() < 1e-9);
        assert!(bb.min.z.abs() < 1e-9);
    }
}
