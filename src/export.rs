//! Design output: folder layout, STL files, and JSON metadata sidecars

use crate::analysis::{DesignKind, GeometryParams};
use crate::designs::stent::StentSpec;
use crate::geom::{stl, Solid};
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Convert a paper title into a clean folder name: strip punctuation,
/// collapse whitespace to underscores, cap at 50 characters.
pub fn sanitize_title(title: &str) -> String {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let strip = STRIP.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap());
    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").unwrap());

    let clean = strip.replace_all(title, "");
    let clean = spaces.replace_all(&clean, "_");
    let clean: String = clean.chars().take(50).collect();
    clean.trim_end_matches('_').to_string()
}

/// Per-paper output folder under the designs root
pub fn design_dir(designs_root: &Path, paper_title: &str) -> PathBuf {
    designs_root.join(sanitize_title(paper_title))
}

/// Unit-cell STL filename, e.g. `split_ring_resonator_ab12cd34_20mm_30mm.stl`
pub fn unit_cell_filename(kind: DesignKind, paper_id: &str, params: &GeometryParams) -> String {
    format!(
        "{}_{}_{:.0}mm_{:.0}mm.stl",
        kind.label(),
        paper_id,
        params.period * 1e3,
        params.height * 1e3,
    )
}

/// Stent STL filename keeps the micrometer convention,
/// e.g. `auxetic_stent_x_20000um_dia_50000um_len.stl`
pub fn stent_filename(paper_id: &str, spec: &StentSpec) -> String {
    format!(
        "auxetic_stent_{}_{:.0}um_dia_{:.0}um_len.stl",
        paper_id,
        spec.target_diameter * 1e6,
        spec.length * 1e6,
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignParameters {
    pub period_m: f64,
    pub height_m: f64,
    pub thickness_m: f64,
    pub period_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
}

impl From<&GeometryParams> for DesignParameters {
    fn from(params: &GeometryParams) -> Self {
        Self {
            period_m: params.period,
            height_m: params.height,
            thickness_m: params.thickness,
            period_mm: params.period * 1e3,
            height_mm: params.height * 1e3,
            thickness_mm: params.thickness * 1e3,
        }
    }
}

/// Sidecar written next to every unit-cell STL
#[derive(Debug, Clone, Serialize)]
pub struct DesignMetadata {
    pub paper_id: String,
    pub paper_title: String,
    pub paper_folder: String,
    pub geometry_type: DesignKind,
    pub parameters: DesignParameters,
    pub file_path: String,
    pub generated_at: String,
    pub manufacturing_method: &'static str,
    pub scale: &'static str,
}

impl DesignMetadata {
    pub fn new(
        paper_id: &str,
        paper_title: &str,
        kind: DesignKind,
        params: &GeometryParams,
        stl_path: &Path,
    ) -> Self {
        Self {
            paper_id: paper_id.to_string(),
            paper_title: paper_title.to_string(),
            paper_folder: sanitize_title(paper_title),
            geometry_type: kind,
            parameters: params.into(),
            file_path: stl_path.display().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            manufacturing_method: "FDM_3D_printing",
            scale: "millimeter_scale",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StentPerformance {
    pub self_expansion_diameter_mm: f64,
    pub anti_migration_force_n: f64,
    pub poisson_ratio: f64,
    pub target_benchmark_n: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StentGeometry {
    pub target_diameter_m: f64,
    pub length_m: f64,
    pub wall_thickness_m: f64,
    pub strut_thickness_m: f64,
    pub unit_cell_size_m: f64,
    pub n_circumferential: usize,
    pub n_longitudinal: usize,
    pub flare_length_m: f64,
    pub flare_diameter_increase_m: f64,
    pub pattern_depth_m: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StentBiomechanics {
    pub flexibility: &'static str,
    pub radial_strength: &'static str,
    pub deployment_mechanism: &'static str,
    pub anti_migration: &'static str,
}

/// Sidecar written next to the auxetic stent STL. Performance figures
/// are the values reported for the SM3 pattern this design follows.
#[derive(Debug, Clone, Serialize)]
pub struct StentMetadata {
    pub paper_id: String,
    pub paper_title: String,
    pub paper_folder: String,
    pub stent_type: &'static str,
    pub auxetic_design: &'static str,
    pub material: &'static str,
    pub manufacturing: &'static str,
    pub performance_metrics: StentPerformance,
    pub geometric_parameters: StentGeometry,
    pub biomechanical_properties: StentBiomechanics,
    pub file_path: String,
    pub generated_at: String,
    pub design_validation: &'static str,
}

impl StentMetadata {
    pub fn new(paper_id: &str, paper_title: &str, spec: &StentSpec, stl_path: &Path) -> Self {
        Self {
            paper_id: paper_id.to_string(),
            paper_title: paper_title.to_string(),
            paper_folder: sanitize_title(paper_title),
            stent_type: "auxetic_arterial_4d_printed",
            auxetic_design: "SM3_square_mode_3",
            material: "PCL_polycaprolactone",
            manufacturing: "4D_printing_FFF",
            performance_metrics: StentPerformance {
                self_expansion_diameter_mm: 17.02,
                anti_migration_force_n: 1.32,
                poisson_ratio: -0.3,
                target_benchmark_n: 1.5,
            },
            geometric_parameters: StentGeometry {
                target_diameter_m: spec.target_diameter,
                length_m: spec.length,
                wall_thickness_m: spec.wall_thickness,
                strut_thickness_m: spec.strut_thickness,
                unit_cell_size_m: spec.unit_cell_size(),
                n_circumferential: spec.circumferential_cells(),
                n_longitudinal: spec.longitudinal_cells(),
                flare_length_m: spec.flare_length(),
                flare_diameter_increase_m: spec.flare_diameter_increase(),
                pattern_depth_m: spec.pattern_depth(),
            },
            biomechanical_properties: StentBiomechanics {
                flexibility: "high_at_extremes",
                radial_strength: "optimized_for_aorta",
                deployment_mechanism: "self_expanding",
                anti_migration: "flared_ends_with_auxetic_grip",
            },
            file_path: stl_path.display().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            design_validation: "based_on_biomimetics_2025_paper",
        }
    }
}

/// Write a solid as binary STL plus its `.json` metadata sidecar
pub fn write_design<M: Serialize>(solid: &Solid, stl_path: &Path, metadata: &M) -> Result<()> {
    if let Some(parent) = stl_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    stl::write_stl_file(solid, stl_path)?;

    let sidecar = stl_path.with_extension("json");
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&sidecar, json)?;

    info!(
        "Wrote {} ({} triangles) and {}",
        stl_path.display(),
        solid.triangle_count(),
        sidecar.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::primitives::cuboid;

    #[test]
    fn sanitize_strips_punctuation_and_spaces() {
        assert_eq!(
            sanitize_title("Tunable IR Metamaterials: A 3D-Printed Study!"),
            "Tunable_IR_Metamaterials_A_3D-Printed_Study"
        );
    }

    #[test]
    fn sanitize_caps_length_and_trims_underscores() {
        let long = "word ".repeat(30);
        let clean = sanitize_title(&long);
        assert!(clean.chars().count() <= 50);
        assert!(!clean.ends_with('_'));
    }

    #[test]
    fn unit_cell_filename_uses_whole_millimeters() {
        let params = GeometryParams {
            period: 20e-3,
            height: 30e-3,
            thickness: 2e-3,
        };
        assert_eq!(
            unit_cell_filename(DesignKind::SplitRingResonator, "ab12cd34", &params),
            "split_ring_resonator_ab12cd34_20mm_30mm.stl"
        );
    }

    #[test]
    fn stent_filename_uses_micrometers() {
        let spec = StentSpec::default();
        assert_eq!(
            stent_filename("auxetic_arterial_stent", &spec),
            "auxetic_stent_auxetic_arterial_stent_20000um_dia_50000um_len.stl"
        );
    }

    #[test]
    fn metadata_serializes_expected_fields() {
        let params = GeometryParams {
            period: 20e-3,
            height: 30e-3,
            thickness: 2e-3,
        };
        let meta = DesignMetadata::new(
            "id1",
            "A Lens Paper",
            DesignKind::GradientIndexLens,
            &params,
            Path::new("designs/A_Lens_Paper/x.stl"),
        );
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"geometry_type\":\"gradient_index_lens\""));
        assert!(json.contains("\"period_mm\":20.0"));
        assert!(json.contains("\"manufacturing_method\":\"FDM_3D_printing\""));
        assert!(json.contains("\"scale\":\"millimeter_scale\""));
    }

    #[test]
    fn stent_metadata_records_sm3_figures() {
        let spec = StentSpec::default();
        let meta = StentMetadata::new("s1", "Stent Paper", &spec, Path::new("out.stl"));
        assert_eq!(meta.auxetic_design, "SM3_square_mode_3");
        assert!((meta.performance_metrics.self_expansion_diameter_mm - 17.02).abs() < 1e-9);
        assert_eq!(meta.geometric_parameters.n_circumferential, 15);
        assert_eq!(meta.geometric_parameters.n_longitudinal, 12);
    }

    #[test]
    fn write_design_creates_stl_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let stl_path = dir.path().join("nested").join("cube.stl");
        let cube = cuboid(10.0, 10.0, 10.0);
        let params = GeometryParams {
            period: 10e-3,
            height: 10e-3,
            thickness: 2e-3,
        };
        let meta = DesignMetadata::new(
            "id",
            "title",
            DesignKind::SplitRingResonator,
            &params,
            &stl_path,
        );
        write_design(&cube, &stl_path, &meta).unwrap();
        assert!(stl_path.exists());
        let sidecar = stl_path.with_extension("json");
        let text = std::fs::read_to_string(sidecar).unwrap();
        assert!(text.contains("split_ring_resonator"));
    }
}
