//! End-to-end orchestration: literature scan, candidate analysis, and
//! batch CAD generation.

use crate::analysis::{classify_design, resolve_geometry, select_candidates};
use crate::client::{PdfFetcher, SemanticScholarClient};
use crate::config::Config;
use crate::designs::{self, stent::StentSpec};
use crate::export::{self, DesignMetadata, StentMetadata};
use crate::extract::{enrich, EnrichedPaper};
use crate::geom::stl;
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Scale factors applied to the resolved parameters of each candidate
pub const VARIANT_SCALES: [f64; 3] = [0.8, 1.0, 1.2];

/// Identifier and title used for the standalone stent design
pub const STENT_ID: &str = "auxetic_arterial_stent";
pub const STENT_TITLE: &str = "4D-Printed Arterial Stent with Auxetic Materials";

/// Owns the clients and configuration shared by all pipeline stages
pub struct Pipeline {
    config: Config,
    client: SemanticScholarClient,
    pdf: PdfFetcher,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let client = SemanticScholarClient::new(&config.search)?;
        let pdf = PdfFetcher::new(
            Duration::from_secs(config.search.timeout_secs),
            &config.search.user_agent,
        )?;
        Ok(Self {
            config,
            client,
            pdf,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Location of the enriched paper database
    pub fn papers_file(&self) -> PathBuf {
        self.config.paths.data_dir.join("papers.json")
    }

    /// Search for papers, enrich them with extracted parameters, keep
    /// the relevant ones, download their PDFs, and persist the result.
    pub async fn scan(&self, query: &str) -> Result<PathBuf> {
        let papers = self
            .client
            .search(query, self.config.search.years, self.config.search.limit)
            .await?;

        let mut kept: Vec<EnrichedPaper> = Vec::new();
        for paper in papers {
            let mut enriched = enrich(paper);
            if enriched.relevance_score <= 1.0 {
                debug!(
                    "Skipping '{}' (score {:.1})",
                    enriched.paper.title_or_unknown(),
                    enriched.relevance_score,
                );
                continue;
            }
            enriched.pdf_path = self
                .pdf
                .download(&enriched.paper, &self.config.paths.papers_dir)
                .await;
            kept.push(enriched);
        }

        let out = self.papers_file();
        std::fs::create_dir_all(&self.config.paths.data_dir)?;
        std::fs::write(&out, serde_json::to_string_pretty(&kept)?)?;
        info!("Saved {} relevant papers to {}", kept.len(), out.display());
        Ok(out)
    }

    /// Load the enriched paper database written by [`Pipeline::scan`]
    pub fn load_papers(&self) -> Result<Vec<EnrichedPaper>> {
        let text = std::fs::read_to_string(self.papers_file())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Papers worth generating geometry for, best first
    pub fn candidates(&self) -> Result<Vec<EnrichedPaper>> {
        Ok(select_candidates(&self.load_papers()?))
    }

    /// Generate scaled design variants for every candidate paper
    pub fn batch_generate(&self) -> Result<Vec<PathBuf>> {
        let candidates = self.candidates()?;
        let mut generated = Vec::new();
        for paper in &candidates {
            info!(
                "Generating variants for: {}",
                paper.paper.title_or_unknown()
            );
            generated.extend(self.generate_variants(paper)?);
        }
        Ok(generated)
    }

    /// Three scaled variants of one paper's resolved geometry
    fn generate_variants(&self, paper: &EnrichedPaper) -> Result<Vec<PathBuf>> {
        let base = resolve_geometry(paper);
        let kind = classify_design(paper);
        let title = paper.paper.title_or_unknown();
        let short_id: String = paper.paper.id_or_unknown().chars().take(8).collect();
        let dir = export::design_dir(&self.config.paths.designs_dir, title);

        let mut paths = Vec::with_capacity(VARIANT_SCALES.len());
        for (i, scale) in VARIANT_SCALES.iter().enumerate() {
            let params = base.scaled(*scale);
            let variant_id = format!("{}_v{}", short_id, i + 1);
            let stl_path = dir.join(export::unit_cell_filename(kind, &variant_id, &params));

            let solid = designs::generate(kind, &params, self.config.geometry.segments);
            let metadata = DesignMetadata::new(&variant_id, title, kind, &params, &stl_path);
            export::write_design(&solid, &stl_path, &metadata)?;
            paths.push(stl_path);
        }
        Ok(paths)
    }

    /// Generate a single plain unit cell without paper context
    pub fn generate_cell(&self, period: f64, height: f64, title: &str) -> Result<PathBuf> {
        let dir = export::design_dir(&self.config.paths.designs_dir, title);
        std::fs::create_dir_all(&dir)?;

        let cell = designs::plain_cell(period, height);
        let path = dir.join(format!("cell_{:.0}um.stl", period * 1e6));
        stl::write_stl_file(&cell, &path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Generate the auxetic arterial stent with its metadata sidecar
    pub fn generate_stent(&self, spec: &StentSpec) -> Result<PathBuf> {
        spec.validate()?;
        let solid = designs::stent::generate_stent(spec, self.config.geometry.segments);
        let dir = export::design_dir(&self.config.paths.designs_dir, STENT_TITLE);
        let stl_path = dir.join(export::stent_filename(STENT_ID, spec));

        let metadata = StentMetadata::new(STENT_ID, STENT_TITLE, spec, &stl_path);
        export::write_design(&solid, &stl_path, &metadata)?;
        Ok(stl_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Paper;

    fn pipeline_in(dir: &std::path::Path) -> Pipeline {
        let mut config = Config::default();
        config.paths.data_dir = dir.join("data");
        config.paths.papers_dir = dir.join("papers");
        config.paths.designs_dir = dir.join("designs");
        config.geometry.segments = 12;
        Pipeline::new(config).unwrap()
    }

    fn write_papers(pipeline: &Pipeline, papers: &[EnrichedPaper]) {
        std::fs::create_dir_all(&pipeline.config.paths.data_dir).unwrap();
        std::fs::write(
            pipeline.papers_file(),
            serde_json::to_string_pretty(papers).unwrap(),
        )
        .unwrap();
    }

    fn fdm_paper() -> EnrichedPaper {
        enrich(Paper {
            paper_id: Some("abcdef1234567890".to_string()),
            title: Some("FDM printed tunable metamaterial".to_string()),
            abstract_text: Some("A 10 mm unit cell printed by fdm in pla.".to_string()),
            ..Paper::default()
        })
    }

    #[test]
    fn generate_cell_writes_micrometer_named_stl() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        let path = pipeline
            .generate_cell(80e-6, 150e-6, "Manual_Generation")
            .unwrap();
        assert!(path.exists());
        assert!(path.ends_with("Manual_Generation/cell_80um.stl"));
    }

    #[test]
    fn batch_generate_produces_three_variants_per_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        write_papers(&pipeline, &[fdm_paper()]);

        let generated = pipeline.batch_generate().unwrap();
        assert_eq!(generated.len(), 3);
        for path in &generated {
            assert!(path.exists());
            assert!(path.with_extension("json").exists());
        }
        // variant ids use the first 8 characters of the paper id
        let name = generated[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.contains("abcdef12_v1"));
    }

    #[test]
    fn variant_filenames_scale_with_the_period() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        write_papers(&pipeline, &[fdm_paper()]);

        let generated = pipeline.batch_generate().unwrap();
        let names: Vec<String> = generated
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        // 10 mm resolved period scaled by 0.8 / 1.0 / 1.2
        assert!(names[0].contains("_8mm_"));
        assert!(names[1].contains("_10mm_"));
        assert!(names[2].contains("_12mm_"));
    }

    #[test]
    fn stent_generation_writes_stl_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        let spec = StentSpec {
            target_diameter: 6e-3,
            length: 10e-3,
            wall_thickness: 1.5e-3,
            strut_thickness: 0.8e-3,
        };
        let path = pipeline.generate_stent(&spec).unwrap();
        assert!(path.exists());
        let sidecar = std::fs::read_to_string(path.with_extension("json")).unwrap();
        assert!(sidecar.contains("SM3_square_mode_3"));
        assert!(sidecar.contains("auxetic_arterial_4d_printed"));
    }

    #[test]
    fn stent_generation_rejects_impossible_wall() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        let spec = StentSpec {
            wall_thickness: 12e-3,
            ..StentSpec::default()
        };
        let err = pipeline.generate_stent(&spec).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput { .. }));
    }

    #[test]
    fn missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path());
        assert!(pipeline.load_papers().is_err());
    }
}
