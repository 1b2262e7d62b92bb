//! Candidate selection and paper-to-geometry parameter resolution

use crate::extract::{EnrichedPaper, FDM_PRINTING};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// At most this many candidates feed the CAD batch
pub const MAX_CANDIDATES: usize = 5;

/// Which parametric generator a paper maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignKind {
    GradientIndexLens,
    PatchAntenna,
    MetamaterialAbsorber,
    FrequencySelectiveSurface,
    WireGridPolarizer,
    SplitRingResonator,
}

impl DesignKind {
    /// Stable label used in filenames and metadata
    pub const fn label(self) -> &'static str {
        match self {
            DesignKind::GradientIndexLens => "gradient_index_lens",
            DesignKind::PatchAntenna => "patch_antenna",
            DesignKind::MetamaterialAbsorber => "metamaterial_absorber",
            DesignKind::FrequencySelectiveSurface => "frequency_selective_surface",
            DesignKind::WireGridPolarizer => "wire_grid_polarizer",
            DesignKind::SplitRingResonator => "split_ring_resonator",
        }
    }
}

/// Unit-cell geometry resolved from a paper, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    pub period: f64,
    pub height: f64,
    pub thickness: f64,
}

impl GeometryParams {
    /// Uniformly scale every parameter (used for design variants)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            period: self.period * factor,
            height: self.height * factor,
            thickness: self.thickness * factor,
        }
    }
}

fn is_fdm(paper: &EnrichedPaper) -> bool {
    paper
        .extracted_params
        .manufacturing_methods
        .iter()
        .any(|m| m == FDM_PRINTING)
}

fn is_mm_scale(paper: &EnrichedPaper) -> bool {
    paper
        .extracted_params
        .dimensions
        .iter()
        .any(|d| d.is_printable_scale())
}

/// Filter and rank papers worth sending to the CAD generators.
/// FDM-printable mm-scale papers qualify first; when nothing
/// qualifies the top three by score are used anyway.
pub fn select_candidates(papers: &[EnrichedPaper]) -> Vec<EnrichedPaper> {
    let mut candidates: Vec<EnrichedPaper> = papers
        .iter()
        .filter(|p| {
            let fdm = is_fdm(p);
            let mm = is_mm_scale(p);
            let score = p.relevance_score;
            (fdm && mm && score > 2.0) || (fdm && score > 1.5) || (mm && score > 2.5)
        })
        .cloned()
        .collect();

    if candidates.is_empty() {
        warn!("No FDM-printable candidates found, using top papers");
        let mut ranked: Vec<EnrichedPaper> = papers.to_vec();
        ranked.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        candidates = ranked.into_iter().take(3).collect();
    }

    candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Resolve period/height/thickness (meters) from a paper's extracted
/// dimensions, bucketing each mention by magnitude and falling back to
/// application-specific defaults.
pub fn resolve_geometry(paper: &EnrichedPaper) -> GeometryParams {
    let mut period = None;
    let mut height = None;
    let mut thickness = None;

    for dimension in &paper.extracted_params.dimensions {
        let value = dimension.meters();
        if (1e-3..=50e-3).contains(&value) {
            period = Some(value);
        } else if (0.1e-3..=5e-3).contains(&value) {
            thickness = Some(value);
        } else if (5e-3..=100e-3).contains(&value) {
            height = Some(value);
        }
    }

    // Defaults keyed to the application, all FDM-printable
    let functions = &paper.extracted_params.functions;
    let (default_period, default_height) = if is_fdm(paper) {
        (20e-3, 30e-3)
    } else if functions.iter().any(|f| f == "antenna" || f == "lens") {
        (30e-3, 40e-3)
    } else {
        (25e-3, 35e-3)
    };

    let params = GeometryParams {
        period: period.unwrap_or(default_period),
        height: height.unwrap_or(default_height),
        thickness: thickness.unwrap_or(2e-3),
    };
    debug!(
        "Resolved geometry for '{}': period={:.1}mm height={:.1}mm thickness={:.1}mm",
        paper.paper.title_or_unknown(),
        params.period * 1e3,
        params.height * 1e3,
        params.thickness * 1e3,
    );
    params
}

/// Map a paper to the generator that best matches its content
pub fn classify_design(paper: &EnrichedPaper) -> DesignKind {
    let text = paper.paper.combined_text();
    let contains_any = |terms: &[&str]| terms.iter().any(|term| text.contains(term));

    if contains_any(&["lens", "beam steering", "focusing", "gradient index"]) {
        return DesignKind::GradientIndexLens;
    }
    if contains_any(&["antenna", "radiating", "transmission"]) {
        return DesignKind::PatchAntenna;
    }
    if contains_any(&["absorber", "absorption", "ram", "radar absorbing"]) {
        return DesignKind::MetamaterialAbsorber;
    }
    if contains_any(&["filter", "frequency selective", "fss"]) {
        return DesignKind::FrequencySelectiveSurface;
    }
    if contains_any(&["polarizer", "polarization", "wire grid"]) {
        return DesignKind::WireGridPolarizer;
    }

    // Fall back to the mined function list, same precedence
    let functions = &paper.extracted_params.functions;
    for (function, kind) in [
        ("lens", DesignKind::GradientIndexLens),
        ("antenna", DesignKind::PatchAntenna),
        ("absorber", DesignKind::MetamaterialAbsorber),
        ("filter", DesignKind::FrequencySelectiveSurface),
        ("polarizer", DesignKind::WireGridPolarizer),
    ] {
        if functions.iter().any(|f| f == function) {
            return kind;
        }
    }

    DesignKind::SplitRingResonator
}
