//! Heuristic parameter mining from paper titles and abstracts

pub mod params;
pub mod score;

pub use params::{extract_params, Dimension, ExtractedParams};
pub use score::relevance_score;

use crate::client::Paper;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Manufacturing method labels recorded by the extractor
pub const FDM_PRINTING: &str = "FDM_3D_printing";
pub const GENERIC_3D_PRINTING: &str = "3D_printing";
pub const LITHOGRAPHY: &str = "lithography";
pub const ETCHING: &str = "etching";

/// A paper plus everything the miners pulled out of it.
/// This is the record persisted to `data/papers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPaper {
    #[serde(flatten)]
    pub paper: Paper,
    #[serde(default)]
    pub extracted_params: ExtractedParams,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
}

/// Run extraction and scoring over a raw search hit
pub fn enrich(paper: Paper) -> EnrichedPaper {
    let text = paper.combined_text();
    let extracted_params = extract_params(&text);
    let relevance_score = relevance_score(&extracted_params, &text);
    EnrichedPaper {
        paper,
        extracted_params,
        relevance_score,
        pdf_path: None,
    }
}
