//! Serde models for the Semantic Scholar Graph API

use serde::{Deserialize, Serialize};

/// One search hit from `/graph/v1/paper/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paper {
    pub paper_id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub year: Option<i32>,
    pub authors: Vec<Author>,
    pub venue: Option<String>,
    pub citation_count: Option<u64>,
    pub fields_of_study: Option<Vec<String>>,
    pub url: Option<String>,
    pub open_access_pdf: Option<OpenAccessPdf>,
}

impl Paper {
    /// Lowercased title plus abstract, the text the extractors mine
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.abstract_text.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }

    /// Paper id, or `"unknown"` when the API omitted one
    pub fn id_or_unknown(&self) -> &str {
        self.paper_id.as_deref().unwrap_or("unknown")
    }

    /// Title, or `"Unknown Paper"` when absent
    pub fn title_or_unknown(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Paper")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub author_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenAccessPdf {
    pub url: Option<String>,
    pub status: Option<String>,
}

/// Top-level search response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub total: Option<u64>,
    pub offset: Option<u64>,
    #[serde(rename = "data")]
    pub papers: Vec<Paper>,
}
