//! Semantic Scholar Graph API client

use super::paper::{Paper, SearchResponse};
use crate::config::SearchConfig;
use crate::{Error, Result};
use chrono::Datelike;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;
use tracing::{debug, info, warn};
use url::Url;

/// Field list requested with every search, mirrored into the
/// [`Paper`] model
const SEARCH_FIELDS: &str =
    "paperId,title,abstract,year,authors,venue,citationCount,fieldsOfStudy,url,openAccessPdf";

/// HTTP client for paper search
pub struct SemanticScholarClient {
    http: reqwest::Client,
    base_url: Url,
    max_retries: usize,
}

impl SemanticScholarClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::InvalidInput {
            field: "search.base_url".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http,
            base_url,
            max_retries: config.max_retries as usize,
        })
    }

    /// Build the search URL for `query` over the last `years` years
    fn search_url(&self, query: &str, years: u32, limit: u32) -> Result<Url> {
        let current_year = chrono::Utc::now().year();
        let start_year = current_year - years as i32;

        let mut url = self
            .base_url
            .join("/graph/v1/paper/search")
            .map_err(|e| Error::InvalidInput {
                field: "search.base_url".to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("year", &format!("{start_year}-{current_year}"))
            .append_pair("limit", &limit.to_string())
            .append_pair("fields", SEARCH_FIELDS);
        Ok(url)
    }

    /// Search for papers, retrying transient failures with
    /// exponential backoff
    pub async fn search(&self, query: &str, years: u32, limit: u32) -> Result<Vec<Paper>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "query".to_string(),
                reason: "query cannot be empty".to_string(),
            });
        }

        let url = self.search_url(query, years, limit)?;
        info!("Searching papers: query='{query}', window={years}y, limit={limit}");
        debug!("Search URL: {url}");

        let retry_strategy = ExponentialBackoff::from_millis(500)
            .max_delay(Duration::from_secs(10))
            .take(self.max_retries);

        let papers = RetryIf::spawn(
            retry_strategy,
            || self.search_once(url.clone()),
            |err: &Error| {
                let retry = err.is_retryable();
                if retry {
                    warn!("Search attempt failed, retrying: {err}");
                }
                retry
            },
        )
        .await?;

        info!("Search returned {} papers", papers.len());
        Ok(papers)
    }

    async fn search_once(&self, url: Url) -> Result<Vec<Paper>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(
            "API reported {} total matches",
            body.total.unwrap_or(body.papers.len() as u64)
        );
        Ok(body.papers)
    }
}
