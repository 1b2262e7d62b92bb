//! Open-access PDF retrieval for scanned papers

use super::paper::Paper;
use crate::export::sanitize_title;
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Downloads open-access PDFs next to the paper database.
/// Failures are logged and skipped; a missing PDF never fails a scan.
pub struct PdfFetcher {
    http: reqwest::Client,
}

impl PdfFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { http })
    }

    /// Best available PDF URL: the open-access link when present,
    /// otherwise a PDF link derived from an arXiv landing page
    pub fn pdf_url_for(paper: &Paper) -> Option<String> {
        if let Some(pdf) = paper.open_access_pdf.as_ref().and_then(|p| p.url.clone()) {
            return Some(pdf);
        }
        let url = paper.url.as_deref()?;
        if url.contains("arxiv.org") {
            let arxiv_id = url.rsplit('/').next()?;
            return Some(format!("https://arxiv.org/pdf/{arxiv_id}.pdf"));
        }
        None
    }

    /// Download the paper's PDF into `dir`, returning the local path
    /// when the file ends up on disk. Existing files are not re-fetched.
    pub async fn download(&self, paper: &Paper, dir: &Path) -> Option<PathBuf> {
        let pdf_url = Self::pdf_url_for(paper)?;
        let title = paper.title_or_unknown();
        let path = dir.join(format!("{}.pdf", sanitize_title(title)));

        if path.exists() {
            debug!("PDF already on disk: {}", path.display());
            return Some(path);
        }

        match self.fetch(&pdf_url, dir, &path).await {
            Ok(()) => {
                info!("Downloaded PDF: {}", path.display());
                Some(path)
            }
            Err(err) => {
                warn!("PDF download failed for '{title}': {err}");
                None
            }
        }
    }

    async fn fetch(&self, url: &str, dir: &Path, path: &Path) -> Result<()> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Api {
                status: status.as_u16(),
                message: format!("PDF fetch from {url} failed"),
            });
        }
        let bytes = response.bytes().await?;
        std::fs::create_dir_all(dir)?;
        std::fs::write(path, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::paper::OpenAccessPdf;

    #[test]
    fn prefers_open_access_url() {
        let paper = Paper {
            url: Some("https://arxiv.org/abs/2401.01234".to_string()),
            open_access_pdf: Some(OpenAccessPdf {
                url: Some("https://publisher.example/p.pdf".to_string()),
                status: None,
            }),
            ..Paper::default()
        };
        assert_eq!(
            PdfFetcher::pdf_url_for(&paper).as_deref(),
            Some("https://publisher.example/p.pdf")
        );
    }

    #[test]
    fn derives_arxiv_pdf_url() {
        let paper = Paper {
            url: Some("https://arxiv.org/abs/2401.01234".to_string()),
            ..Paper::default()
        };
        assert_eq!(
            PdfFetcher::pdf_url_for(&paper).as_deref(),
            Some("https://arxiv.org/pdf/2401.01234.pdf")
        );
    }

    #[test]
    fn no_url_means_no_pdf() {
        assert!(PdfFetcher::pdf_url_for(&Paper::default()).is_none());
    }
}
