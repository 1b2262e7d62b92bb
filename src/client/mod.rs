pub mod paper;
pub mod pdf;
pub mod semantic_scholar;

pub use paper::{Author, OpenAccessPdf, Paper, SearchResponse};
pub use pdf::PdfFetcher;
pub use semantic_scholar::SemanticScholarClient;
