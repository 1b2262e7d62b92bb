//! MetaFlux: a literature-to-CAD pipeline for printable metamaterials.
//!
//! The pipeline searches Semantic Scholar for metamaterial papers,
//! mines geometric and material parameters out of their titles and
//! abstracts, and turns the best candidates into parametric 3D solid
//! models exported as STL with JSON metadata sidecars.

pub mod analysis;
pub mod client;
pub mod config;
pub mod designs;
pub mod error;
pub mod export;
pub mod extract;
pub mod geom;
pub mod pipeline;

pub use analysis::{DesignKind, GeometryParams};
pub use client::{Paper, PdfFetcher, SemanticScholarClient};
pub use config::Config;
pub use error::{Error, ErrorCategory, Result};
pub use extract::EnrichedPaper;
pub use pipeline::Pipeline;
