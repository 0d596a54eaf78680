//! Seams for the upstream stages of the pipeline.
//!
//! Template filling is the last stage: something else extracts raw text
//! from a source document, and something else infers a structured
//! record from that text. Those stages live behind traits so the
//! compositor can be driven by any implementation (or a test double)
//! without knowing how the text or record was produced.

use crate::record::{RecordError, ResumeRecord};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("unsupported document format: .{extension}")]
    UnsupportedFormat { extension: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the raw text of a source document.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Infers a structured record from extracted text.
pub trait RecordInferrer {
    fn infer_record(&self, text: &str) -> Result<ResumeRecord, RecordError>;
}
