//! Errors raised while loading, rewriting, or saving a document.

use pdfform_core::PdfError;
use thiserror::Error;

/// A document-level failure.
///
/// Problems confined to one annotation or field never become a
/// `BackendError`: bad markers are skipped and field conflicts are reported
/// as warnings.
#[derive(Debug, Error)]
pub enum BackendError {
    /// lopdf could not load the input bytes.
    #[error("failed to load PDF: {0}")]
    Load(String),

    /// An object the rewrite depends on (catalog, page, `/Annots`,
    /// `/AcroForm`) is missing or has the wrong type.
    #[error("unexpected document structure: {0}")]
    Structure(String),

    /// The rewritten document could not be serialized.
    #[error("failed to save PDF: {0}")]
    Save(String),

    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Load(msg) | BackendError::Structure(msg) => PdfError::ParseError(msg),
            BackendError::Save(msg) => PdfError::WriteError(msg),
            BackendError::Core(e) => e,
        }
    }
}
