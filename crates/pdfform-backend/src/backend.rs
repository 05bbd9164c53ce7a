//! Form backend trait.
//!
//! Defines the [`FormBackend`] trait that abstracts the object-graph
//! operations of the fill pipeline, so the facade does not depend on a
//! particular PDF library.

use pdfform_core::{
    AcroField, CreatedField, FieldPlan, FieldPosition, FillOptions, FillWarning, MarkerFormat,
    PdfError,
};

/// Outcome of materializing a set of field plans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Materialized {
    /// Fields actually created, in creation order.
    pub fields: Vec<CreatedField>,
    /// Fields or widgets that were skipped, and why.
    pub warnings: Vec<FillWarning>,
}

/// Trait abstracting the object-graph side of the fill pipeline.
///
/// # Associated Types
///
/// - `Document`: The parsed, mutable PDF document.
/// - `Error`: Backend-specific error type, convertible to [`PdfError`].
///
/// # Usage
///
/// ```ignore
/// let mut doc = MyBackend::open(pdf_bytes)?;
/// let positions = MyBackend::extract_markers(&mut doc, &options.marker)?;
/// let outcome = MyBackend::materialize(&mut doc, classify(positions), &options)?;
/// MyBackend::normalize_appearances(&mut doc)?;
/// let bytes = MyBackend::save(&mut doc)?;
/// ```
pub trait FormBackend {
    /// The parsed PDF document type.
    type Document;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a valid PDF document
    /// or the document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Decode every marker annotation without modifying the document.
    fn scan_markers(
        doc: &Self::Document,
        format: &MarkerFormat,
    ) -> Result<Vec<FieldPosition>, Self::Error>;

    /// Decode every marker annotation and remove it from its page.
    ///
    /// Every other annotation is left exactly as it was.
    fn extract_markers(
        doc: &mut Self::Document,
        format: &MarkerFormat,
    ) -> Result<Vec<FieldPosition>, Self::Error>;

    /// Create AcroForm fields and widgets for the given plans.
    ///
    /// Per-field problems (name collisions, missing choices) are reported
    /// in [`Materialized::warnings`] and never abort the run.
    fn materialize(
        doc: &mut Self::Document,
        plans: Vec<FieldPlan>,
        options: &FillOptions,
    ) -> Result<Materialized, Self::Error>;

    /// Remove `/BG` from every widget's appearance characteristics.
    ///
    /// Returns the number of entries removed.
    fn normalize_appearances(doc: &mut Self::Document) -> Result<usize, Self::Error>;

    /// List the terminal fields of the document's AcroForm.
    fn form_fields(doc: &Self::Document) -> Result<Vec<AcroField>, Self::Error>;

    /// Serialize the document.
    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error>;
}
