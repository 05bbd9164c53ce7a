//! lopdf-based form backend.
//!
//! Implements [`FormBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. This is the default backend for pdfform-rs.

use pdfform_core::{AcroField, FieldPlan, FieldPosition, FillOptions, MarkerFormat, PdfError};

use crate::backend::{FormBackend, Materialized};
use crate::error::BackendError;
use crate::{acroform, appearance, extraction, materialize};

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Page object ids in page order.
    pub fn page_ids(&self) -> &[lopdf::ObjectId] {
        &self.page_ids
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based form backend.
///
/// # Example
///
/// ```ignore
/// use pdfform_backend::{FormBackend, LopdfBackend};
///
/// let mut doc = LopdfBackend::open(pdf_bytes)?;
/// let markers = LopdfBackend::extract_markers(&mut doc, &MarkerFormat::default())?;
/// ```
pub struct LopdfBackend;

impl FormBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Load(e.to_string()))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn scan_markers(
        doc: &Self::Document,
        format: &MarkerFormat,
    ) -> Result<Vec<FieldPosition>, Self::Error> {
        extraction::scan_markers(&doc.inner, &doc.page_ids, format)
    }

    fn extract_markers(
        doc: &mut Self::Document,
        format: &MarkerFormat,
    ) -> Result<Vec<FieldPosition>, Self::Error> {
        extraction::extract_markers(&mut doc.inner, &doc.page_ids, format)
    }

    fn materialize(
        doc: &mut Self::Document,
        plans: Vec<FieldPlan>,
        options: &FillOptions,
    ) -> Result<Materialized, Self::Error> {
        materialize::materialize(&mut doc.inner, &doc.page_ids, plans, options)
    }

    fn normalize_appearances(doc: &mut Self::Document) -> Result<usize, Self::Error> {
        Ok(appearance::normalize_backgrounds(&mut doc.inner))
    }

    fn form_fields(doc: &Self::Document) -> Result<Vec<AcroField>, Self::Error> {
        Ok(acroform::document_form_fields(&doc.inner))
    }

    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error> {
        let mut buf = Vec::new();
        doc.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Save(e.to_string()))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AnnotsLayout, build_pdf, link_annot};
    use pdfform_core::classify;

    #[test]
    fn open_valid_multi_page_pdf() {
        let pdf = build_pdf(vec![vec![], vec![], vec![]], AnnotsLayout::IndirectEntries);
        let doc = LopdfBackend::open(&pdf).unwrap();
        assert_eq!(LopdfBackend::page_count(&doc), 3);
    }

    #[test]
    fn open_invalid_bytes_is_parse_error() {
        let err = LopdfBackend::open(b"not a pdf").unwrap_err();
        assert!(matches!(err, BackendError::Load(_)));
        let pdf_err: PdfError = err.into();
        assert!(matches!(pdf_err, PdfError::ParseError(_)));
    }

    #[test]
    fn open_empty_bytes_is_parse_error() {
        assert!(LopdfBackend::open(&[]).is_err());
    }

    #[test]
    fn debug_shows_page_count() {
        let pdf = build_pdf(vec![vec![]], AnnotsLayout::IndirectEntries);
        let doc = LopdfBackend::open(&pdf).unwrap();
        assert!(format!("{doc:?}").contains("page_count: 1"));
    }

    #[test]
    fn full_pipeline_survives_save_and_reload() {
        let pdf = build_pdf(
            vec![vec![link_annot("mark://f/name?type=text", [100, 700, 300, 720])]],
            AnnotsLayout::IndirectEntries,
        );
        let mut doc = LopdfBackend::open(&pdf).unwrap();
        let positions =
            LopdfBackend::extract_markers(&mut doc, &MarkerFormat::default()).unwrap();
        let outcome =
            LopdfBackend::materialize(&mut doc, classify(positions), &FillOptions::default())
                .unwrap();
        assert_eq!(outcome.fields.len(), 1);
        LopdfBackend::normalize_appearances(&mut doc).unwrap();
        let bytes = LopdfBackend::save(&mut doc).unwrap();

        let reopened = LopdfBackend::open(&bytes).unwrap();
        assert!(
            LopdfBackend::scan_markers(&reopened, &MarkerFormat::default())
                .unwrap()
                .is_empty()
        );
        let fields = LopdfBackend::form_fields(&reopened).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "name");
        let rect = fields[0].widgets[0].rect;
        assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (100.0, 700.0, 200.0, 20.0));
    }
}
