//! Read-only view of a PDF's markers and form fields.

use pdfform_backend::{FormBackend, LopdfBackend, LopdfDocument};
use pdfform_core::{AcroField, FieldPosition, MarkerFormat, PdfError};

use crate::fill::check_input_size;

/// A PDF opened for inspection.
///
/// # Example
///
/// ```ignore
/// let pdf = FormPdf::open(&bytes, None)?;
/// for marker in pdf.markers(&MarkerFormat::default())? {
///     println!("{} on page {}", marker.name, marker.page_index);
/// }
/// ```
#[derive(Debug)]
pub struct FormPdf {
    doc: LopdfDocument,
}

impl FormPdf {
    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ResourceLimitExceeded`] if the input is larger
    /// than `max_input_bytes`, [`PdfError::PasswordRequired`] if the PDF is
    /// encrypted, and [`PdfError::ParseError`] if the bytes are not a valid
    /// PDF document.
    pub fn open(bytes: &[u8], max_input_bytes: Option<usize>) -> Result<Self, PdfError> {
        check_input_size(bytes, max_input_bytes)?;
        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
        Ok(Self { doc })
    }

    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be read or is not a valid PDF.
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        max_input_bytes: Option<usize>,
    ) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::IoError(e.to_string()))?;
        Self::open(&bytes, max_input_bytes)
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Decodable markers, in page then annotation order.
    pub fn markers(&self, format: &MarkerFormat) -> Result<Vec<FieldPosition>, PdfError> {
        LopdfBackend::scan_markers(&self.doc, format).map_err(PdfError::from)
    }

    /// Terminal fields of the document's AcroForm.
    pub fn fields(&self) -> Result<Vec<AcroField>, PdfError> {
        LopdfBackend::form_fields(&self.doc).map_err(PdfError::from)
    }
}
