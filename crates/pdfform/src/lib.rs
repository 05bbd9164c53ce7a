//! pdfform: Turn browser-rendered PDFs into fillable AcroForm documents.
//!
//! This is the public API facade crate for pdfform-rs. It re-exports types
//! from pdfform-core and drives pdfform-backend through the fill pipeline:
//! extract markers, classify, materialize, normalize, save.
//!
//! # Architecture
//!
//! - **pdfform-core**: Backend-independent data types, marker format, HTML annotation
//! - **pdfform-backend**: PDF object-graph work via lopdf
//! - **pdfform** (this crate): Public API that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use pdfform::{FillOptions, make_fillable};
//!
//! let filled = make_fillable(&pdf_bytes, &FillOptions::default())?;
//! std::fs::write("form.pdf", &filled.bytes)?;
//! ```

mod fill;
mod inspect;
mod render;

pub use fill::{FilledPdf, make_fillable, make_fillable_file};
pub use inspect::FormPdf;
pub use render::{RenderedPdf, Renderer, convert_html};

pub use pdfform_backend;
pub use pdfform_core;
pub use pdfform_core::{
    AcroField, AnnotatedHtml, CreatedField, DEFAULT_APPEARANCE, DEFAULT_MARKER_PREFIX, FF_COMBO,
    FF_EDIT, FF_MULTILINE, FF_NO_TOGGLE_TO_OFF, FF_PUSHBUTTON, FF_RADIO, FieldKind, FieldPlan,
    FieldPosition, FillOptions, FillReport, FillWarning, FillWarningCode, Marker,
    MarkerDecodeError, MarkerFormat, PdfError, PdfFieldType, PdfRect, SelectOptions,
    WidgetPlacement, annotate_html, classify, sanitize_field_name,
};
