//! pdfform-core: Backend-independent data types for fillable PDF generation.
//!
//! This crate provides the marker wire format shared by HTML generation and
//! PDF post-processing, the decoded [`FieldPosition`] records, the
//! [`FieldPlan`] classification that drives materialization, and the error
//! and option types used across pdfform-rs. It never touches a PDF object
//! graph itself.

pub mod error;
pub mod field;
pub mod form_field;
pub mod geometry;
pub mod html;
pub mod marker;
pub mod options;
pub mod plan;
pub mod report;

pub use error::{FillWarning, FillWarningCode, PdfError};
pub use field::{FieldKind, FieldPosition};
pub use form_field::{
    AcroField, FF_COMBO, FF_EDIT, FF_MULTILINE, FF_NO_TOGGLE_TO_OFF, FF_PUSHBUTTON, FF_RADIO,
    PdfFieldType, WidgetPlacement,
};
pub use geometry::PdfRect;
pub use html::{AnnotatedHtml, FIELD_WRAPPER_CLASS, MARKER_CLASS, annotate_html};
pub use marker::{
    DEFAULT_MARKER_PREFIX, Marker, MarkerDecodeError, MarkerFormat, sanitize_field_name,
};
pub use options::{DEFAULT_APPEARANCE, FillOptions, SelectOptions};
pub use plan::{FieldPlan, checkbox_member_name, classify, radio_on_state};
pub use report::{CreatedField, FillReport};
