//! pdfform-backend: PDF object-graph work for fillable PDF generation.
//!
//! This crate finds and removes marker annotations, creates AcroForm
//! fields and widgets from classified field plans, and normalizes widget
//! appearances. It depends on pdfform-core for shared data types and
//! exposes its operations through the [`FormBackend`] trait.

mod acroform;
pub mod appearance;
pub mod backend;
pub mod error;
pub mod extraction;
pub mod lopdf_backend;
mod materialize;
mod objects;

#[cfg(test)]
mod testing;

pub use appearance::{ButtonStyle, on_state_content};
pub use backend::{FormBackend, Materialized};
pub use error::BackendError;
pub use extraction::{AnnotSlot, AnnotationArena};
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
pub use pdfform_core;
