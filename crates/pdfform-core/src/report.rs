//! What a fill run did to a document.

use crate::{FieldKind, FillWarning};

/// A PDF field created from one or more markers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatedField {
    /// Fully qualified PDF field name.
    pub name: String,
    /// Kind of control the field was created for.
    pub kind: FieldKind,
    /// Page of each widget, in widget order.
    pub page_indices: Vec<usize>,
}

impl CreatedField {
    /// Number of widgets attached to the field.
    pub fn widget_count(&self) -> usize {
        self.page_indices.len()
    }
}

/// Summary of one fill run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillReport {
    /// Marker annotations found (and removed).
    pub markers_found: usize,
    /// Fields created, in creation order.
    pub fields: Vec<CreatedField>,
    /// Per-field issues that were absorbed.
    pub warnings: Vec<FillWarning>,
    /// `/BG` entries removed from widget appearance characteristics.
    pub backgrounds_cleared: usize,
    /// Whether the output differs from the input.
    pub changed: bool,
}

impl FillReport {
    /// Total number of widgets created.
    pub fn widget_count(&self) -> usize {
        self.fields.iter().map(CreatedField::widget_count).sum()
    }

    /// Returns true if no warnings were collected.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
