//! Form field kinds and decoded field positions.
//!
//! Provides [`FieldKind`] for the five HTML control kinds that can be turned
//! into AcroForm fields, and [`FieldPosition`] for a control's location in
//! the rendered PDF as recovered from its marker annotation.

use crate::PdfRect;

/// The kind of form control a marker stands for.
///
/// Serialized on the wire as the flat identifiers `text`, `textarea`,
/// `select`, `checkbox`, and `radio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Dropdown (combo box).
    Select,
    /// Checkbox.
    Checkbox,
    /// Radio button, one option of a group.
    Radio,
}

impl FieldKind {
    /// All kinds, in wire-identifier order.
    pub const ALL: [FieldKind; 5] = [
        Self::Text,
        Self::Textarea,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
    ];

    /// Parse a kind from its wire identifier.
    ///
    /// Returns `None` if the identifier is not recognized.
    pub fn from_wire(id: &str) -> Option<Self> {
        match id {
            "text" => Some(Self::Text),
            "textarea" => Some(Self::Textarea),
            "select" => Some(Self::Select),
            "checkbox" => Some(Self::Checkbox),
            "radio" => Some(Self::Radio),
            _ => None,
        }
    }

    /// Return the wire identifier for this kind.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }

    /// The PDF `/FT` field type name used for this kind.
    pub fn pdf_field_type(&self) -> &'static str {
        match self {
            Self::Text | Self::Textarea => "Tx",
            Self::Select => "Ch",
            Self::Checkbox | Self::Radio => "Btn",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A form control's position in the rendered PDF, decoded from a marker.
///
/// The rectangle and page are taken verbatim from the marker's Link
/// annotation, so they are already in final PDF coordinate space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldPosition {
    /// Field name. Not necessarily unique: radio and checkbox groups share it.
    pub name: String,
    /// The control kind.
    pub kind: FieldKind,
    /// Marker rectangle, PDF user space.
    pub rect: PdfRect,
    /// The 0-based page index the marker was found on.
    pub page_index: usize,
    /// Option value for checkbox and radio controls.
    pub value: Option<String>,
}

impl FieldPosition {
    /// Left edge of the field.
    pub fn x(&self) -> f64 {
        self.rect.x()
    }

    /// Bottom edge of the field.
    pub fn y(&self) -> f64 {
        self.rect.y()
    }

    /// Width of the field.
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height of the field.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }
}
