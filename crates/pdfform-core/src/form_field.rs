//! AcroForm field types as found in a finished document.
//!
//! Provides [`AcroField`] and [`PdfFieldType`] for describing interactive
//! fields read back from a PDF's `/AcroForm` tree, used to inspect the
//! output of materialization.

use crate::PdfRect;

/// Field flag: text field accepts multiple lines (bit 13).
pub const FF_MULTILINE: u32 = 1 << 12;
/// Field flag: button may not be toggled off once on (bit 15).
pub const FF_NO_TOGGLE_TO_OFF: u32 = 1 << 14;
/// Field flag: button is a radio button (bit 16).
pub const FF_RADIO: u32 = 1 << 15;
/// Field flag: button is a push button (bit 17).
pub const FF_PUSHBUTTON: u32 = 1 << 16;
/// Field flag: choice field is a combo box rather than a list (bit 18).
pub const FF_COMBO: u32 = 1 << 17;
/// Field flag: combo box accepts typed text (bit 19).
pub const FF_EDIT: u32 = 1 << 18;

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdfFieldType {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field (`/FT /Btn`): checkboxes, radio buttons, push buttons.
    Button,
    /// Choice field (`/FT /Ch`): dropdowns, list boxes.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl PdfFieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Return the PDF name string for this field type.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
        }
    }
}

impl std::fmt::Display for PdfFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Button => write!(f, "Button"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

/// One on-page widget of a field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetPlacement {
    /// Widget rectangle from `/Rect`.
    pub rect: PdfRect,
    /// The 0-based page index, if the widget's page could be resolved.
    pub page_index: Option<usize>,
    /// Non-`Off` appearance state name, for buttons.
    pub on_state: Option<String>,
}

/// A terminal field of a document's AcroForm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcroField {
    /// Fully qualified name; hierarchical parts joined with `.`.
    pub name: String,
    /// Field type from `/FT` (possibly inherited).
    pub field_type: PdfFieldType,
    /// Current value from `/V`.
    pub value: Option<String>,
    /// Choices from `/Opt`.
    pub options: Vec<String>,
    /// Field flags from `/Ff`.
    pub flags: u32,
    /// Widgets of the field, in `/Kids` order (or the field itself).
    pub widgets: Vec<WidgetPlacement>,
}

impl AcroField {
    /// Whether the field is a radio button group.
    pub fn is_radio(&self) -> bool {
        self.field_type == PdfFieldType::Button && self.flags & FF_RADIO != 0
    }

    /// Whether the field is a checkbox.
    pub fn is_checkbox(&self) -> bool {
        self.field_type == PdfFieldType::Button && self.flags & (FF_RADIO | FF_PUSHBUTTON) == 0
    }

    /// Whether the field is a multi-line text field.
    pub fn is_multiline(&self) -> bool {
        self.field_type == PdfFieldType::Text && self.flags & FF_MULTILINE != 0
    }

    /// Whether the field is a combo box.
    pub fn is_combo(&self) -> bool {
        self.field_type == PdfFieldType::Choice && self.flags & FF_COMBO != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field_type: PdfFieldType, flags: u32) -> AcroField {
        AcroField {
            name: "f".to_string(),
            field_type,
            value: None,
            options: vec![],
            flags,
            widgets: vec![WidgetPlacement {
                rect: PdfRect::new(0.0, 0.0, 10.0, 10.0),
                page_index: Some(0),
                on_state: None,
            }],
        }
    }

    #[test]
    fn field_type_from_pdf_name() {
        assert_eq!(PdfFieldType::from_pdf_name("Tx"), Some(PdfFieldType::Text));
        assert_eq!(PdfFieldType::from_pdf_name("Btn"), Some(PdfFieldType::Button));
        assert_eq!(PdfFieldType::from_pdf_name("Ch"), Some(PdfFieldType::Choice));
        assert_eq!(PdfFieldType::from_pdf_name("Sig"), Some(PdfFieldType::Signature));
        assert_eq!(PdfFieldType::from_pdf_name("Unknown"), None);
    }

    #[test]
    fn field_type_as_pdf_name() {
        assert_eq!(PdfFieldType::Text.as_pdf_name(), "Tx");
        assert_eq!(PdfFieldType::Button.as_pdf_name(), "Btn");
        assert_eq!(PdfFieldType::Choice.as_pdf_name(), "Ch");
        assert_eq!(PdfFieldType::Signature.as_pdf_name(), "Sig");
    }

    #[test]
    fn field_type_display() {
        assert_eq!(format!("{}", PdfFieldType::Choice), "Choice");
    }

    #[test]
    fn radio_flags() {
        let radio = field(PdfFieldType::Button, FF_RADIO | FF_NO_TOGGLE_TO_OFF);
        assert!(radio.is_radio());
        assert!(!radio.is_checkbox());
        assert_eq!(FF_RADIO | FF_NO_TOGGLE_TO_OFF, 49152);
    }

    #[test]
    fn checkbox_has_no_button_flags() {
        let checkbox = field(PdfFieldType::Button, 0);
        assert!(checkbox.is_checkbox());
        assert!(!checkbox.is_radio());
        assert!(!field(PdfFieldType::Button, FF_PUSHBUTTON).is_checkbox());
    }

    #[test]
    fn multiline_and_combo_flags() {
        assert!(field(PdfFieldType::Text, FF_MULTILINE).is_multiline());
        assert!(!field(PdfFieldType::Text, 0).is_multiline());
        assert!(field(PdfFieldType::Choice, FF_COMBO).is_combo());
        assert!(!field(PdfFieldType::Choice, 0).is_combo());
        assert_eq!(FF_MULTILINE, 4096);
        assert_eq!(FF_COMBO, 131072);
        assert_eq!(FF_EDIT, 262144);
    }
}
