//! Marker URL wire format.
//!
//! A marker is an ordinary hyperlink whose target encodes a form field's
//! identity. The HTML side emits it next to each form control; the PDF side
//! recognizes the resulting Link annotation and reads the rectangle the
//! renderer gave it. [`MarkerFormat`] is the only contract between the two,
//! so both sides must be built from the same value.
//!
//! Wire shape:
//!
//! ```text
//! <prefix><percent-encoded name>?type=<kind>[&value=<form-encoded value>]
//! ```
//!
//! With the default prefix: `mark://f/email?type=text`,
//! `mark://f/ticket?type=radio&value=vip`.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::form_urlencoded;

use crate::FieldKind;

/// Default marker prefix. Never produced by real document content.
pub const DEFAULT_MARKER_PREFIX: &str = "mark://f/";

/// Characters escaped in the name path segment: everything except the
/// RFC 3986 unreserved set.
const NAME_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A decoded marker: the identity of one form control.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Field name (already sanitized by the encoder).
    pub name: String,
    /// Control kind.
    pub kind: FieldKind,
    /// Option value for checkbox and radio controls.
    pub value: Option<String>,
}

/// Why a URI did not decode as a marker.
///
/// None of these are fatal: the annotation carrying the URI is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerDecodeError {
    /// The URI does not start with the marker prefix.
    NotAMarker,
    /// The name segment is empty.
    EmptyName,
    /// The name segment is not valid percent-encoded UTF-8, or contains `/`.
    InvalidName,
    /// There is no `type` query parameter.
    MissingType,
    /// The `type` query parameter is not a known kind.
    UnknownType(String),
}

impl fmt::Display for MarkerDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerDecodeError::NotAMarker => write!(f, "URI does not carry the marker prefix"),
            MarkerDecodeError::EmptyName => write!(f, "marker has an empty field name"),
            MarkerDecodeError::InvalidName => write!(f, "marker field name is not valid UTF-8"),
            MarkerDecodeError::MissingType => write!(f, "marker has no type parameter"),
            MarkerDecodeError::UnknownType(t) => write!(f, "unknown marker type: {t}"),
        }
    }
}

impl std::error::Error for MarkerDecodeError {}

/// The marker URL format shared by the HTML encoder and the PDF extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerFormat {
    prefix: String,
}

impl Default for MarkerFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MARKER_PREFIX.to_string(),
        }
    }
}

impl MarkerFormat {
    /// Create a format with a custom prefix.
    ///
    /// A trailing `/` is appended when missing so the name always starts a
    /// fresh path segment.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// The reserved prefix every marker URL starts with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `uri` starts with the marker prefix.
    ///
    /// This is the cheap test that separates markers from real hyperlinks;
    /// it does not guarantee the rest decodes.
    pub fn is_marker(&self, uri: &str) -> bool {
        uri.starts_with(&self.prefix)
    }

    /// Encode a field identity into a marker URL.
    ///
    /// The name is sanitized with [`sanitize_field_name`] before encoding,
    /// so every control gets a marker even if its name is unusable as is.
    pub fn encode(&self, name: &str, kind: FieldKind, value: Option<&str>) -> String {
        let name = sanitize_field_name(name);
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("type", kind.as_wire());
        if let Some(value) = value {
            query.append_pair("value", value);
        }
        format!(
            "{}{}?{}",
            self.prefix,
            utf8_percent_encode(&name, NAME_SEGMENT),
            query.finish()
        )
    }

    /// Decode a marker URL back into a [`Marker`].
    pub fn decode(&self, uri: &str) -> Result<Marker, MarkerDecodeError> {
        let rest = uri
            .strip_prefix(self.prefix.as_str())
            .ok_or(MarkerDecodeError::NotAMarker)?;

        let (segment, query) = match rest.split_once('?') {
            Some((segment, query)) => (segment, query),
            None => (rest, ""),
        };
        // Fragments never appear in markers we emit; tolerate one anyway.
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        if segment.is_empty() {
            return Err(MarkerDecodeError::EmptyName);
        }
        if segment.contains('/') {
            return Err(MarkerDecodeError::InvalidName);
        }
        let name = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| MarkerDecodeError::InvalidName)?
            .into_owned();
        if name.trim().is_empty() {
            return Err(MarkerDecodeError::EmptyName);
        }

        let mut kind = None;
        let mut value = None;
        for (key, val) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "type" if kind.is_none() => kind = Some(val.into_owned()),
                "value" if value.is_none() => value = Some(val.into_owned()),
                _ => {}
            }
        }

        let kind = kind.ok_or(MarkerDecodeError::MissingType)?;
        let kind = FieldKind::from_wire(&kind).ok_or(MarkerDecodeError::UnknownType(kind))?;

        Ok(Marker {
            name,
            kind,
            value: value.filter(|v| !v.is_empty()),
        })
    }
}

/// Make a field name safe to use as a PDF field name.
///
/// Never returns an empty string: a control that fails to get a marker
/// could never be found again on the PDF side.
///
/// - surrounding whitespace is trimmed
/// - control characters become `_`
/// - `.` becomes `_` (PDF uses it to separate hierarchical name parts)
/// - an empty result becomes `field`
pub fn sanitize_field_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_control() || c == '.' { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "field".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_text_marker() {
        let format = MarkerFormat::default();
        assert_eq!(
            format.encode("name", FieldKind::Text, None),
            "mark://f/name?type=text"
        );
    }

    #[test]
    fn encode_radio_marker_with_value() {
        let format = MarkerFormat::default();
        assert_eq!(
            format.encode("ticket", FieldKind::Radio, Some("vip")),
            "mark://f/ticket?type=radio&value=vip"
        );
    }

    #[test]
    fn encode_percent_encodes_name() {
        let format = MarkerFormat::default();
        let uri = format.encode("first name/é", FieldKind::Text, None);
        assert_eq!(uri, "mark://f/first%20name%2F%C3%A9?type=text");
    }

    #[test]
    fn encode_sanitizes_empty_name() {
        let format = MarkerFormat::default();
        assert_eq!(
            format.encode("   ", FieldKind::Textarea, None),
            "mark://f/field?type=textarea"
        );
    }

    #[test]
    fn decode_text_marker() {
        let marker = MarkerFormat::default()
            .decode("mark://f/name?type=text")
            .unwrap();
        assert_eq!(
            marker,
            Marker {
                name: "name".to_string(),
                kind: FieldKind::Text,
                value: None,
            }
        );
    }

    #[test]
    fn decode_checkbox_marker_with_value() {
        let marker = MarkerFormat::default()
            .decode("mark://f/sessions?type=checkbox&value=keynotes")
            .unwrap();
        assert_eq!(marker.name, "sessions");
        assert_eq!(marker.kind, FieldKind::Checkbox);
        assert_eq!(marker.value.as_deref(), Some("keynotes"));
    }

    #[test]
    fn decode_accepts_reordered_query() {
        let marker = MarkerFormat::default()
            .decode("mark://f/ticket?value=vip&type=radio")
            .unwrap();
        assert_eq!(marker.kind, FieldKind::Radio);
        assert_eq!(marker.value.as_deref(), Some("vip"));
    }

    #[test]
    fn decode_empty_value_is_none() {
        let marker = MarkerFormat::default()
            .decode("mark://f/agree?type=checkbox&value=")
            .unwrap();
        assert!(marker.value.is_none());
    }

    #[test]
    fn round_trip_preserves_awkward_names_and_values() {
        let format = MarkerFormat::default();
        let uri = format.encode("Straße & Co+1", FieldKind::Radio, Some("a b+c&d"));
        let marker = format.decode(&uri).unwrap();
        assert_eq!(marker.name, "Straße & Co+1");
        assert_eq!(marker.value.as_deref(), Some("a b+c&d"));
    }

    #[test]
    fn decode_rejects_foreign_uri() {
        let err = MarkerFormat::default()
            .decode("https://example.com/name?type=text")
            .unwrap_err();
        assert_eq!(err, MarkerDecodeError::NotAMarker);
    }

    #[test]
    fn decode_rejects_missing_type() {
        let err = MarkerFormat::default().decode("mark://f/name").unwrap_err();
        assert_eq!(err, MarkerDecodeError::MissingType);
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let err = MarkerFormat::default()
            .decode("mark://f/name?type=button")
            .unwrap_err();
        assert_eq!(err, MarkerDecodeError::UnknownType("button".to_string()));
    }

    #[test]
    fn decode_rejects_empty_name() {
        let err = MarkerFormat::default()
            .decode("mark://f/?type=text")
            .unwrap_err();
        assert_eq!(err, MarkerDecodeError::EmptyName);
    }

    #[test]
    fn decode_rejects_nested_path() {
        let err = MarkerFormat::default()
            .decode("mark://f/a/b?type=text")
            .unwrap_err();
        assert_eq!(err, MarkerDecodeError::InvalidName);
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = MarkerFormat::default()
            .decode("mark://f/%FF%FE?type=text")
            .unwrap_err();
        assert_eq!(err, MarkerDecodeError::InvalidName);
    }

    #[test]
    fn custom_prefix_gets_trailing_slash() {
        let format = MarkerFormat::with_prefix("pdfform://field");
        assert_eq!(format.prefix(), "pdfform://field/");
        let uri = format.encode("email", FieldKind::Text, None);
        assert_eq!(uri, "pdfform://field/email?type=text");
        assert!(format.is_marker(&uri));
        assert!(!MarkerFormat::default().is_marker(&uri));
    }

    #[test]
    fn sanitize_replaces_dots_and_controls() {
        assert_eq!(sanitize_field_name("  user.email\t"), "user_email");
        assert_eq!(sanitize_field_name("a\u{0}b"), "a_b");
        assert_eq!(sanitize_field_name(""), "field");
        assert_eq!(sanitize_field_name("plain"), "plain");
    }
}
