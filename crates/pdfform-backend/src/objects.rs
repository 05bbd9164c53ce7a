//! Small helpers for reading and writing lopdf objects.

use std::collections::HashMap;

use lopdf::{Dictionary, Object, ObjectId, StringFormat};
use pdfform_core::PdfRect;

use crate::error::BackendError;

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(*f as f64),
        _ => Err(BackendError::Structure(format!("expected number, got {obj:?}"))),
    }
}

/// Resolve a potentially indirect object reference.
pub(crate) fn resolve_object<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Resolve an object to a dictionary, following one level of indirection.
pub(crate) fn resolve_dict<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve_object(doc, obj).as_dict().ok()
}

/// Read a rectangle from a 4-number array, normalizing its corners.
pub(crate) fn rect_from_array(array: &[Object]) -> Result<PdfRect, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Structure(format!(
            "expected 4-element array for rect, got {}",
            array.len()
        )));
    }
    let ax = object_to_f64(&array[0])?;
    let ay = object_to_f64(&array[1])?;
    let bx = object_to_f64(&array[2])?;
    let by = object_to_f64(&array[3])?;
    Ok(PdfRect::from_corners(ax, ay, bx, by))
}

/// Read the `/Rect` entry of an annotation or widget dictionary.
pub(crate) fn rect_from_dict(doc: &lopdf::Document, dict: &Dictionary) -> Option<PdfRect> {
    let obj = resolve_object(doc, dict.get(b"Rect").ok()?);
    rect_from_array(obj.as_array().ok()?).ok()
}

/// Build a PDF number, preferring integers for integral values.
pub(crate) fn number(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as _)
    }
}

/// Build a `[x0 y0 x1 y1]` array.
pub(crate) fn rect_object(rect: &PdfRect) -> Object {
    Object::Array(rect.to_array().iter().map(|v| number(*v)).collect())
}

/// Decode a PDF text string, handling UTF-16 BE BOM and Latin-1.
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&chars)
    } else {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Encode a PDF text string: a literal for ASCII, UTF-16 BE with BOM
/// otherwise.
pub(crate) fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Extract a string value from a dictionary, handling both String and Name types.
pub(crate) fn string_from_dict(
    doc: &lopdf::Document,
    dict: &Dictionary,
    key: &[u8],
) -> Option<String> {
    match resolve_object(doc, dict.get(key).ok()?) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Read a name entry as a string.
pub(crate) fn name_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Reduce arbitrary text to a PDF name token usable as an appearance state.
///
/// Keeps ASCII letters, digits, `-`, `_` and `.`; everything else becomes
/// `_`. Returns `None` when no letter or digit survives.
pub(crate) fn name_token(text: &str) -> Option<String> {
    let token: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if token.chars().any(|c| c.is_ascii_alphanumeric()) {
        Some(token)
    } else {
        None
    }
}

/// Map page object ids to their 0-based index.
pub(crate) fn page_index_map(page_ids: &[ObjectId]) -> HashMap<ObjectId, usize> {
    page_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect()
}

/// Object id of the document catalog.
pub(crate) fn catalog_id(doc: &lopdf::Document) -> Result<ObjectId, BackendError> {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| BackendError::Structure(format!("missing /Root reference: {e}")))
}
