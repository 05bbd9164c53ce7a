//! The document's interactive form dictionary and field tree.
//!
//! Covers creating or reusing `/AcroForm`, registering new fields, and
//! walking `/Fields` (through `/Kids`) to list existing fields.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Object, ObjectId, dictionary};
use pdfform_core::{AcroField, PdfFieldType, WidgetPlacement};

use crate::error::BackendError;
use crate::objects::{
    catalog_id, decode_pdf_string, name_from_dict, page_index_map, rect_from_dict, resolve_dict,
    resolve_object, string_from_dict,
};

/// Maximum field tree depth; guards against reference cycles.
const MAX_FIELD_DEPTH: usize = 64;

/// Where the `/AcroForm` dictionary lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AcroFormLocation {
    /// A standalone object referenced from the catalog.
    Indirect(ObjectId),
    /// Inline in the catalog with the given id.
    InCatalog(ObjectId),
}

fn acroform_dict_mut(
    doc: &mut lopdf::Document,
    location: AcroFormLocation,
) -> Result<&mut Dictionary, BackendError> {
    match location {
        AcroFormLocation::Indirect(id) => doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| BackendError::Structure(format!("invalid /AcroForm object: {e}"))),
        AcroFormLocation::InCatalog(catalog) => doc
            .get_object_mut(catalog)
            .and_then(Object::as_dict_mut)
            .and_then(|c| c.get_mut(b"AcroForm"))
            .and_then(Object::as_dict_mut)
            .map_err(|e| BackendError::Structure(format!("invalid inline /AcroForm: {e}"))),
    }
}

/// Find the `/AcroForm` dictionary, creating it when absent, and fill in
/// the defaults new fields rely on.
///
/// Always sets `/NeedAppearances true`. Adds `/Fields`, `/DA` and a `/DR`
/// with `Helv` and `ZaDb` fonts only when they are missing.
pub(crate) fn ensure_acroform(
    doc: &mut lopdf::Document,
    default_appearance: &str,
) -> Result<AcroFormLocation, BackendError> {
    let catalog = catalog_id(doc)?;
    let existing = doc
        .get_object(catalog)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Structure(format!("invalid catalog: {e}")))?
        .get(b"AcroForm")
        .ok()
        .cloned();

    let location = match existing {
        Some(Object::Reference(id)) if doc.get_object(id).and_then(Object::as_dict).is_ok() => {
            AcroFormLocation::Indirect(id)
        }
        Some(Object::Dictionary(_)) => AcroFormLocation::InCatalog(catalog),
        _ => {
            let id = doc.add_object(dictionary! { "Fields" => Vec::<Object>::new() });
            doc.get_object_mut(catalog)
                .and_then(Object::as_dict_mut)
                .map_err(|e| BackendError::Structure(format!("invalid catalog: {e}")))?
                .set("AcroForm", id);
            AcroFormLocation::Indirect(id)
        }
    };

    let needs_resources = !acroform_dict_mut(doc, location)?.has(b"DR");
    let resources = if needs_resources {
        let helv = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let zadb = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "ZapfDingbats",
        });
        Some(dictionary! {
            "Font" => dictionary! { "Helv" => helv, "ZaDb" => zadb },
        })
    } else {
        None
    };

    let form = acroform_dict_mut(doc, location)?;
    form.set("NeedAppearances", true);
    if !form.has(b"Fields") {
        form.set("Fields", Vec::<Object>::new());
    }
    if !form.has(b"DA") {
        form.set("DA", Object::string_literal(default_appearance));
    }
    if let Some(resources) = resources {
        form.set("DR", resources);
    }
    Ok(location)
}

/// Append a field reference to `/AcroForm /Fields`.
pub(crate) fn push_field(
    doc: &mut lopdf::Document,
    location: AcroFormLocation,
    field_id: ObjectId,
) -> Result<(), BackendError> {
    let fields_ref = match acroform_dict_mut(doc, location)?.get(b"Fields") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };
    if let Some(array_id) = fields_ref {
        if let Ok(array) = doc.get_object_mut(array_id).and_then(Object::as_array_mut) {
            array.push(Object::Reference(field_id));
            return Ok(());
        }
    }
    let form = acroform_dict_mut(doc, location)?;
    match form.get_mut(b"Fields") {
        Ok(Object::Array(array)) => array.push(Object::Reference(field_id)),
        _ => form.set("Fields", vec![Object::Reference(field_id)]),
    }
    Ok(())
}

/// Top-level field references of the document, if it has a form.
fn top_level_fields(doc: &lopdf::Document) -> Vec<ObjectId> {
    let Ok(catalog) = catalog_id(doc).and_then(|id| {
        doc.get_object(id)
            .and_then(Object::as_dict)
            .map_err(|e| BackendError::Structure(e.to_string()))
    }) else {
        return Vec::new();
    };
    let Some(form) = catalog.get(b"AcroForm").ok().and_then(|f| resolve_dict(doc, f)) else {
        return Vec::new();
    };
    let Some(fields) = form
        .get(b"Fields")
        .ok()
        .and_then(|f| resolve_object(doc, f).as_array().ok())
    else {
        return Vec::new();
    };
    fields
        .iter()
        .filter_map(|f| f.as_reference().ok())
        .collect()
}

/// Every object id reachable from `/AcroForm /Fields` through `/Kids`:
/// fields, intermediate nodes, and widgets.
pub(crate) fn field_tree_ids(doc: &lopdf::Document) -> Vec<ObjectId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut stack: Vec<(ObjectId, usize)> =
        top_level_fields(doc).into_iter().rev().map(|id| (id, 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        if depth >= MAX_FIELD_DEPTH || !seen.insert(id) {
            continue;
        }
        let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) else {
            continue;
        };
        ids.push(id);
        if let Some(kids) = dict
            .get(b"Kids")
            .ok()
            .and_then(|k| resolve_object(doc, k).as_array().ok())
        {
            for kid in kids.iter().rev() {
                if let Ok(kid_id) = kid.as_reference() {
                    stack.push((kid_id, depth + 1));
                }
            }
        }
    }
    ids
}

/// Walks the field tree, collecting terminal fields and every qualified name.
struct FieldWalker<'a> {
    doc: &'a lopdf::Document,
    pages: HashMap<ObjectId, usize>,
    annot_pages: HashMap<ObjectId, usize>,
    names: Vec<String>,
    fields: Vec<AcroField>,
}

impl<'a> FieldWalker<'a> {
    fn new(doc: &'a lopdf::Document) -> Self {
        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        let mut annot_pages = HashMap::new();
        for (index, page_id) in page_ids.iter().enumerate() {
            let annots = doc
                .get_object(*page_id)
                .and_then(Object::as_dict)
                .ok()
                .and_then(|p| p.get(b"Annots").ok())
                .and_then(|a| resolve_object(doc, a).as_array().ok());
            for annot in annots.into_iter().flatten() {
                if let Ok(id) = annot.as_reference() {
                    annot_pages.entry(id).or_insert(index);
                }
            }
        }
        Self {
            doc,
            pages: page_index_map(&page_ids),
            annot_pages,
            names: Vec::new(),
            fields: Vec::new(),
        }
    }

    fn walk(mut self) -> Self {
        for id in top_level_fields(self.doc) {
            self.visit(id, None, None, 0, 0);
        }
        self
    }

    fn visit(
        &mut self,
        id: ObjectId,
        parent_name: Option<&str>,
        inherited_ft: Option<PdfFieldType>,
        inherited_flags: u32,
        depth: usize,
    ) {
        if depth >= MAX_FIELD_DEPTH {
            return;
        }
        let doc = self.doc;
        let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) else {
            return;
        };

        let partial = string_from_dict(doc, dict, b"T");
        let full_name = match (parent_name, &partial) {
            (Some(parent), Some(name)) => format!("{parent}.{name}"),
            (Some(parent), None) => parent.to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => String::new(),
        };
        if partial.is_some() {
            self.names.push(full_name.clone());
        }

        let field_type = name_from_dict(dict, b"FT")
            .and_then(|ft| PdfFieldType::from_pdf_name(&ft))
            .or(inherited_ft);
        let flags = match dict.get(b"Ff") {
            Ok(Object::Integer(n)) => *n as u32,
            _ => inherited_flags,
        };

        let kids: Vec<ObjectId> = dict
            .get(b"Kids")
            .ok()
            .and_then(|k| resolve_object(doc, k).as_array().ok())
            .map(|kids| kids.iter().filter_map(|k| k.as_reference().ok()).collect())
            .unwrap_or_default();

        let has_child_fields = kids.iter().any(|kid| {
            doc
                .get_object(*kid)
                .and_then(Object::as_dict)
                .is_ok_and(|d| d.has(b"T"))
        });
        if has_child_fields {
            for kid in kids {
                self.visit(kid, Some(&full_name), field_type, flags, depth + 1);
            }
            return;
        }

        let Some(field_type) = field_type else {
            return;
        };

        let widget_ids = if kids.is_empty() { vec![id] } else { kids };
        let widgets = widget_ids
            .into_iter()
            .filter_map(|wid| {
                let widget = doc.get_object(wid).and_then(Object::as_dict).ok()?;
                Some(self.placement(wid, widget))
            })
            .collect();

        self.fields.push(AcroField {
            name: full_name,
            field_type,
            value: field_value(doc, dict),
            options: field_options(doc, dict),
            flags,
            widgets,
        });
    }

    fn placement(&self, id: ObjectId, widget: &Dictionary) -> WidgetPlacement {
        let page_index = match widget.get(b"P") {
            Ok(Object::Reference(page)) => self.pages.get(page).copied(),
            _ => None,
        }
        .or_else(|| self.annot_pages.get(&id).copied());
        WidgetPlacement {
            rect: rect_from_dict(self.doc, widget).unwrap_or_default(),
            page_index,
            on_state: on_state(self.doc, widget),
        }
    }
}

/// The first non-`Off` state of a widget's normal appearance.
fn on_state(doc: &lopdf::Document, widget: &Dictionary) -> Option<String> {
    let ap = resolve_dict(doc, widget.get(b"AP").ok()?)?;
    let normal = resolve_dict(doc, ap.get(b"N").ok()?)?;
    normal
        .iter()
        .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
        .find(|key| key != "Off")
}

fn field_value(doc: &lopdf::Document, dict: &Dictionary) -> Option<String> {
    match resolve_object(doc, dict.get(b"V").ok()?) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn field_options(doc: &lopdf::Document, dict: &Dictionary) -> Vec<String> {
    let Some(opts) = dict
        .get(b"Opt")
        .ok()
        .and_then(|o| resolve_object(doc, o).as_array().ok())
    else {
        return Vec::new();
    };
    opts.iter()
        .filter_map(|item| match resolve_object(doc, item) {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            // [export display] pair: report the display value
            Object::Array(pair) => match pair.get(1) {
                Some(Object::String(bytes, _)) => Some(decode_pdf_string(bytes)),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Terminal fields of the document's form, in `/Fields` order.
pub(crate) fn document_form_fields(doc: &lopdf::Document) -> Vec<AcroField> {
    FieldWalker::new(doc).walk().fields
}

/// Every fully qualified field name in the document's form, including
/// intermediate nodes.
pub(crate) fn existing_field_names(doc: &lopdf::Document) -> HashSet<String> {
    FieldWalker::new(doc).walk().names.into_iter().collect()
}
