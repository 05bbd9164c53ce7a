//! PDF builders shared by the unit tests of this crate.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::lopdf_backend::LopdfDocument;

/// How a test page stores its `/Annots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnnotsLayout {
    /// Direct array of references to annotation objects.
    IndirectEntries,
    /// Direct array of inline annotation dictionaries.
    InlineEntries,
    /// Reference to an array object holding annotation references.
    IndirectArray,
}

/// A Link annotation with a `/URI` action.
pub(crate) fn link_annot(uri: &str, rect: [i64; 4]) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        },
    }
}

/// Build a PDF with one page per entry of `pages`, each carrying the given
/// annotations.
pub(crate) fn build_pdf(pages: Vec<Vec<Dictionary>>, layout: AnnotsLayout) -> Vec<u8> {
    let mut doc = build_document(pages, layout);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

pub(crate) fn build_document(pages: Vec<Vec<Dictionary>>, layout: AnnotsLayout) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id: ObjectId = doc.new_object_id();
    let page_count = pages.len();

    let mut page_refs: Vec<Object> = Vec::new();
    for annots in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        if !annots.is_empty() {
            let entries: Vec<Object> = match layout {
                AnnotsLayout::InlineEntries => annots.into_iter().map(Object::Dictionary).collect(),
                _ => annots
                    .into_iter()
                    .map(|a| Object::Reference(doc.add_object(a)))
                    .collect(),
            };
            if layout == AnnotsLayout::IndirectArray {
                let array_id = doc.add_object(Object::Array(entries));
                page.set("Annots", array_id);
            } else {
                page.set("Annots", entries);
            }
        }
        page_refs.push(doc.add_object(page).into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_refs,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Annotation dictionaries currently on a page, resolved.
pub(crate) fn page_annots(doc: &LopdfDocument, page_index: usize) -> Vec<Dictionary> {
    let inner = doc.inner();
    let page = inner
        .get_object(doc.page_ids()[page_index])
        .and_then(Object::as_dict)
        .expect("page dict");
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };
    let annots = crate::objects::resolve_object(inner, annots)
        .as_array()
        .expect("annots array");
    annots
        .iter()
        .map(|a| {
            crate::objects::resolve_dict(inner, a)
                .expect("annotation dict")
                .clone()
        })
        .collect()
}
