//! Shared test utilities: programmatic PDFs with Link annotations.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// A Link annotation with a `/URI` action.
pub fn link(uri: &str, rect: [i64; 4]) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(uri),
        },
    }
}

/// Build a document with one page per entry; annotations become indirect
/// objects referenced from each page's `/Annots`.
pub fn document_with_annots(pages: Vec<Vec<Dictionary>>) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id: ObjectId = doc.new_object_id();
    let page_count = pages.len();

    let mut kids: Vec<Object> = Vec::new();
    for annots in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        };
        if !annots.is_empty() {
            let refs: Vec<Object> = annots
                .into_iter()
                .map(|a| Object::Reference(doc.add_object(a)))
                .collect();
            page.set("Annots", refs);
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
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

pub fn save(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

pub fn pdf_with_annots(pages: Vec<Vec<Dictionary>>) -> Vec<u8> {
    save(&mut document_with_annots(pages))
}

/// Resolved annotation dictionaries of a page in an output PDF.
pub fn page_annots(bytes: &[u8], page_index: usize) -> Vec<Dictionary> {
    let doc = Document::load_mem(bytes).expect("output must parse");
    let page_id = doc.get_pages().values().copied().nth(page_index).expect("page");
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };
    let annots = match annots {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        other => other,
    };
    annots
        .as_array()
        .unwrap()
        .iter()
        .map(|a| match a {
            Object::Reference(id) => doc.get_object(*id).unwrap().as_dict().unwrap().clone(),
            other => other.as_dict().unwrap().clone(),
        })
        .collect()
}

pub fn subtype(annot: &Dictionary) -> String {
    match annot.get(b"Subtype") {
        Ok(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
        _ => String::new(),
    }
}

/// The `/URI` of a Link annotation with an inline action.
pub fn uri(annot: &Dictionary) -> Option<String> {
    let action = annot.get(b"A").ok()?.as_dict().ok()?;
    match action.get(b"URI").ok()? {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}
