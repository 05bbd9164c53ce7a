//! Marker discovery and removal.
//!
//! Scans every page's `/Annots` for Link annotations whose `/URI` action
//! decodes as a marker. Removal goes through [`AnnotationArena`]: matches
//! are recorded by slot and dropped in one pass over the original entries,
//! so no index is ever computed against a partially edited array.

use lopdf::{Object, ObjectId};
use pdfform_core::{FieldPosition, MarkerFormat};
use tracing::{debug, trace};

use crate::error::BackendError;
use crate::objects::{rect_from_dict, resolve_dict, string_from_dict};

/// Stable handle to one entry of a page's original `/Annots` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotSlot(usize);

/// The entries of one `/Annots` array, with the ones marked for deletion.
#[derive(Debug, Clone, Default)]
pub struct AnnotationArena {
    entries: Vec<Object>,
    doomed: Vec<bool>,
}

impl AnnotationArena {
    /// Take ownership of an `/Annots` array's entries.
    pub fn new(entries: Vec<Object>) -> Self {
        let doomed = vec![false; entries.len()];
        Self { entries, doomed }
    }

    /// Iterate entries with their slot handles, in original order.
    pub fn slots(&self) -> impl Iterator<Item = (AnnotSlot, &Object)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (AnnotSlot(i), entry))
    }

    /// Mark an entry for removal. Marking twice is harmless.
    pub fn mark(&mut self, slot: AnnotSlot) {
        if let Some(flag) = self.doomed.get_mut(slot.0) {
            *flag = true;
        }
    }

    /// Number of entries marked for removal.
    pub fn marked_count(&self) -> usize {
        self.doomed.iter().filter(|d| **d).count()
    }

    /// Number of entries in the original array.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the original array was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into `(kept, removed)` entries, each in original order.
    pub fn into_remaining(self) -> (Vec<Object>, Vec<Object>) {
        let mut kept = Vec::with_capacity(self.entries.len());
        let mut removed = Vec::new();
        for (entry, doomed) in self.entries.into_iter().zip(self.doomed) {
            if doomed {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        (kept, removed)
    }
}

/// Where a page keeps its `/Annots` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnnotsLocation {
    Inline,
    Indirect(ObjectId),
}

/// Result of scanning one page.
struct PageScan {
    location: AnnotsLocation,
    arena: AnnotationArena,
    positions: Vec<FieldPosition>,
}

/// Scan one page's annotations, marking every decodable marker.
///
/// Returns `None` when the page has no usable `/Annots` array.
fn scan_page(
    doc: &lopdf::Document,
    page_id: ObjectId,
    page_index: usize,
    format: &MarkerFormat,
) -> Result<Option<PageScan>, BackendError> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Structure(format!("failed to get page dictionary: {e}")))?;

    let Ok(annots_obj) = page_dict.get(b"Annots") else {
        return Ok(None);
    };

    let (location, array) = match annots_obj {
        Object::Reference(id) => match doc.get_object(*id).and_then(Object::as_array) {
            Ok(array) => (AnnotsLocation::Indirect(*id), array),
            Err(_) => {
                trace!(page = page_index, "unresolvable /Annots reference; skipped");
                return Ok(None);
            }
        },
        Object::Array(array) => (AnnotsLocation::Inline, array),
        _ => {
            trace!(page = page_index, "/Annots is not an array; skipped");
            return Ok(None);
        }
    };

    let mut arena = AnnotationArena::new(array.clone());
    let mut positions = Vec::new();
    let mut matched = Vec::new();

    for (slot, entry) in arena.slots() {
        if let Some(pos) = decode_marker_annot(doc, entry, page_index, format) {
            matched.push(slot);
            positions.push(pos);
        }
    }
    for slot in matched {
        arena.mark(slot);
    }

    Ok(Some(PageScan {
        location,
        arena,
        positions,
    }))
}

/// Decode one `/Annots` entry as a marker, if it is one.
fn decode_marker_annot(
    doc: &lopdf::Document,
    entry: &Object,
    page_index: usize,
    format: &MarkerFormat,
) -> Option<FieldPosition> {
    let Some(annot) = resolve_dict(doc, entry) else {
        trace!(page = page_index, "non-dictionary annotation; skipped");
        return None;
    };
    match annot.get(b"Subtype") {
        Ok(Object::Name(name)) if name == b"Link" => {}
        _ => return None,
    }
    let action = resolve_dict(doc, annot.get(b"A").ok()?)?;
    match action.get(b"S") {
        Ok(Object::Name(name)) if name == b"URI" => {}
        _ => {
            trace!(page = page_index, "link without URI action; skipped");
            return None;
        }
    }
    let uri = string_from_dict(doc, action, b"URI")?;
    if !format.is_marker(&uri) {
        return None;
    }
    let marker = match format.decode(&uri) {
        Ok(marker) => marker,
        Err(err) => {
            trace!(page = page_index, %uri, %err, "malformed marker; skipped");
            return None;
        }
    };
    let Some(rect) = rect_from_dict(doc, annot) else {
        trace!(page = page_index, %uri, "marker without a usable /Rect; skipped");
        return None;
    };
    Some(FieldPosition {
        name: marker.name,
        kind: marker.kind,
        rect,
        page_index,
        value: marker.value,
    })
}

/// Decode every marker in the document without modifying it.
pub(crate) fn scan_markers(
    doc: &lopdf::Document,
    page_ids: &[ObjectId],
    format: &MarkerFormat,
) -> Result<Vec<FieldPosition>, BackendError> {
    let mut positions = Vec::new();
    for (page_index, page_id) in page_ids.iter().enumerate() {
        if let Some(scan) = scan_page(doc, *page_id, page_index, format)? {
            positions.extend(scan.positions);
        }
    }
    Ok(positions)
}

/// Decode every marker in the document and remove it from its page.
pub(crate) fn extract_markers(
    doc: &mut lopdf::Document,
    page_ids: &[ObjectId],
    format: &MarkerFormat,
) -> Result<Vec<FieldPosition>, BackendError> {
    let mut positions = Vec::new();
    let mut pages_touched = 0;

    for (page_index, page_id) in page_ids.iter().enumerate() {
        let Some(scan) = scan_page(doc, *page_id, page_index, format)? else {
            continue;
        };
        if scan.arena.marked_count() == 0 {
            continue;
        }
        pages_touched += 1;
        positions.extend(scan.positions);

        let (kept, removed) = scan.arena.into_remaining();
        write_back_annots(doc, *page_id, scan.location, kept)?;
        for entry in removed {
            discard_annot_objects(doc, &entry);
        }
    }

    debug!(
        markers = positions.len(),
        pages = pages_touched,
        "extracted field markers"
    );
    Ok(positions)
}

/// Store the surviving entries of a page's `/Annots`.
fn write_back_annots(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    location: AnnotsLocation,
    kept: Vec<Object>,
) -> Result<(), BackendError> {
    match location {
        AnnotsLocation::Inline => {
            let page = doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| BackendError::Structure(format!("failed to get page dictionary: {e}")))?;
            if kept.is_empty() {
                page.remove(b"Annots");
            } else {
                page.set("Annots", kept);
            }
        }
        AnnotsLocation::Indirect(array_id) => {
            doc.objects.insert(array_id, Object::Array(kept));
        }
    }
    Ok(())
}

/// Drop a removed marker's annotation and action objects from the object table.
fn discard_annot_objects(doc: &mut lopdf::Document, entry: &Object) {
    let Object::Reference(annot_id) = entry else {
        return;
    };
    let Some(removed) = doc.objects.remove(annot_id) else {
        return;
    };
    let action_id = match removed.as_dict().map(|d| d.get(b"A")) {
        Ok(Ok(Object::Reference(id))) => *id,
        _ => return,
    };
    doc.objects.remove(&action_id);
}
