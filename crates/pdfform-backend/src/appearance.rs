//! Button appearance streams and widget background normalization.

use std::collections::HashSet;

use lopdf::{Object, ObjectId, Stream, dictionary};
use tracing::debug;

use crate::acroform::field_tree_ids;

/// Bezier control distance for a quarter circle of radius 1.
const CIRCLE_KAPPA: f64 = 0.5523;

/// Visual style of a button's on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Stroked check mark (checkboxes).
    Check,
    /// Filled dot (radio buttons).
    Dot,
}

/// Format a number for a content stream: at most three decimals, no
/// trailing zeros.
fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Content stream drawing the on state of a `width` x `height` button.
pub fn on_state_content(style: ButtonStyle, width: f64, height: f64) -> String {
    let size = width.min(height);
    match style {
        ButtonStyle::Check => {
            let line = (size * 0.1).max(0.5);
            format!(
                "q 0 G {} w 1 J 1 j {} {} m {} {} l {} {} l S Q",
                fmt_num(line),
                fmt_num(width * 0.2),
                fmt_num(height * 0.5),
                fmt_num(width * 0.42),
                fmt_num(height * 0.25),
                fmt_num(width * 0.8),
                fmt_num(height * 0.78),
            )
        }
        ButtonStyle::Dot => {
            let (cx, cy) = (width / 2.0, height / 2.0);
            let r = size * 0.3;
            let k = r * CIRCLE_KAPPA;
            let p = |x: f64, y: f64| format!("{} {}", fmt_num(x), fmt_num(y));
            format!(
                "q 0 g {} m {} {} {} c {} {} {} c {} {} {} c {} {} {} c f Q",
                p(cx + r, cy),
                p(cx + r, cy + k),
                p(cx + k, cy + r),
                p(cx, cy + r),
                p(cx - k, cy + r),
                p(cx - r, cy + k),
                p(cx - r, cy),
                p(cx - r, cy - k),
                p(cx - k, cy - r),
                p(cx, cy - r),
                p(cx + k, cy - r),
                p(cx + r, cy - k),
                p(cx + r, cy),
            )
        }
    }
}

fn form_xobject(doc: &mut lopdf::Document, width: f64, height: f64, content: String) -> ObjectId {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => vec![0.into(), 0.into(), Object::Real(width as _), Object::Real(height as _)],
        "Resources" => lopdf::Dictionary::new(),
    };
    doc.add_object(Stream::new(dict, content.into_bytes()))
}

/// Add the normal appearances of a button widget and return its `/AP`.
///
/// The result maps `on_state` to the drawn style and `Off` to an empty
/// form, so viewers can toggle the widget without regenerating anything.
pub(crate) fn button_appearance(
    doc: &mut lopdf::Document,
    style: ButtonStyle,
    on_state: &str,
    width: f64,
    height: f64,
) -> lopdf::Dictionary {
    let on = form_xobject(doc, width, height, on_state_content(style, width, height));
    let off = form_xobject(doc, width, height, String::new());
    dictionary! {
        "N" => dictionary! { on_state => on, "Off" => off },
    }
}

/// Remove `/BG` from the `/MK` of every node reachable from the form's
/// field tree. Returns the number of entries removed.
pub(crate) fn normalize_backgrounds(doc: &mut lopdf::Document) -> usize {
    let mut removed = 0;
    let mut shared_mk: Vec<ObjectId> = Vec::new();

    for id in field_tree_ids(doc) {
        let Ok(dict) = doc.get_object_mut(id).and_then(Object::as_dict_mut) else {
            continue;
        };
        match dict.get_mut(b"MK") {
            Ok(Object::Dictionary(mk)) => {
                if mk.remove(b"BG").is_some() {
                    removed += 1;
                }
            }
            Ok(Object::Reference(mk_id)) => shared_mk.push(*mk_id),
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    for mk_id in shared_mk {
        if !seen.insert(mk_id) {
            continue;
        }
        let Ok(mk) = doc.get_object_mut(mk_id).and_then(Object::as_dict_mut) else {
            continue;
        };
        if mk.remove(b"BG").is_some() {
            removed += 1;
        }
    }

    debug!(removed, "normalized widget backgrounds");
    removed
}
