//! Classification of decoded field positions into materialization plans.
//!
//! A field name means different things depending on the control kind: for
//! radios it names a group with one selectable value, for valued checkboxes
//! it names a set of independent checkboxes, and for everything else it
//! names a single field. [`classify`] resolves that once, up front, into a
//! [`FieldPlan`] per PDF field (or field family) to create.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::{FieldKind, FieldPosition};

/// One unit of materialization work.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPlan {
    /// A field backed by exactly one widget.
    Simple(FieldPosition),
    /// A radio group: one PDF field, one widget per member.
    RadioGroup {
        /// Shared group name.
        name: String,
        /// Options in document order (page, then annotation order).
        members: Vec<FieldPosition>,
    },
    /// A checkbox family sharing a name; each member is its own field.
    CheckboxGroup {
        /// Shared group name.
        name: String,
        /// Members in document order. Every member has a value.
        members: Vec<FieldPosition>,
    },
}

impl FieldPlan {
    /// The name the plan is keyed by.
    pub fn name(&self) -> &str {
        match self {
            FieldPlan::Simple(pos) => &pos.name,
            FieldPlan::RadioGroup { name, .. } | FieldPlan::CheckboxGroup { name, .. } => name,
        }
    }

    /// Number of widgets the plan will produce.
    pub fn widget_count(&self) -> usize {
        match self {
            FieldPlan::Simple(_) => 1,
            FieldPlan::RadioGroup { members, .. } | FieldPlan::CheckboxGroup { members, .. } => {
                members.len()
            }
        }
    }
}

/// Name of the independent field backing one checkbox-group member.
pub fn checkbox_member_name(group: &str, value: &str) -> String {
    format!("{group}_{value}")
}

/// On-state name for a radio option.
///
/// Uses the option's value; options without one get `Choice<ordinal>` so
/// every kid of a group still has a distinct on state.
pub fn radio_on_state(member: &FieldPosition, ordinal: usize) -> String {
    match member.value.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => format!("Choice{ordinal}"),
    }
}

/// Partition positions into simple fields, radio groups, and checkbox
/// groups.
///
/// Output order follows the first appearance of each plan in `positions`,
/// and members keep their input order, so the result is deterministic for a
/// given document.
pub fn classify(positions: Vec<FieldPosition>) -> Vec<FieldPlan> {
    enum Slot {
        Simple(FieldPosition),
        Radio(String),
        Checkbox(String),
    }

    let mut order: Vec<Slot> = Vec::new();
    let mut radios: HashMap<String, Vec<FieldPosition>> = HashMap::new();
    let mut checkboxes: HashMap<String, Vec<FieldPosition>> = HashMap::new();

    for pos in positions {
        let (groups, slot): (&mut HashMap<String, Vec<FieldPosition>>, fn(String) -> Slot) =
            match pos.kind {
                FieldKind::Radio => (&mut radios, Slot::Radio),
                FieldKind::Checkbox if pos.value.is_some() => (&mut checkboxes, Slot::Checkbox),
                _ => {
                    order.push(Slot::Simple(pos));
                    continue;
                }
            };

        match groups.entry(pos.name.clone()) {
            Entry::Occupied(mut members) => members.get_mut().push(pos),
            Entry::Vacant(entry) => {
                order.push(slot(pos.name.clone()));
                entry.insert(vec![pos]);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Simple(pos) => Some(FieldPlan::Simple(pos)),
            Slot::Radio(name) => radios
                .remove(&name)
                .map(|members| FieldPlan::RadioGroup { name, members }),
            Slot::Checkbox(name) => checkboxes
                .remove(&name)
                .map(|members| FieldPlan::CheckboxGroup { name, members }),
        })
        .collect()
}
