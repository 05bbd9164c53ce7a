//! Turning field plans into AcroForm fields and widgets.

use std::collections::HashSet;

use lopdf::{Dictionary, Object, ObjectId, dictionary};
use pdfform_core::{
    CreatedField, FF_COMBO, FF_EDIT, FF_MULTILINE, FF_NO_TOGGLE_TO_OFF, FF_RADIO, FieldKind,
    FieldPlan, FieldPosition, FillOptions, FillWarning, FillWarningCode, checkbox_member_name,
    radio_on_state,
};
use tracing::{debug, warn};

use crate::acroform::{AcroFormLocation, ensure_acroform, existing_field_names, push_field};
use crate::appearance::{ButtonStyle, button_appearance};
use crate::backend::Materialized;
use crate::error::BackendError;
use crate::objects::{name_token, rect_object, text_string};

/// On state of a checkbox that carries no value.
const DEFAULT_ON_STATE: &str = "Yes";

/// Default appearance of button widgets: auto-sized ZapfDingbats.
const BUTTON_APPEARANCE: &str = "/ZaDb 0 Tf 0 g";

/// Widget annotation flag: print.
const ANNOT_PRINT: i64 = 4;

/// Creates fields for one document, tracking which names are taken.
struct Materializer<'a> {
    doc: &'a mut lopdf::Document,
    page_ids: &'a [ObjectId],
    options: &'a FillOptions,
    acroform: AcroFormLocation,
    taken: HashSet<String>,
    outcome: Materialized,
}

impl<'a> Materializer<'a> {
    fn new(
        doc: &'a mut lopdf::Document,
        page_ids: &'a [ObjectId],
        options: &'a FillOptions,
    ) -> Result<Self, BackendError> {
        let taken = existing_field_names(doc);
        let acroform = ensure_acroform(doc, &options.default_appearance)?;
        Ok(Self {
            doc,
            page_ids,
            options,
            acroform,
            taken,
            outcome: Materialized::default(),
        })
    }

    fn run(mut self, plans: Vec<FieldPlan>) -> Result<Materialized, BackendError> {
        for plan in plans {
            match plan {
                FieldPlan::Simple(pos) => self.simple(pos)?,
                FieldPlan::RadioGroup { name, members } => self.radio_group(name, members)?,
                FieldPlan::CheckboxGroup { name, members } => {
                    for member in members {
                        let value = member.value.clone().unwrap_or_default();
                        let field_name = checkbox_member_name(&name, &value);
                        let on_state = name_token(&value).unwrap_or_else(|| DEFAULT_ON_STATE.into());
                        self.checkbox(field_name, &member, &on_state)?;
                    }
                }
            }
        }
        Ok(self.outcome)
    }

    /// Reserve a field name, recording a warning when it is already in use.
    fn claim(&mut self, name: &str, page: usize) -> bool {
        if self.taken.insert(name.to_string()) {
            return true;
        }
        warn!(field = name, page, "field name already exists; skipping");
        self.outcome
            .warnings
            .push(FillWarning::name_collision(name, page));
        false
    }

    fn page_id(&mut self, pos: &FieldPosition) -> Option<ObjectId> {
        let id = self.page_ids.get(pos.page_index).copied();
        if id.is_none() {
            let mut warning = FillWarning::with_code(
                FillWarningCode::Other("PAGE_OUT_OF_RANGE".to_string()),
                format!(
                    "page {} out of range (0..{}) for field '{}'",
                    pos.page_index,
                    self.page_ids.len(),
                    pos.name
                ),
            );
            warning.page = Some(pos.page_index);
            warning.field = Some(pos.name.clone());
            self.outcome.warnings.push(warning);
        }
        id
    }

    /// Entries shared by every widget.
    fn widget_base(pos: &FieldPosition, page_id: ObjectId) -> Dictionary {
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Rect" => rect_object(&pos.rect),
            "P" => page_id,
            "F" => ANNOT_PRINT,
            "BS" => dictionary! { "W" => 0 },
        }
    }

    fn simple(&mut self, pos: FieldPosition) -> Result<(), BackendError> {
        if pos.kind == FieldKind::Checkbox {
            let name = pos.name.clone();
            return self.checkbox(name, &pos, DEFAULT_ON_STATE);
        }
        let Some(page_id) = self.page_id(&pos) else {
            return Ok(());
        };
        if !self.claim(&pos.name, pos.page_index) {
            return Ok(());
        }

        let mut dict = Self::widget_base(&pos, page_id);
        dict.set("FT", pos.kind.pdf_field_type());
        dict.set("T", text_string(&pos.name));
        dict.set(
            "DA",
            Object::string_literal(self.options.default_appearance.as_str()),
        );
        dict.set("MK", Dictionary::new());

        let mut flags = 0;
        match pos.kind {
            FieldKind::Textarea => flags |= FF_MULTILINE,
            FieldKind::Select => {
                flags |= FF_COMBO;
                match self.options.select_options.get(&pos.name) {
                    Some(choices) => {
                        let opt: Vec<Object> = choices.iter().map(|c| text_string(c)).collect();
                        dict.set("Opt", opt);
                    }
                    None => {
                        flags |= FF_EDIT;
                        dict.set("Opt", Vec::<Object>::new());
                        self.outcome
                            .warnings
                            .push(FillWarning::missing_select_options(&pos.name, pos.page_index));
                    }
                }
            }
            _ => {}
        }
        if flags != 0 {
            dict.set("Ff", i64::from(flags));
        }
        if let Some(value) = pos.value.as_deref().filter(|v| !v.is_empty()) {
            dict.set("V", text_string(value));
        }

        let field_id = self.doc.add_object(dict);
        attach_widget(self.doc, page_id, field_id)?;
        push_field(self.doc, self.acroform, field_id)?;
        self.created(&pos.name, pos.kind, vec![pos.page_index]);
        Ok(())
    }

    fn checkbox(
        &mut self,
        name: String,
        pos: &FieldPosition,
        on_state: &str,
    ) -> Result<(), BackendError> {
        let Some(page_id) = self.page_id(pos) else {
            return Ok(());
        };
        if !self.claim(&name, pos.page_index) {
            return Ok(());
        }

        let ap = button_appearance(
            self.doc,
            ButtonStyle::Check,
            on_state,
            pos.width(),
            pos.height(),
        );
        let mut dict = Self::widget_base(pos, page_id);
        dict.set("FT", "Btn");
        dict.set("T", text_string(&name));
        dict.set("V", "Off");
        dict.set("AS", "Off");
        dict.set("DA", Object::string_literal(BUTTON_APPEARANCE));
        dict.set("MK", dictionary! { "CA" => Object::string_literal("4") });
        dict.set("AP", ap);

        let field_id = self.doc.add_object(dict);
        attach_widget(self.doc, page_id, field_id)?;
        push_field(self.doc, self.acroform, field_id)?;
        self.created(&name, FieldKind::Checkbox, vec![pos.page_index]);
        Ok(())
    }

    fn radio_group(
        &mut self,
        name: String,
        members: Vec<FieldPosition>,
    ) -> Result<(), BackendError> {
        let Some(first_page) = members.first().map(|m| m.page_index) else {
            return Ok(());
        };
        if !self.claim(&name, first_page) {
            return Ok(());
        }

        let parent_id = self.doc.new_object_id();
        let mut kids = Vec::with_capacity(members.len());
        let mut pages = Vec::with_capacity(members.len());
        let mut states = HashSet::new();

        for (ordinal, member) in members.iter().enumerate() {
            let Some(page_id) = self.page_id(member) else {
                continue;
            };
            let state = radio_on_state(member, ordinal + 1);
            let token = name_token(&state).unwrap_or_else(|| format!("Choice{}", ordinal + 1));
            let on_state = unique_state(&mut states, token, ordinal + 1);
            let ap = button_appearance(
                self.doc,
                ButtonStyle::Dot,
                &on_state,
                member.width(),
                member.height(),
            );
            let mut widget = Self::widget_base(member, page_id);
            widget.set("Parent", parent_id);
            widget.set("AS", "Off");
            widget.set("MK", dictionary! { "CA" => Object::string_literal("l") });
            widget.set("AP", ap);

            let widget_id = self.doc.add_object(widget);
            attach_widget(self.doc, page_id, widget_id)?;
            kids.push(Object::Reference(widget_id));
            pages.push(member.page_index);
        }

        if kids.is_empty() {
            return Ok(());
        }

        self.doc.objects.insert(
            parent_id,
            Object::Dictionary(dictionary! {
                "FT" => "Btn",
                "T" => text_string(&name),
                "Ff" => i64::from(FF_RADIO | FF_NO_TOGGLE_TO_OFF),
                "V" => "Off",
                "DA" => Object::string_literal(BUTTON_APPEARANCE),
                "Kids" => kids,
            }),
        );
        push_field(self.doc, self.acroform, parent_id)?;
        self.created(&name, FieldKind::Radio, pages);
        Ok(())
    }

    fn created(&mut self, name: &str, kind: FieldKind, page_indices: Vec<usize>) {
        self.outcome.fields.push(CreatedField {
            name: name.to_string(),
            kind,
            page_indices,
        });
    }
}

/// Claim an on-state name within a radio group. Kids sharing a state
/// would switch on together, so a taken name gets the ordinal appended.
fn unique_state(states: &mut HashSet<String>, token: String, ordinal: usize) -> String {
    let mut candidate = token.clone();
    let mut suffix = ordinal;
    while states.contains(&candidate) {
        candidate = format!("{token}_{suffix}");
        suffix += 1;
    }
    states.insert(candidate.clone());
    candidate
}

/// Append a widget reference to its page's `/Annots`.
fn attach_widget(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    widget_id: ObjectId,
) -> Result<(), BackendError> {
    let annots_ref = match doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map(|p| p.get(b"Annots"))
    {
        Ok(Ok(Object::Reference(id))) => Some(*id),
        Ok(_) => None,
        Err(e) => return Err(BackendError::Structure(format!("failed to get page dictionary: {e}"))),
    };
    if let Some(array_id) = annots_ref {
        if let Ok(array) = doc.get_object_mut(array_id).and_then(Object::as_array_mut) {
            array.push(Object::Reference(widget_id));
            return Ok(());
        }
    }

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| BackendError::Structure(format!("failed to get page dictionary: {e}")))?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(array)) => array.push(Object::Reference(widget_id)),
        _ => page.set("Annots", vec![Object::Reference(widget_id)]),
    }
    Ok(())
}

/// Create fields and widgets for `plans`.
pub(crate) fn materialize(
    doc: &mut lopdf::Document,
    page_ids: &[ObjectId],
    plans: Vec<FieldPlan>,
    options: &FillOptions,
) -> Result<Materialized, BackendError> {
    let plan_count = plans.len();
    let outcome = Materializer::new(doc, page_ids, options)?.run(plans)?;
    debug!(
        plans = plan_count,
        fields = outcome.fields.len(),
        warnings = outcome.warnings.len(),
        "materialized form fields"
    );
    Ok(outcome)
}
