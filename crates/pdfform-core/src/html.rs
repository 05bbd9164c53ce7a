//! Marker injection into generated HTML.
//!
//! Before a document goes to the renderer, every form control is wrapped in
//! a relatively positioned span together with an invisible anchor that
//! covers it. The anchor's `href` is a marker URL (see [`crate::marker`]),
//! so the renderer turns it into a Link annotation sitting exactly over the
//! control on the final page.
//!
//! While scanning, the choices of every `<select>` are collected as well:
//! they are the only part of a control the PDF side cannot recover.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{FieldKind, MarkerFormat, SelectOptions, sanitize_field_name};

/// CSS class on the wrapping span.
pub const FIELD_WRAPPER_CLASS: &str = "pdfform-field";

/// CSS class on the marker anchor.
pub const MARKER_CLASS: &str = "pdfform-marker";

const WRAPPER_STYLE: &str = "position:relative;display:inline-block";

const MARKER_STYLE: &str = "position:absolute;left:0;top:0;width:100%;height:100%;\
display:block;color:transparent;text-decoration:none;pointer-events:none";

// Locates control start tags in the source text; the parsed fragment
// supplies the attribute values.
static CONTROL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(input|textarea|select)\b(?:[^>"']|"[^"]*"|'[^']*')*>"#)
        .expect("control tag pattern is valid")
});

static TEXTAREA_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</textarea\s*>").expect("textarea end pattern is valid"));

static SELECT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</select\s*>").expect("select end pattern is valid"));

static CONTROL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input, textarea, select").expect("control selector is valid")
});

static OPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("option selector is valid"));

/// Result of [`annotate_html`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedHtml {
    /// The HTML with a marker next to every form control.
    pub html: String,
    /// Number of markers inserted.
    pub marker_count: usize,
    /// Choices of every `<select>`, keyed by (sanitized) field name.
    pub select_options: SelectOptions,
}

/// Insert a marker anchor for every form control in `html`.
///
/// Handles `<input>` (text-like, checkbox, radio), `<textarea>` and
/// `<select>`. Inputs of type hidden, submit, button, reset, image and file
/// have no fillable counterpart and are left untouched. Controls without a
/// `name` fall back to their `id`, then to `<kind>_<ordinal>`.
pub fn annotate_html(html: &str, format: &MarkerFormat) -> AnnotatedHtml {
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut select_options = SelectOptions::new();
    let mut marker_count = 0;
    let mut cursor = 0;

    while let Some(caps) = CONTROL_TAG.captures_at(html, cursor) {
        let Some(tag) = caps.get(0) else { break };
        let element_end = match caps[1].to_ascii_lowercase().as_str() {
            "textarea" => TEXTAREA_END
                .find_at(html, tag.end())
                .map_or(tag.end(), |m| m.end()),
            "select" => SELECT_END
                .find_at(html, tag.end())
                .map_or(tag.end(), |m| m.end()),
            _ => tag.end(),
        };

        let Some(control) = parse_control(&html[tag.start()..element_end]) else {
            out.push_str(&html[cursor..tag.end()]);
            cursor = tag.end();
            continue;
        };
        let kind = control.kind;

        let raw_name = control
            .name
            .unwrap_or_else(|| format!("{}_{}", kind, marker_count + 1));
        let name = sanitize_field_name(&raw_name);
        let value = control.value.as_deref();

        if kind == FieldKind::Select {
            select_options.entry(name.clone()).or_insert(control.options);
        }

        let href = format.encode(&name, kind, value);

        out.push_str(&html[cursor..tag.start()]);
        out.push_str(&format!(
            r#"<span class="{FIELD_WRAPPER_CLASS}" style="{WRAPPER_STYLE}">"#
        ));
        out.push_str(&html[tag.start()..element_end]);
        out.push_str(&format!(
            r#"<a class="{MARKER_CLASS}" href="{}" aria-hidden="true" tabindex="-1" style="{MARKER_STYLE}"></a></span>"#,
            escape_attribute(&href)
        ));
        marker_count += 1;
        cursor = element_end;
    }

    out.push_str(&html[cursor..]);

    AnnotatedHtml {
        html: out,
        marker_count,
        select_options,
    }
}

/// A form control as the HTML parser sees it.
struct Control {
    kind: FieldKind,
    /// `name`, falling back to `id`; blank values count as missing.
    name: Option<String>,
    /// `value` of a checkbox or radio button.
    value: Option<String>,
    /// Choices of a `<select>`.
    options: Vec<String>,
}

/// Parse the source of one control. Attribute values and option text come
/// back with character references resolved.
fn parse_control(source: &str) -> Option<Control> {
    let fragment = Html::parse_fragment(source);
    let element = fragment.select(&CONTROL_SELECTOR).next()?;
    let el = element.value();
    let kind = control_kind(el.name(), el.attr("type"))?;

    let name = el
        .attr("name")
        .or_else(|| el.attr("id"))
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string);
    let value = match kind {
        FieldKind::Checkbox | FieldKind::Radio => el
            .attr("value")
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        _ => None,
    };
    let options = match kind {
        FieldKind::Select => collect_options(element),
        _ => Vec::new(),
    };

    Some(Control {
        kind,
        name,
        value,
        options,
    })
}

/// Map a control tag to the field kind it becomes, if any.
fn control_kind(tag_name: &str, input_type: Option<&str>) -> Option<FieldKind> {
    match tag_name {
        "textarea" => Some(FieldKind::Textarea),
        "select" => Some(FieldKind::Select),
        "input" => {
            let input_type = input_type
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_default();
            match input_type.as_str() {
                "checkbox" => Some(FieldKind::Checkbox),
                "radio" => Some(FieldKind::Radio),
                "hidden" | "submit" | "button" | "reset" | "image" | "file" => None,
                _ => Some(FieldKind::Text),
            }
        }
        _ => None,
    }
}

/// Collect `<option>` choices: the `value` attribute if present, the text
/// content otherwise.
fn collect_options(select: ElementRef<'_>) -> Vec<String> {
    select
        .select(&OPTION_SELECTOR)
        .map(|option| match option.value().attr("value") {
            Some(value) => value.to_string(),
            None => option.text().collect::<String>().trim().to_string(),
        })
        .collect()
}

/// Escape text for use inside a double-quoted attribute value.
fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
