use std::path::Path;

use pdfform::{AcroField, PdfFieldType, WidgetPlacement};

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, open_pdf};

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let fields = pdf.fields().map_err(|e| {
        eprintln!("Error: failed to read form fields: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => write_text(&fields),
        OutputFormat::Json => write_json(&fields),
        OutputFormat::Csv => write_csv(&fields),
    }
    Ok(())
}

/// Short control name for a field: what a user would call it.
fn control(field: &AcroField) -> &'static str {
    match field.field_type {
        PdfFieldType::Text if field.is_multiline() => "textarea",
        PdfFieldType::Text => "text",
        PdfFieldType::Choice => "select",
        PdfFieldType::Button if field.is_radio() => "radio",
        PdfFieldType::Button if field.is_checkbox() => "checkbox",
        PdfFieldType::Button => "button",
        PdfFieldType::Signature => "signature",
    }
}

/// One row per widget.
fn rows(fields: &[AcroField]) -> impl Iterator<Item = (&AcroField, &WidgetPlacement)> {
    fields
        .iter()
        .flat_map(|f| f.widgets.iter().map(move |w| (f, w)))
}

fn page_label(widget: &WidgetPlacement) -> String {
    widget
        .page_index
        .map_or_else(String::new, |p| (p + 1).to_string())
}

fn write_text(fields: &[AcroField]) {
    println!("page\tname\ttype\tstate\tvalue\tx0\ty0\tx1\ty1");
    for (field, widget) in rows(fields) {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            page_label(widget),
            field.name,
            control(field),
            widget.on_state.as_deref().unwrap_or(""),
            field.value.as_deref().unwrap_or(""),
            widget.rect.x0,
            widget.rect.y0,
            widget.rect.x1,
            widget.rect.y1,
        );
    }
}

fn field_to_json(field: &AcroField) -> serde_json::Value {
    let widgets: Vec<serde_json::Value> = field
        .widgets
        .iter()
        .map(|w| {
            serde_json::json!({
                "page": w.page_index.map(|p| p + 1),
                "state": w.on_state,
                "x0": w.rect.x0,
                "y0": w.rect.y0,
                "x1": w.rect.x1,
                "y1": w.rect.y1,
            })
        })
        .collect();
    serde_json::json!({
        "name": field.name,
        "type": control(field),
        "field_type": field.field_type.as_pdf_name(),
        "value": field.value,
        "options": field.options,
        "flags": field.flags,
        "widgets": widgets,
    })
}

fn write_json(fields: &[AcroField]) {
    let all: Vec<serde_json::Value> = fields.iter().map(field_to_json).collect();
    println!("{}", serde_json::Value::Array(all));
}

fn write_csv(fields: &[AcroField]) {
    println!("page,name,type,state,value,x0,y0,x1,y1");
    for (field, widget) in rows(fields) {
        println!(
            "{},{},{},{},{},{:.2},{:.2},{:.2},{:.2}",
            page_label(widget),
            csv_escape(&field.name),
            control(field),
            csv_escape(widget.on_state.as_deref().unwrap_or("")),
            csv_escape(field.value.as_deref().unwrap_or("")),
            widget.rect.x0,
            widget.rect.y0,
            widget.rect.x1,
            widget.rect.y1,
        );
    }
}
