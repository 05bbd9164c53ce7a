use std::collections::BTreeSet;
use std::path::Path;

use pdfform::FieldPosition;

use crate::cli::OutputFormat;
use crate::shared::{csv_escape, marker_format, open_pdf, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    marker_prefix: Option<&str>,
    format: &OutputFormat,
) -> Result<(), i32> {
    let pdf = open_pdf(file)?;
    let page_set: BTreeSet<usize> = resolve_pages(pages, pdf.page_count())?
        .into_iter()
        .collect();

    let markers: Vec<FieldPosition> = pdf
        .markers(&marker_format(marker_prefix))
        .map_err(|e| {
            eprintln!("Error: failed to read markers: {e}");
            1
        })?
        .into_iter()
        .filter(|m| page_set.contains(&m.page_index))
        .collect();

    match format {
        OutputFormat::Text => write_text(&markers),
        OutputFormat::Json => write_json(&markers),
        OutputFormat::Csv => write_csv(&markers),
    }
    Ok(())
}

fn write_text(markers: &[FieldPosition]) {
    println!("page\tname\ttype\tvalue\tx0\ty0\tx1\ty1");
    for m in markers {
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            m.page_index + 1,
            m.name,
            m.kind,
            m.value.as_deref().unwrap_or(""),
            m.rect.x0,
            m.rect.y0,
            m.rect.x1,
            m.rect.y1,
        );
    }
}

fn marker_to_json(m: &FieldPosition) -> serde_json::Value {
    serde_json::json!({
        "page": m.page_index + 1,
        "name": m.name,
        "type": m.kind.as_wire(),
        "value": m.value,
        "x0": m.rect.x0,
        "y0": m.rect.y0,
        "x1": m.rect.x1,
        "y1": m.rect.y1,
    })
}

fn write_json(markers: &[FieldPosition]) {
    let all: Vec<serde_json::Value> = markers.iter().map(marker_to_json).collect();
    println!("{}", serde_json::Value::Array(all));
}

fn write_csv(markers: &[FieldPosition]) {
    println!("page,name,type,value,x0,y0,x1,y1");
    for m in markers {
        println!(
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2}",
            m.page_index + 1,
            csv_escape(&m.name),
            m.kind,
            csv_escape(m.value.as_deref().unwrap_or("")),
            m.rect.x0,
            m.rect.y0,
            m.rect.x1,
            m.rect.y1,
        );
    }
}
