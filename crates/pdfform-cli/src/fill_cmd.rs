use std::path::Path;

use pdfform::{FillOptions, FillReport, make_fillable_file};

use crate::cli::ReportFormat;
use crate::shared::{marker_format, read_select_options, require_file, write_file};

pub fn run(
    file: &Path,
    output: &Path,
    options_file: Option<&Path>,
    marker_prefix: Option<&str>,
    max_input_bytes: Option<usize>,
    format: &ReportFormat,
) -> Result<(), i32> {
    require_file(file)?;

    let mut options = FillOptions {
        marker: marker_format(marker_prefix),
        max_input_bytes,
        ..FillOptions::default()
    };
    if let Some(path) = options_file {
        options.select_options = read_select_options(path)?;
    }

    let filled = make_fillable_file(file, &options).map_err(|e| {
        eprintln!("Error: failed to fill PDF: {e}");
        1
    })?;
    write_file(output, &filled.bytes)?;

    for warning in &filled.report.warnings {
        eprintln!("Warning: {warning}");
    }

    match format {
        ReportFormat::Text => write_text(&filled.report, output),
        ReportFormat::Json => write_json(&filled.report),
    }
}

fn write_text(report: &FillReport, output: &Path) -> Result<(), i32> {
    if !report.changed {
        println!("no field markers found; wrote {} unchanged", output.display());
        return Ok(());
    }
    println!(
        "{} markers -> {} fields ({} widgets), wrote {}",
        report.markers_found,
        report.fields.len(),
        report.widget_count(),
        output.display()
    );
    for field in &report.fields {
        let pages: Vec<String> = field.page_indices.iter().map(|p| (p + 1).to_string()).collect();
        println!("{}\t{}\tpages {}", field.name, field.kind, pages.join(","));
    }
    Ok(())
}

fn write_json(report: &FillReport) -> Result<(), i32> {
    let json = serde_json::to_string(report).map_err(|e| {
        eprintln!("Error: failed to serialize report: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}
