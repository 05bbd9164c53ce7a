use std::path::Path;

use pdfform::annotate_html;

use crate::shared::{marker_format, require_file, write_file};

pub fn run(
    file: &Path,
    output: &Path,
    options_out: Option<&Path>,
    marker_prefix: Option<&str>,
) -> Result<(), i32> {
    require_file(file)?;
    let html = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    let annotated = annotate_html(&html, &marker_format(marker_prefix));
    write_file(output, &annotated.html)?;

    if let Some(path) = options_out {
        let json = serde_json::to_string_pretty(&annotated.select_options).map_err(|e| {
            eprintln!("Error: failed to serialize select options: {e}");
            1
        })?;
        write_file(path, json)?;
    }

    println!(
        "{} markers, {} select fields, wrote {}",
        annotated.marker_count,
        annotated.select_options.len(),
        output.display()
    );
    Ok(())
}
