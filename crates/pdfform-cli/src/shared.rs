use std::path::Path;

use pdfform::{FormPdf, MarkerFormat, SelectOptions};

use crate::page_range::parse_page_range;

/// Fail with a user-friendly message if `file` does not exist.
pub fn require_file(file: &Path) -> Result<(), i32> {
    if file.exists() {
        Ok(())
    } else {
        eprintln!("Error: file not found: {}", file.display());
        Err(1)
    }
}

/// Open a PDF file for inspection with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<FormPdf, i32> {
    require_file(file)?;
    FormPdf::open_file(file, None).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages (0..page_count).
/// If `pages` is `Some`, parses the range string and validates against page_count.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Marker format from an optional `--marker-prefix`.
pub fn marker_format(prefix: Option<&str>) -> MarkerFormat {
    match prefix {
        Some(prefix) => MarkerFormat::with_prefix(prefix),
        None => MarkerFormat::default(),
    }
}

/// Read a `{ "field": ["choice", ...] }` JSON file.
pub fn read_select_options(path: &Path) -> Result<SelectOptions, i32> {
    require_file(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", path.display());
        1
    })?;
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid options file {}: {e}", path.display());
        1
    })
}

/// Write bytes to `path`, reporting failures on stderr.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), i32> {
    std::fs::write(path, contents).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", path.display());
        1
    })
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
