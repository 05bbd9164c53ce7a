//! The fill pipeline: rendered PDF bytes in, fillable PDF bytes out.

use pdfform_backend::{FormBackend, LopdfBackend};
use pdfform_core::{FillOptions, FillReport, PdfError, classify};
use tracing::debug;

/// A fillable PDF and what was done to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledPdf {
    /// The output document.
    pub bytes: Vec<u8>,
    /// Summary of the fill run.
    pub report: FillReport,
}

pub(crate) fn check_input_size(
    bytes: &[u8],
    max_input_bytes: Option<usize>,
) -> Result<(), PdfError> {
    if let Some(max_bytes) = max_input_bytes {
        if bytes.len() > max_bytes {
            return Err(PdfError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: max_bytes,
                actual_value: bytes.len(),
            });
        }
    }
    Ok(())
}

/// Replace the marker links of a rendered PDF with real form fields.
///
/// Every marker annotation is removed; every other annotation is kept as
/// it was. A document without markers comes back byte-for-byte unchanged
/// with `report.changed == false`.
///
/// # Errors
///
/// Returns [`PdfError::ResourceLimitExceeded`] if the input is larger than
/// `options.max_input_bytes`, [`PdfError::PasswordRequired`] for encrypted
/// input, and [`PdfError::ParseError`] if the bytes are not a valid PDF.
/// Per-field problems never fail the call; they are listed in
/// `report.warnings`.
pub fn make_fillable(bytes: &[u8], options: &FillOptions) -> Result<FilledPdf, PdfError> {
    check_input_size(bytes, options.max_input_bytes)?;

    let mut doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
    let positions =
        LopdfBackend::extract_markers(&mut doc, &options.marker).map_err(PdfError::from)?;

    if positions.is_empty() {
        debug!("no field markers found; returning input unchanged");
        return Ok(FilledPdf {
            bytes: bytes.to_vec(),
            report: FillReport::default(),
        });
    }

    let markers_found = positions.len();
    let outcome = LopdfBackend::materialize(&mut doc, classify(positions), options)
        .map_err(PdfError::from)?;
    let backgrounds_cleared = if outcome.fields.is_empty() {
        0
    } else {
        LopdfBackend::normalize_appearances(&mut doc).map_err(PdfError::from)?
    };
    let out = LopdfBackend::save(&mut doc).map_err(PdfError::from)?;

    let report = FillReport {
        markers_found,
        fields: outcome.fields,
        warnings: outcome.warnings,
        backgrounds_cleared,
        changed: true,
    };
    debug!(
        markers = report.markers_found,
        fields = report.fields.len(),
        widgets = report.widget_count(),
        warnings = report.warnings.len(),
        "made PDF fillable"
    );
    Ok(FilledPdf { bytes: out, report })
}

/// Read a PDF from disk and make it fillable.
///
/// This is a convenience wrapper around [`make_fillable`] that reads the
/// file into memory first.
///
/// # Errors
///
/// Returns [`PdfError::IoError`] if the file cannot be read, otherwise the
/// errors of [`make_fillable`].
pub fn make_fillable_file(
    path: impl AsRef<std::path::Path>,
    options: &FillOptions,
) -> Result<FilledPdf, PdfError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| PdfError::IoError(e.to_string()))?;
    make_fillable(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_check_passes_without_limit() {
        assert!(check_input_size(&[0; 10], None).is_ok());
    }

    #[test]
    fn size_check_rejects_large_input() {
        let err = check_input_size(&[0; 10], Some(4)).unwrap_err();
        assert_eq!(
            err,
            PdfError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: 4,
                actual_value: 10,
            }
        );
    }

    #[test]
    fn size_check_allows_exact_limit() {
        assert!(check_input_size(&[0; 10], Some(10)).is_ok());
    }

    #[test]
    fn limit_is_checked_before_parsing() {
        let options = FillOptions {
            max_input_bytes: Some(3),
            ..FillOptions::default()
        };
        let err = make_fillable(b"definitely not a pdf", &options).unwrap_err();
        assert!(matches!(err, PdfError::ResourceLimitExceeded { .. }));
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = make_fillable(b"definitely not a pdf", &FillOptions::default()).unwrap_err();
        assert!(matches!(err, PdfError::ParseError(_)));
    }
}
