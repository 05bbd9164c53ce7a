//! Error and warning types for pdfform-rs.
//!
//! Provides [`PdfError`] for fatal errors that stop processing and
//! [`FillWarning`] for per-field issues that are absorbed so the rest of
//! the document can still be made fillable.

use std::fmt;

/// Fatal error types for PDF processing.
///
/// Only document-level failures are fatal; anything scoped to a single
/// annotation or field is skipped or reported as a [`FillWarning`].
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing data.
    IoError(String),
    /// Error serializing the modified document.
    WriteError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// The PDF is encrypted; fillable conversion needs an unencrypted input.
    PasswordRequired,
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::WriteError(msg) => write!(f, "write error: {msg}"),
            PdfError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

/// Machine-readable code for a non-fatal fill issue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum FillWarningCode {
    /// A field with the same name already exists; the new one was skipped.
    NameCollision,
    /// A select field had no entry in the options map; created without choices.
    MissingSelectOptions,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl FillWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            FillWarningCode::NameCollision => "NAME_COLLISION",
            FillWarningCode::MissingSelectOptions => "MISSING_SELECT_OPTIONS",
            FillWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for FillWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while materializing fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillWarning {
    /// Machine-readable warning code.
    pub code: FillWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page the affected widget sits on (0-indexed), if applicable.
    pub page: Option<usize>,
    /// Name of the affected field, if applicable.
    pub field: Option<String>,
}

impl FillWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: FillWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            field: None,
        }
    }

    /// Warning for a field skipped because its name is taken.
    pub fn name_collision(field: impl Into<String>, page: usize) -> Self {
        let field = field.into();
        Self {
            code: FillWarningCode::NameCollision,
            description: format!("field '{field}' already exists; skipped"),
            page: Some(page),
            field: Some(field),
        }
    }

    /// Warning for a select field created without choices.
    pub fn missing_select_options(field: impl Into<String>, page: usize) -> Self {
        let field = field.into();
        Self {
            code: FillWarningCode::MissingSelectOptions,
            description: format!("no options supplied for select field '{field}'"),
            page: Some(page),
            field: Some(field),
        }
    }
}

impl fmt::Display for FillWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_error_parse_error_display() {
        let err = PdfError::ParseError("invalid xref".to_string());
        assert_eq!(err.to_string(), "parse error: invalid xref");
    }

    #[test]
    fn pdf_error_write_error_display() {
        let err = PdfError::WriteError("disk full".to_string());
        assert_eq!(err.to_string(), "write error: disk full");
    }

    #[test]
    fn pdf_error_resource_limit_exceeded() {
        let err = PdfError::ResourceLimitExceeded {
            limit_name: "max_input_bytes".to_string(),
            limit_value: 1024,
            actual_value: 2048,
        };
        assert_eq!(
            err.to_string(),
            "resource limit exceeded: max_input_bytes (limit: 1024, actual: 2048)"
        );
    }

    #[test]
    fn pdf_error_password_required_display() {
        assert_eq!(
            PdfError::PasswordRequired.to_string(),
            "PDF is encrypted and requires a password"
        );
    }

    #[test]
    fn pdf_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PdfError = io_err.into();
        assert!(matches!(err, PdfError::IoError(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn pdf_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::Other("boom".to_string()));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn warning_code_tags() {
        assert_eq!(FillWarningCode::NameCollision.as_str(), "NAME_COLLISION");
        assert_eq!(
            FillWarningCode::MissingSelectOptions.as_str(),
            "MISSING_SELECT_OPTIONS"
        );
        assert_eq!(FillWarningCode::Other("x".to_string()).as_str(), "OTHER");
    }

    #[test]
    fn name_collision_warning_display() {
        let w = FillWarning::name_collision("email", 2);
        assert_eq!(w.code, FillWarningCode::NameCollision);
        assert_eq!(w.field.as_deref(), Some("email"));
        assert_eq!(
            w.to_string(),
            "[NAME_COLLISION] field 'email' already exists; skipped (page 2)"
        );
    }

    #[test]
    fn missing_select_options_warning() {
        let w = FillWarning::missing_select_options("country", 0);
        assert_eq!(w.code, FillWarningCode::MissingSelectOptions);
        assert_eq!(w.page, Some(0));
    }

    #[test]
    fn warning_with_code_has_no_context() {
        let w = FillWarning::with_code(FillWarningCode::Other("misc".to_string()), "misc");
        assert!(w.page.is_none());
        assert!(w.field.is_none());
        assert_eq!(w.to_string(), "[OTHER] misc");
    }
}
