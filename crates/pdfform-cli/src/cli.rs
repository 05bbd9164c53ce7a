use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Turn browser-rendered PDFs into fillable forms.
#[derive(Debug, Parser)]
#[command(name = "pdfform", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replace field markers in a rendered PDF with AcroForm fields
    Fill {
        /// Path to the rendered PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the fillable PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// JSON file mapping select field names to their choices
        #[arg(long, value_name = "JSON")]
        options: Option<PathBuf>,

        /// Marker URL prefix (default: mark://f/)
        #[arg(long)]
        marker_prefix: Option<String>,

        /// Refuse inputs larger than this many bytes
        #[arg(long)]
        max_input_bytes: Option<usize>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// List field markers found in a PDF without modifying it
    Markers {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Marker URL prefix (default: mark://f/)
        #[arg(long)]
        marker_prefix: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inject field markers into an HTML document before rendering
    Annotate {
        /// Path to the HTML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the annotated HTML
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Write the select choices found in the HTML to this JSON file
        #[arg(long, value_name = "JSON")]
        options_out: Option<PathBuf>,

        /// Marker URL prefix (default: mark://f/)
        #[arg(long)]
        marker_prefix: Option<String>,
    },

    /// List the AcroForm fields of a PDF
    Fields {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated text
    Text,
    /// JSON array
    Json,
    /// Comma-separated values
    Csv,
}

/// Output format for the fill report.
#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// JSON object
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_fill_subcommand() {
        let cli = Cli::parse_from(["pdfform", "fill", "in.pdf", "-o", "out.pdf"]);
        match cli.command {
            Commands::Fill {
                ref file,
                ref output,
                ref options,
                ref marker_prefix,
                max_input_bytes,
                ref format,
            } => {
                assert_eq!(file, &PathBuf::from("in.pdf"));
                assert_eq!(output, &PathBuf::from("out.pdf"));
                assert!(options.is_none());
                assert!(marker_prefix.is_none());
                assert!(max_input_bytes.is_none());
                assert!(matches!(format, ReportFormat::Text));
            }
            _ => panic!("expected Fill subcommand"),
        }
    }

    #[test]
    fn parse_fill_with_all_options() {
        let cli = Cli::parse_from([
            "pdfform",
            "fill",
            "in.pdf",
            "--output",
            "out.pdf",
            "--options",
            "choices.json",
            "--marker-prefix",
            "acme://field/",
            "--max-input-bytes",
            "1048576",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Fill {
                ref options,
                ref marker_prefix,
                max_input_bytes,
                ref format,
                ..
            } => {
                assert_eq!(options.as_deref(), Some(std::path::Path::new("choices.json")));
                assert_eq!(marker_prefix.as_deref(), Some("acme://field/"));
                assert_eq!(max_input_bytes, Some(1_048_576));
                assert!(matches!(format, ReportFormat::Json));
            }
            _ => panic!("expected Fill subcommand"),
        }
    }

    #[test]
    fn fill_requires_output() {
        assert!(Cli::try_parse_from(["pdfform", "fill", "in.pdf"]).is_err());
    }

    #[test]
    fn fill_rejects_csv_report() {
        let result =
            Cli::try_parse_from(["pdfform", "fill", "in.pdf", "-o", "o.pdf", "--format", "csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_markers_with_pages_and_format() {
        let cli = Cli::parse_from([
            "pdfform", "markers", "in.pdf", "--pages", "1,3-5", "--format", "csv",
        ]);
        match cli.command {
            Commands::Markers {
                ref pages,
                ref format,
                ..
            } => {
                assert_eq!(pages.as_deref(), Some("1,3-5"));
                assert!(matches!(format, OutputFormat::Csv));
            }
            _ => panic!("expected Markers subcommand"),
        }
    }

    #[test]
    fn parse_annotate_subcommand() {
        let cli = Cli::parse_from([
            "pdfform",
            "annotate",
            "form.html",
            "-o",
            "out.html",
            "--options-out",
            "choices.json",
        ]);
        match cli.command {
            Commands::Annotate {
                ref file,
                ref options_out,
                ..
            } => {
                assert_eq!(file, &PathBuf::from("form.html"));
                assert_eq!(
                    options_out.as_deref(),
                    Some(std::path::Path::new("choices.json"))
                );
            }
            _ => panic!("expected Annotate subcommand"),
        }
    }

    #[test]
    fn parse_fields_default_format() {
        let cli = Cli::parse_from(["pdfform", "fields", "out.pdf"]);
        match cli.command {
            Commands::Fields { ref format, .. } => {
                assert!(matches!(format, OutputFormat::Text));
            }
            _ => panic!("expected Fields subcommand"),
        }
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["pdfform"]).is_err());
    }

    #[test]
    fn invalid_format_is_error() {
        assert!(Cli::try_parse_from(["pdfform", "fields", "a.pdf", "--format", "xml"]).is_err());
    }
}
