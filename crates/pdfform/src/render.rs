//! HTML-to-fillable-PDF orchestration around an injected renderer.

use pdfform_core::{FillOptions, PdfError, SelectOptions, annotate_html};
use tracing::debug;

use crate::fill::{FilledPdf, make_fillable};

/// Output of a [`Renderer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPdf {
    /// The rendered, flat PDF.
    pub bytes: Vec<u8>,
    /// Select choices the renderer discovered on its own, if any.
    pub select_options: SelectOptions,
}

/// Something that prints HTML to PDF, typically a headless browser.
///
/// The renderer must turn `<a href>` elements into Link annotations with
/// URI actions covering the anchor's box; that is how field positions
/// survive printing. Its lifecycle belongs to the caller.
pub trait Renderer {
    /// Render `html` to PDF bytes.
    fn render(&self, html: &str) -> Result<RenderedPdf, PdfError>;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> Result<RenderedPdf, PdfError>,
{
    fn render(&self, html: &str) -> Result<RenderedPdf, PdfError> {
        self(html)
    }
}

/// Annotate `html`, render it, and make the result fillable.
///
/// Select choices come from three places. Entries in
/// `options.select_options` win over ones reported by the renderer, which
/// win over ones scraped from the HTML.
///
/// # Errors
///
/// Returns the renderer's error unchanged, otherwise the errors of
/// [`make_fillable`].
pub fn convert_html<R: Renderer + ?Sized>(
    renderer: &R,
    html: &str,
    options: &FillOptions,
) -> Result<FilledPdf, PdfError> {
    let annotated = annotate_html(html, &options.marker);
    debug!(markers = annotated.marker_count, "annotated HTML");

    let rendered = renderer.render(&annotated.html)?;

    let mut merged = options.clone();
    merged.merge_select_options(rendered.select_options);
    merged.merge_select_options(annotated.select_options);
    make_fillable(&rendered.bytes, &merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn renderer_sees_annotated_html() {
        let seen = RefCell::new(String::new());
        let renderer = |html: &str| -> Result<RenderedPdf, PdfError> {
            *seen.borrow_mut() = html.to_string();
            Err(PdfError::Other("render failed".to_string()))
        };
        let err = convert_html(
            &renderer,
            r#"<input type="text" name="email">"#,
            &FillOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, PdfError::Other("render failed".to_string()));
        assert!(seen.borrow().contains("mark://f/email?type=text"));
    }
}
