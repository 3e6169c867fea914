//! External interfaces the engine consumes from its environment.
//!
//! The engine never opens or parses PDF files itself. Callers supply a
//! [`DocumentHandle`] (and through it, [`PageHandle`]s) backed by whatever
//! document engine they use, plus optionally an [`OcrEngine`]. Everything
//! the detection and generation algorithms need is expressed here.

use pdfstencil_core::{Color, Region, Result, Word};

/// Opaque identity of a form-field widget within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

/// An interactive form-field widget with its geometry and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    pub region: Region,
    /// Current field value, if the field holds one.
    pub value: Option<String>,
}

/// One run of glyphs within a structured text line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    /// Glyph-origin Y coordinate (the baseline), when the backend reports
    /// one.
    pub origin_y: Option<f64>,
    pub size: f64,
    pub font: String,
    /// Packed sRGB fill color.
    pub color: u32,
}

/// A structured text-layout line: its bounding region and ordered spans.
///
/// Implementations must only report text lines; image blocks are excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanLine {
    pub region: Region,
    pub spans: Vec<TextSpan>,
}

impl SpanLine {
    /// Space-joined span texts.
    pub fn joined_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// An encoded raster of a rendered page region.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Pixel width of the rendered image.
    pub width: u32,
    /// Pixel height of the rendered image.
    pub height: u32,
    /// Encoded image bytes (PNG by convention).
    pub data: Vec<u8>,
}

/// Read access to one page of a document.
pub trait PageHandle {
    /// Enumerate the page's form-field widgets.
    fn widgets(&self) -> Vec<Widget>;

    /// Extract structured text lines clipped to `clip`, text blocks only.
    fn text_lines(&self, clip: &Region) -> Result<Vec<SpanLine>>;

    /// Extract individual words clipped to `clip`.
    fn words(&self, clip: &Region) -> Result<Vec<Word>>;

    /// Rasterize `clip` at the given zoom factor.
    fn render_region(&self, clip: &Region, zoom: f64) -> Result<RasterImage>;

    /// Native text-width measurement, when the backend offers one.
    ///
    /// Returning `None` makes the engine fall back to its heuristic
    /// per-character width table.
    fn text_width(&self, text: &str, font: &str, size: f64) -> Option<f64>;
}

/// Options for persisting a mutated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Remove unreferenced objects.
    pub garbage_collect: bool,
    /// Compress content streams.
    pub compress_streams: bool,
    /// Clean and sanitize content streams.
    pub clean: bool,
}

impl SaveOptions {
    /// Full structural cleanup and compaction, used for generated output.
    pub fn compacted() -> Self {
        Self {
            garbage_collect: true,
            compress_streams: true,
            clean: true,
        }
    }
}

/// Read and mutate access to an open document.
///
/// One handle is mutated in place across all placeholders of a generation
/// request, then saved; the engine never touches a handle from two threads.
pub trait DocumentHandle {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Borrow a page for read operations. `None` when out of range.
    fn page(&self, index: usize) -> Option<&dyn PageHandle>;

    /// Remove a form-field widget.
    fn delete_widget(&mut self, page: usize, widget: WidgetId) -> Result<()>;

    /// Redact `region` on `page`, removing underlying content objects and
    /// filling with `fill`.
    ///
    /// Implementations that cannot redact should return an error; the
    /// engine falls back to an opaque filled rectangle.
    fn redact(&mut self, page: usize, region: &Region, fill: Color) -> Result<()>;

    /// Draw a filled rectangle with the given opacity.
    fn draw_rect(&mut self, page: usize, region: &Region, fill: Color, opacity: f64)
    -> Result<()>;

    /// Insert a run of glyphs with its left end at `origin` (x, baseline y).
    fn insert_text(
        &mut self,
        page: usize,
        origin: (f64, f64),
        text: &str,
        font: &str,
        size: f64,
        color: Color,
    ) -> Result<()>;

    /// Place decoded image bytes into `region`, preserving aspect ratio
    /// (scaled to fit, not stretched).
    fn insert_image(&mut self, page: usize, region: &Region, data: &[u8]) -> Result<()>;

    /// Persist the document.
    fn save(&mut self, options: &SaveOptions) -> Result<()>;
}

/// Layout hint passed to the OCR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrLayout {
    /// Treat the image as a single uniform block of text.
    SingleBlock,
}

/// An optional OCR engine.
///
/// Its absence is a valid configuration: the OCR detection strategy is
/// silently disabled rather than erroring.
pub trait OcrEngine {
    /// Recognize text in an image under the given layout hint.
    fn image_to_text(&self, image: &RasterImage, layout: OcrLayout) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_line_joins_with_spaces() {
        let line = SpanLine {
            region: Region::new(0.0, 0.0, 100.0, 12.0),
            spans: vec![
                TextSpan {
                    text: "Total:".to_string(),
                    origin_y: Some(10.0),
                    size: 10.0,
                    font: "helv".to_string(),
                    color: 0,
                },
                TextSpan {
                    text: "$12.50".to_string(),
                    origin_y: Some(10.0),
                    size: 10.0,
                    font: "helv".to_string(),
                    color: 0,
                },
            ],
        };
        assert_eq!(line.joined_text(), "Total: $12.50");
    }

    #[test]
    fn compacted_save_enables_everything() {
        let opts = SaveOptions::compacted();
        assert!(opts.garbage_collect && opts.compress_streams && opts.clean);
    }
}
