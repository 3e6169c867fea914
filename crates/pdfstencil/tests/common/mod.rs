//! Shared in-memory backend for engine integration tests.
//!
//! `FakeDocument` records every mutation as an [`Op`] so tests can assert
//! exactly what the engine did, and exposes failure toggles for the
//! degraded paths (redaction unsupported, widget deletion failing, broken
//! text layout extraction).

#![allow(dead_code)]

use pdfstencil::handles::{
    DocumentHandle, OcrEngine, OcrLayout, PageHandle, RasterImage, SaveOptions, SpanLine,
    TextSpan, Widget, WidgetId,
};
use pdfstencil_core::{Color, Region, Result, StencilError, Word};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    DeleteWidget {
        page: usize,
        widget: WidgetId,
    },
    Redact {
        page: usize,
        region: Region,
        fill: Color,
    },
    DrawRect {
        page: usize,
        region: Region,
        fill: Color,
        opacity: f64,
    },
    InsertText {
        page: usize,
        x: f64,
        baseline: f64,
        text: String,
        font: String,
        size: f64,
        color: Color,
    },
    InsertImage {
        page: usize,
        region: Region,
        byte_len: usize,
    },
    Save {
        options: SaveOptions,
    },
}

#[derive(Default)]
pub struct FakePage {
    pub widgets: Vec<Widget>,
    pub span_lines: Vec<SpanLine>,
    pub words: Vec<Word>,
    pub raster: Option<RasterImage>,
    /// When set, `text_lines` fails as a backend would on a broken layout
    /// tree.
    pub fail_text_lines: bool,
    /// Native text-width measurement, returned for every query when set.
    pub native_text_width: Option<f64>,
}

impl PageHandle for FakePage {
    fn widgets(&self) -> Vec<Widget> {
        self.widgets.clone()
    }

    fn text_lines(&self, clip: &Region) -> Result<Vec<SpanLine>> {
        if self.fail_text_lines {
            return Err(StencilError::Other("text layout unavailable".to_string()));
        }
        Ok(self
            .span_lines
            .iter()
            .filter(|l| l.region.intersects(clip))
            .cloned()
            .collect())
    }

    fn words(&self, clip: &Region) -> Result<Vec<Word>> {
        Ok(self
            .words
            .iter()
            .filter(|w| w.region.intersects(clip))
            .cloned()
            .collect())
    }

    fn render_region(&self, _clip: &Region, _zoom: f64) -> Result<RasterImage> {
        self.raster
            .clone()
            .ok_or_else(|| StencilError::Other("nothing to render".to_string()))
    }

    fn text_width(&self, _text: &str, _font: &str, _size: f64) -> Option<f64> {
        self.native_text_width
    }
}

#[derive(Default)]
pub struct FakeDocument {
    pub pages: Vec<FakePage>,
    pub ops: Vec<Op>,
    pub fail_redact: bool,
    pub fail_delete_widget: bool,
    /// When set, `insert_text` fails for lines with exactly this text.
    pub fail_insert_text_for: Option<String>,
}

impl FakeDocument {
    pub fn with_pages(count: usize) -> Self {
        Self {
            pages: (0..count).map(|_| FakePage::default()).collect(),
            ..Default::default()
        }
    }

    /// The subset of recorded ops matching a predicate.
    pub fn ops_where(&self, predicate: impl Fn(&Op) -> bool) -> Vec<&Op> {
        self.ops.iter().filter(|op| predicate(op)).collect()
    }

    pub fn inserted_texts(&self) -> Vec<&Op> {
        self.ops_where(|op| matches!(op, Op::InsertText { .. }))
    }
}

impl DocumentHandle for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&dyn PageHandle> {
        self.pages.get(index).map(|p| p as &dyn PageHandle)
    }

    fn delete_widget(&mut self, page: usize, widget: WidgetId) -> Result<()> {
        if self.fail_delete_widget {
            return Err(StencilError::Other("widget is locked".to_string()));
        }
        if let Some(p) = self.pages.get_mut(page) {
            p.widgets.retain(|w| w.id != widget);
        }
        self.ops.push(Op::DeleteWidget { page, widget });
        Ok(())
    }

    fn redact(&mut self, page: usize, region: &Region, fill: Color) -> Result<()> {
        if self.fail_redact {
            return Err(StencilError::Other("redaction unsupported".to_string()));
        }
        self.ops.push(Op::Redact {
            page,
            region: *region,
            fill,
        });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        page: usize,
        region: &Region,
        fill: Color,
        opacity: f64,
    ) -> Result<()> {
        self.ops.push(Op::DrawRect {
            page,
            region: *region,
            fill,
            opacity,
        });
        Ok(())
    }

    fn insert_text(
        &mut self,
        page: usize,
        origin: (f64, f64),
        text: &str,
        font: &str,
        size: f64,
        color: Color,
    ) -> Result<()> {
        if self.fail_insert_text_for.as_deref() == Some(text) {
            return Err(StencilError::Other("font has no glyph for text".to_string()));
        }
        self.ops.push(Op::InsertText {
            page,
            x: origin.0,
            baseline: origin.1,
            text: text.to_string(),
            font: font.to_string(),
            size,
            color,
        });
        Ok(())
    }

    fn insert_image(&mut self, page: usize, region: &Region, data: &[u8]) -> Result<()> {
        self.ops.push(Op::InsertImage {
            page,
            region: *region,
            byte_len: data.len(),
        });
        Ok(())
    }

    fn save(&mut self, options: &SaveOptions) -> Result<()> {
        self.ops.push(Op::Save { options: *options });
        Ok(())
    }
}

/// An OCR engine returning a fixed recognition result.
pub struct FakeOcr(pub String);

impl OcrEngine for FakeOcr {
    fn image_to_text(&self, _image: &RasterImage, _layout: OcrLayout) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// An OCR engine that always fails.
pub struct FailingOcr;

impl OcrEngine for FailingOcr {
    fn image_to_text(&self, _image: &RasterImage, _layout: OcrLayout) -> Result<String> {
        Err(StencilError::Other("ocr backend crashed".to_string()))
    }
}

pub fn widget(id: u64, region: Region, value: Option<&str>) -> Widget {
    Widget {
        id: WidgetId(id),
        region,
        value: value.map(str::to_string),
    }
}

pub fn word(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Word {
    Word::new(text, Region::new(x0, y0, x1, y1))
}

/// A single-span layout line with the span's glyph origin on `origin_y`.
pub fn span_line(text: &str, region: Region, origin_y: f64, size: f64) -> SpanLine {
    SpanLine {
        region,
        spans: vec![TextSpan {
            text: text.to_string(),
            origin_y: Some(origin_y),
            size,
            font: "helv".to_string(),
            color: 0,
        }],
    }
}

pub fn raster_stub() -> RasterImage {
    RasterImage {
        width: 300,
        height: 60,
        data: vec![0u8; 16],
    }
}
