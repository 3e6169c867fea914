//! Multi-strategy text detection for a page region.
//!
//! Strategies are tried in fixed priority order and the first one yielding
//! non-empty text wins: form fields, precise text layout, clustered words,
//! then OCR when an engine is configured. A strategy failing internally is
//! recorded as a warning and falls through to the next; finding nothing is
//! a valid [`DetectionResult::empty`], never an error.

use pdfstencil_core::{
    DetectionResult, DetectionSource, EngineOptions, EngineResult, EngineWarning, LineRecord,
    Region, Result, StencilError, UnicodeNorm, WarningCode, cluster_into_lines,
    sort_top_to_bottom,
};

use crate::handles::{OcrEngine, OcrLayout, PageHandle};

/// Points the synthesized baseline sits above the region bottom for the
/// form-field strategy, and above each slot bottom for the OCR strategy.
const BASELINE_INSET: f64 = 2.0;

/// Estimated font size as a fraction of the per-line slot height for OCR
/// results.
const OCR_FONT_SIZE_RATIO: f64 = 0.8;

/// Detects what text occupies a rectangular region of a page.
pub struct TextDetector<'a> {
    options: &'a EngineOptions,
    ocr: Option<&'a dyn OcrEngine>,
}

impl<'a> TextDetector<'a> {
    pub fn new(options: &'a EngineOptions, ocr: Option<&'a dyn OcrEngine>) -> Self {
        Self { options, ocr }
    }

    /// Detect text in `region`, trying strategies in priority order.
    ///
    /// Returns a `Validation` error for a degenerate region; otherwise
    /// always succeeds, with an empty result when no strategy found text.
    pub fn detect(
        &self,
        page: &dyn PageHandle,
        region: &Region,
    ) -> Result<EngineResult<DetectionResult>> {
        if region.is_degenerate(self.options.min_region_size) {
            return Err(StencilError::Validation(format!(
                "detection region is too small: {:.2} x {:.2} points",
                region.width(),
                region.height()
            )));
        }

        let mut warnings = Vec::new();
        let result = self
            .try_strategy(Self::detect_form_fields, page, region, &mut warnings)
            .or_else(|| self.try_strategy(Self::detect_precise_layout, page, region, &mut warnings))
            .or_else(|| self.try_strategy(Self::detect_word_clusters, page, region, &mut warnings))
            .or_else(|| self.try_ocr(page, region, &mut warnings))
            .unwrap_or_else(DetectionResult::empty);

        Ok(EngineResult::with_warnings(
            self.normalized(result),
            warnings,
        ))
    }

    /// Run one strategy, converting an internal error into a warning so
    /// the chain falls through.
    fn try_strategy(
        &self,
        strategy: fn(&Self, &dyn PageHandle, &Region) -> Result<Option<DetectionResult>>,
        page: &dyn PageHandle,
        region: &Region,
        warnings: &mut Vec<EngineWarning>,
    ) -> Option<DetectionResult> {
        match strategy(self, page, region) {
            Ok(found) => found,
            Err(err) => {
                if self.options.collect_warnings {
                    warnings.push(EngineWarning::new(
                        WarningCode::StrategyFailure,
                        format!("detection strategy failed: {err}"),
                    ));
                }
                None
            }
        }
    }

    /// Strategy 1: the value of the first form-field widget intersecting
    /// the region.
    fn detect_form_fields(
        &self,
        page: &dyn PageHandle,
        region: &Region,
    ) -> Result<Option<DetectionResult>> {
        for widget in page.widgets() {
            if !widget.region.intersects(region) {
                continue;
            }
            if let Some(value) = widget.value {
                if !value.is_empty() {
                    let line =
                        LineRecord::basic(value, region.y1 - BASELINE_INSET, region.height());
                    return Ok(Some(DetectionResult::from_lines(
                        DetectionSource::FormField,
                        vec![line],
                    )));
                }
            }
        }
        Ok(None)
    }

    /// Strategy 2: the page's structured text layout clipped to the region.
    fn detect_precise_layout(
        &self,
        page: &dyn PageHandle,
        region: &Region,
    ) -> Result<Option<DetectionResult>> {
        let mut lines = Vec::new();
        for span_line in page.text_lines(region)? {
            let joined = span_line.joined_text();
            let trimmed = joined.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some(first) = span_line.spans.first() else {
                continue;
            };
            lines.push(LineRecord {
                text: trimmed.to_string(),
                baseline: first.origin_y.unwrap_or(span_line.region.y1),
                y0: Some(span_line.region.y0),
                y1: Some(span_line.region.y1),
                size: Some(first.size),
                font: Some(first.font.clone()),
                color: Some(first.color),
            });
        }
        sort_top_to_bottom(&mut lines);
        Ok((!lines.is_empty())
            .then(|| DetectionResult::from_lines(DetectionSource::PreciseLayout, lines)))
    }

    /// Strategy 3: individual words clustered into lines by vertical
    /// proximity.
    fn detect_word_clusters(
        &self,
        page: &dyn PageHandle,
        region: &Region,
    ) -> Result<Option<DetectionResult>> {
        let words = page.words(region)?;
        let lines = cluster_into_lines(&words);
        Ok((!lines.is_empty())
            .then(|| DetectionResult::from_lines(DetectionSource::ClusteredWords, lines)))
    }

    /// Strategy 4: OCR over a rendered raster of the region. Skipped
    /// entirely when no engine is configured; an engine failure becomes a
    /// warning rather than an error.
    fn try_ocr(
        &self,
        page: &dyn PageHandle,
        region: &Region,
        warnings: &mut Vec<EngineWarning>,
    ) -> Option<DetectionResult> {
        let ocr = self.ocr?;
        let attempt = || -> Result<Option<DetectionResult>> {
            let image = page.render_region(region, self.options.ocr_zoom)?;
            let recognized = ocr.image_to_text(&image, OcrLayout::SingleBlock)?;
            let recognized = recognized.trim();
            if recognized.is_empty() {
                return Ok(None);
            }

            // Baselines are distributed over equal-height slots, one per
            // raw OCR line; blank lines keep their slot but produce no
            // record.
            let raw_lines: Vec<&str> = recognized.split('\n').collect();
            let slot_height = region.height() / raw_lines.len().max(1) as f64;
            let mut lines = Vec::new();
            for (i, raw) in raw_lines.iter().enumerate() {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    continue;
                }
                lines.push(LineRecord::basic(
                    trimmed,
                    region.y0 + (i + 1) as f64 * slot_height - BASELINE_INSET,
                    slot_height * OCR_FONT_SIZE_RATIO,
                ));
            }
            Ok((!lines.is_empty())
                .then(|| DetectionResult::from_lines(DetectionSource::Ocr, lines)))
        };

        match attempt() {
            Ok(found) => found,
            Err(err) => {
                if self.options.collect_warnings {
                    warnings.push(EngineWarning::new(
                        WarningCode::OcrFailure,
                        format!("OCR failed: {err}"),
                    ));
                }
                None
            }
        }
    }

    /// Apply the configured unicode normalization to every detected line.
    fn normalized(&self, result: DetectionResult) -> DetectionResult {
        if self.options.unicode_norm == UnicodeNorm::None || result.is_empty() {
            return result;
        }
        let lines = result
            .lines
            .into_iter()
            .map(|mut line| {
                line.text = self.options.unicode_norm.normalize(&line.text);
                line
            })
            .collect();
        DetectionResult::from_lines(result.source, lines)
    }
}
