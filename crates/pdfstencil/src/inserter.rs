//! Replacement content insertion.
//!
//! Text is placed line by line: strict-match lines reuse the recorded
//! baselines of the original layout, extra lines extrapolate from the
//! recorded line pitch, and regions with no recorded layout distribute
//! lines evenly. Font size auto-fits the region width by stepping down in
//! half-point decrements. Images are base64 payloads placed with aspect
//! ratio preserved.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use pdfstencil_core::{
    EffectiveStyle, EngineWarning, LineRecord, Region, WarningCode, heuristic_text_width,
};

use crate::handles::DocumentHandle;

/// Hard floor for any inserted text, in points.
const MIN_FONT_SIZE: f64 = 4.0;

/// Structural ceiling when no explicit style size pushes past it.
const MAX_FONT_SIZE: f64 = 72.0;

/// Explicit style sizes above this raise the ceiling to the styled size.
const STYLED_SIZE_THRESHOLD: f64 = 14.0;

/// Step for the width auto-fit loop, in points.
const FIT_DECREMENT: f64 = 0.5;

/// Replacement pitch when the derived line pitch is not positive.
const FALLBACK_LINE_PITCH: f64 = 12.0;

/// Size used when neither the style nor the prior layout records one.
const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Cap for auto-calculated sizes in evenly-distributed layout.
const AUTO_SIZE_CAP: f64 = 12.0;

/// Insert replacement text into `region`, following the prior line layout
/// where available.
///
/// Candidate lines are the newline splits of `text`; lines that trim to
/// empty keep their index slot but produce no glyphs. A per-line draw
/// failure is recorded as a warning and remaining lines continue.
pub fn insert_text(
    doc: &mut dyn DocumentHandle,
    page_index: usize,
    region: &Region,
    text: &str,
    prior_lines: &[LineRecord],
    strict_match: bool,
    style: &EffectiveStyle,
    warnings: &mut Vec<EngineWarning>,
) {
    let candidates: Vec<&str> = text.split('\n').collect();
    let total = candidates.len().max(1);
    let font = style.resolved_font();

    for (i, raw) in candidates.iter().enumerate() {
        let line_text = raw.trim();
        if line_text.is_empty() {
            continue;
        }

        let (baseline, candidate_size) = if strict_match && i < prior_lines.len() {
            let entry = &prior_lines[i];
            (
                entry.baseline,
                style
                    .font_size
                    .or(entry.size)
                    .unwrap_or(DEFAULT_FONT_SIZE),
            )
        } else if !prior_lines.is_empty() {
            (
                synthetic_baseline(prior_lines, i),
                style
                    .font_size
                    .or(prior_lines[0].size)
                    .unwrap_or(DEFAULT_FONT_SIZE),
            )
        } else {
            let slot = region.height() / total as f64;
            (
                region.y0 + (i as f64 + 0.8) * slot,
                style
                    .font_size
                    .unwrap_or_else(|| (slot * 0.75).min(AUTO_SIZE_CAP)),
            )
        };

        let ceiling = match style.font_size {
            Some(size) if size > STYLED_SIZE_THRESHOLD => size,
            _ => MAX_FONT_SIZE,
        };
        let mut font_size = candidate_size.min(ceiling).max(MIN_FONT_SIZE);

        // Step the size down until the line fits the region width, never
        // dropping below the floor; a line that already fits keeps its
        // candidate size.
        let available = region.width() - 2.0 * style.padding;
        loop {
            let width = doc
                .page(page_index)
                .and_then(|p| p.text_width(line_text, font, font_size))
                .unwrap_or_else(|| heuristic_text_width(line_text, font_size));
            if width < available || font_size - FIT_DECREMENT < MIN_FONT_SIZE {
                break;
            }
            font_size -= FIT_DECREMENT;
        }

        // Glyph-fill opacity is not supported by the underlying engine;
        // text always draws fully opaque.
        if let Err(err) = doc.insert_text(
            page_index,
            (region.x0 + style.padding, baseline),
            line_text,
            font,
            font_size,
            style.color,
        ) {
            warnings.push(EngineWarning::on_page(
                WarningCode::TextDraw,
                format!("failed to insert text line {i}: {err}"),
                page_index,
            ));
        }
    }
}

/// Baseline for a line index with no strict-match entry, derived from the
/// recorded layout's pitch.
fn synthetic_baseline(prior_lines: &[LineRecord], index: usize) -> f64 {
    let count = prior_lines.len();
    let first = &prior_lines[0];
    let last = &prior_lines[count - 1];

    let pitch = if count > 1 {
        let first_top = first.y0.unwrap_or(first.baseline - 10.0);
        let last_bottom = last.y1.unwrap_or(last.baseline);
        (last_bottom - first_top) / count as f64
    } else {
        first.size.unwrap_or(12.0) * 1.2
    };
    let pitch = if pitch <= 0.0 {
        FALLBACK_LINE_PITCH
    } else {
        pitch
    };

    if index < count {
        prior_lines[index].baseline
    } else {
        last.baseline + pitch * (index - count + 1) as f64
    }
}

/// Insert an image payload into `region`, preserving aspect ratio.
///
/// The payload is base64, optionally prefixed as a data URL. If the style
/// sets a background, it is painted first. Decode or placement failures
/// are recorded as warnings, never raised.
pub fn insert_image(
    doc: &mut dyn DocumentHandle,
    page_index: usize,
    region: &Region,
    image_data: &str,
    style: &EffectiveStyle,
    warnings: &mut Vec<EngineWarning>,
) {
    if let Some(background) = style.background_color {
        if style.background_opacity > 0.0 {
            if let Err(err) =
                doc.draw_rect(page_index, region, background, style.background_opacity)
            {
                warnings.push(EngineWarning::on_page(
                    WarningCode::CustomBackground,
                    format!("image background failed: {err}"),
                    page_index,
                ));
            }
        }
    }

    let payload = match image_data.split_once(',') {
        Some((_, rest)) => rest,
        None => image_data,
    };
    let bytes = match BASE64.decode(payload.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            warnings.push(EngineWarning::on_page(
                WarningCode::ImageDecode,
                format!("failed to decode image payload: {err}"),
                page_index,
            ));
            return;
        }
    };

    if let Err(err) = doc.insert_image(page_index, region, &bytes) {
        warnings.push(EngineWarning::on_page(
            WarningCode::ImageDecode,
            format!("failed to place image: {err}"),
            page_index,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(baseline: f64, y0: Option<f64>, y1: Option<f64>, size: Option<f64>) -> LineRecord {
        LineRecord {
            text: String::new(),
            baseline,
            y0,
            y1,
            size,
            font: None,
            color: None,
        }
    }

    #[test]
    fn synthetic_baseline_reuses_recorded_lines_in_range() {
        let prior = vec![record(110.0, Some(100.0), Some(112.0), Some(10.0)),
                         record(124.0, Some(114.0), Some(126.0), Some(10.0))];
        assert_eq!(synthetic_baseline(&prior, 0), 110.0);
        assert_eq!(synthetic_baseline(&prior, 1), 124.0);
    }

    #[test]
    fn synthetic_baseline_extrapolates_by_pitch() {
        // Pitch = (126 - 100) / 2 = 13.
        let prior = vec![record(110.0, Some(100.0), Some(112.0), Some(10.0)),
                         record(124.0, Some(114.0), Some(126.0), Some(10.0))];
        assert!((synthetic_baseline(&prior, 2) - 137.0).abs() < 1e-9);
        assert!((synthetic_baseline(&prior, 3) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn synthetic_baseline_single_line_uses_size_ratio() {
        let prior = vec![record(110.0, None, None, Some(10.0))];
        // Pitch = 10 * 1.2 = 12.
        assert!((synthetic_baseline(&prior, 1) - 122.0).abs() < 1e-9);
    }

    #[test]
    fn synthetic_baseline_nonpositive_pitch_falls_back() {
        // Extent derives a zero pitch; the 12-point fallback applies.
        let prior = vec![record(100.0, Some(100.0), None, None),
                         record(100.0, None, Some(100.0), None)];
        assert!((synthetic_baseline(&prior, 2) - 112.0).abs() < 1e-9);
    }
}
