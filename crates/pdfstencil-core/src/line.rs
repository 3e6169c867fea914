//! The canonical per-line layout record shared by detection and insertion.
//!
//! Every detection strategy produces [`LineRecord`]s and the content
//! inserter consumes them, so layout information crosses the engine in one
//! well-typed shape instead of loosely-keyed maps.

/// One physical text line within a detection or replacement region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRecord {
    /// Text content of the line.
    pub text: String,
    /// Y coordinate the glyphs sit on (not the line's top or bottom).
    pub baseline: f64,
    /// Top of the line's vertical extent. Absent for some detection sources.
    pub y0: Option<f64>,
    /// Bottom of the line's vertical extent. Absent for some detection sources.
    pub y1: Option<f64>,
    /// Estimated font size in points.
    pub size: Option<f64>,
    /// Font name reported by the source. Informational, detection-sourced only.
    pub font: Option<String>,
    /// Text color as a packed sRGB integer. Informational, detection-sourced only.
    pub color: Option<u32>,
}

impl LineRecord {
    /// Create a line record with only text, baseline, and size populated.
    ///
    /// The shape produced by the form-field and OCR strategies, which have
    /// no per-line vertical extent.
    pub fn basic(text: impl Into<String>, baseline: f64, size: f64) -> Self {
        Self {
            text: text.into(),
            baseline,
            y0: None,
            y1: None,
            size: Some(size),
            font: None,
            color: None,
        }
    }

    /// Sort key for top-to-bottom ordering: `y0` when present, else baseline.
    pub fn vertical_key(&self) -> f64 {
        self.y0.unwrap_or(self.baseline)
    }
}

/// Sort lines top-to-bottom by `y0`, falling back to baseline when absent.
pub fn sort_top_to_bottom(lines: &mut [LineRecord]) {
    lines.sort_by(|a, b| {
        a.vertical_key()
            .partial_cmp(&b.vertical_key())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Join line texts with newlines, the text form of a detection result.
pub fn join_text(lines: &[LineRecord]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
