//! Detection result types.
//!
//! Provides [`DetectionSource`] identifying which strategy produced a
//! result and [`DetectionResult`] pairing the detected text with its
//! line-level layout descriptor.

use std::fmt;

use crate::line::{LineRecord, join_text};

/// The strategy that produced a detected-text result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionSource {
    /// An interactive form field's value intersecting the region.
    FormField,
    /// Structured text layout extraction clipped to the region.
    PreciseLayout,
    /// Individual words grouped into lines by vertical proximity.
    ClusteredWords,
    /// Optical character recognition over a rendered raster of the region.
    Ocr,
    /// No strategy found text in the region.
    Empty,
}

impl DetectionSource {
    /// Returns the label string for this source.
    ///
    /// Labels match the values captured into persisted placeholder records,
    /// so they are stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::FormField => "Form Field",
            DetectionSource::PreciseLayout => "Precise Layout",
            DetectionSource::ClusteredWords => "Clustered Words",
            DetectionSource::Ocr => "OCR",
            DetectionSource::Empty => "Empty",
        }
    }

    /// Parse a source from its label string.
    ///
    /// Returns `None` if the string is not a recognized label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Form Field" => Some(Self::FormField),
            "Precise Layout" => Some(Self::PreciseLayout),
            "Clustered Words" => Some(Self::ClusteredWords),
            "OCR" => Some(Self::Ocr),
            "Empty" => Some(Self::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of detecting text within a page region.
///
/// Invariants: `text` is the newline join of `lines[*].text`; an empty
/// `text` implies `source == Empty` and no lines; `lines` are ordered
/// top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionResult {
    /// Detected text, one line per entry in `lines`.
    pub text: String,
    /// Which strategy produced this result.
    pub source: DetectionSource,
    /// Line-level layout descriptor, ordered top-to-bottom.
    pub lines: Vec<LineRecord>,
}

impl DetectionResult {
    /// The result for a region in which no strategy found text.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            source: DetectionSource::Empty,
            lines: Vec::new(),
        }
    }

    /// Build a result from ordered lines, deriving `text` from them.
    pub fn from_lines(source: DetectionSource, lines: Vec<LineRecord>) -> Self {
        if lines.is_empty() {
            return Self::empty();
        }
        Self {
            text: join_text(&lines),
            source,
            lines,
        }
    }

    /// Returns `true` if no text was detected.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
