//! Error and warning types for pdfstencil.
//!
//! Provides [`StencilError`] for fatal errors that abort a request,
//! [`EngineWarning`] for non-fatal degraded operations that continue with
//! a documented fallback, [`EngineResult`] for pairing a value with
//! collected warnings, and [`EngineOptions`] for configuring engine
//! behavior.

use std::fmt;

use crate::unicode_norm::UnicodeNorm;

/// Fatal error types for detection and generation.
///
/// These abort the whole request. Degraded single-unit failures (a widget
/// that would not delete, a failed OCR pass) are [`EngineWarning`]s
/// instead and never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum StencilError {
    /// A referenced document, template, or page index does not exist.
    NotFound(String),
    /// Invalid input detected before any mutation (missing replacement
    /// labels, duplicate placeholder labels, degenerate region, bad color).
    Validation(String),
    /// I/O failure while reading or persisting a document.
    Io(String),
    /// Any other internal failure while mutating.
    Other(String),
}

impl fmt::Display for StencilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StencilError::NotFound(msg) => write!(f, "not found: {msg}"),
            StencilError::Validation(msg) => write!(f, "validation error: {msg}"),
            StencilError::Io(msg) => write!(f, "I/O error: {msg}"),
            StencilError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StencilError {}

impl From<std::io::Error> for StencilError {
    fn from(err: std::io::Error) -> Self {
        StencilError::Io(err.to_string())
    }
}

/// Convenience Result type alias for [`StencilError`].
pub type Result<T> = std::result::Result<T, StencilError>;

/// Machine-readable warning code for categorizing degraded operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// A form-field widget intersecting an erase region could not be removed.
    WidgetRemoval,
    /// Redaction was unsupported or failed; an opaque filled rectangle was
    /// drawn instead.
    RedactionFallback,
    /// A custom-size background paint failed.
    CustomBackground,
    /// A single text line failed to draw; remaining lines continued.
    TextDraw,
    /// An image payload failed to decode or place.
    ImageDecode,
    /// A detection strategy raised internally and was skipped.
    StrategyFailure,
    /// The OCR engine failed on a rendered region.
    OcrFailure,
    /// A placeholder's page index exceeds the target document's page count.
    PageMissing,
    /// Any other warning not covered by specific codes.
    Other(String),
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::WidgetRemoval => "WIDGET_REMOVAL",
            WarningCode::RedactionFallback => "REDACTION_FALLBACK",
            WarningCode::CustomBackground => "CUSTOM_BACKGROUND",
            WarningCode::TextDraw => "TEXT_DRAW",
            WarningCode::ImageDecode => "IMAGE_DECODE",
            WarningCode::StrategyFailure => "STRATEGY_FAILURE",
            WarningCode::OcrFailure => "OCR_FAILURE",
            WarningCode::PageMissing => "PAGE_MISSING",
            WarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning collected during detection or generation.
///
/// Warnings record degraded operations that continued with a documented
/// fallback or by skipping one unit of work. They carry a structured
/// [`code`](EngineWarning::code), a human-readable description, and
/// optional page and placeholder-label context.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page index where the warning occurred (0-indexed), if applicable.
    pub page: Option<usize>,
    /// Placeholder label associated with the warning, if applicable.
    pub label: Option<String>,
}

impl EngineWarning {
    /// Create a warning with a specific code and description.
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            label: None,
        }
    }

    /// Create a warning with page context.
    pub fn on_page(code: WarningCode, description: impl Into<String>, page: usize) -> Self {
        Self {
            code,
            description: description.into(),
            page: Some(page),
            label: None,
        }
    }

    /// Set the placeholder-label context, returning the modified warning.
    pub fn for_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Convert this warning into a [`StencilError`].
    ///
    /// Used by strict mode to escalate warnings to errors.
    pub fn to_error(&self) -> StencilError {
        StencilError::Other(self.to_string())
    }
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(ref label) = self.label {
            write!(f, " [{label}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
///
/// Used when an operation can partially succeed with degraded units of
/// work.
#[derive(Debug, Clone)]
pub struct EngineResult<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected while producing it.
    pub warnings: Vec<EngineWarning>,
}

impl<T> EngineResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<EngineWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EngineResult<U> {
        EngineResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Options controlling engine behavior.
///
/// Constructed once at process start and passed into the engine; the
/// algorithms never read ambient global state.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Whether to collect warnings during operations (default: true).
    pub collect_warnings: bool,
    /// When true, any warning is escalated to an error once the operation
    /// completes (default: false).
    pub strict_mode: bool,
    /// Unicode normalization form applied to detected text (default: None).
    pub unicode_norm: UnicodeNorm,
    /// Zoom factor for rendering regions ahead of OCR (default: 3.0).
    pub ocr_zoom: f64,
    /// Minimum width and height for a detection region, in points
    /// (default: 1.0). Smaller regions are a validation error.
    pub min_region_size: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            collect_warnings: true,
            strict_mode: false,
            unicode_norm: UnicodeNorm::default(),
            ocr_zoom: 3.0,
            min_region_size: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_category() {
        let err = StencilError::Validation("missing labels: a, b".to_string());
        assert_eq!(err.to_string(), "validation error: missing labels: a, b");
        let err = StencilError::NotFound("page 7".to_string());
        assert_eq!(err.to_string(), "not found: page 7");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StencilError = io.into();
        assert!(matches!(err, StencilError::Io(_)));
    }

    #[test]
    fn warning_display_includes_context() {
        let w = EngineWarning::on_page(WarningCode::PageMissing, "page 5 beyond target", 5)
            .for_label("total");
        assert_eq!(w.to_string(), "[PAGE_MISSING] page 5 beyond target (page 5) [total]");
    }

    #[test]
    fn warning_escalates_to_error() {
        let w = EngineWarning::new(WarningCode::RedactionFallback, "redaction unsupported");
        assert!(matches!(w.to_error(), StencilError::Other(_)));
    }

    #[test]
    fn engine_result_map_preserves_warnings() {
        let r = EngineResult::with_warnings(
            2,
            vec![EngineWarning::new(WarningCode::TextDraw, "line 1 failed")],
        );
        let mapped = r.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert!(!mapped.is_clean());
    }

    #[test]
    fn default_options() {
        let opts = EngineOptions::default();
        assert!(opts.collect_warnings);
        assert!(!opts.strict_mode);
        assert_eq!(opts.ocr_zoom, 3.0);
        assert_eq!(opts.min_region_size, 1.0);
    }
}
