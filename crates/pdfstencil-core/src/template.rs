//! Template and placeholder records.
//!
//! Plain data supplied by the persistence layer. The generation engine
//! reads these records and never mutates them; each generation run is a
//! pure transformation producing a new output document.

use std::fmt;

use crate::detection::DetectionSource;
use crate::error::StencilError;
use crate::geometry::Region;
use crate::line::LineRecord;
use crate::style::PlaceholderStyle;

/// The kind of content a placeholder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentType {
    #[default]
    Text,
    Image,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Text => write!(f, "text"),
            ContentType::Image => write!(f, "image"),
        }
    }
}

/// A named rectangular region on a specific page slated for content
/// substitution.
///
/// Identity is the label, unique within the owning template.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    /// Label identifying the placeholder within its template.
    pub label: String,
    /// Page index (0-based) the region sits on.
    pub page: usize,
    /// The placeholder's rectangle, in document points.
    pub region: Region,
    /// Text that occupied the region when the placeholder was captured.
    pub detected_text: Option<String>,
    /// Which strategy detected that text.
    pub detection_source: Option<DetectionSource>,
    /// Line-level layout snapshot captured at creation, ordered
    /// top-to-bottom.
    pub lines: Option<Vec<LineRecord>>,
    /// When true, new text lines reuse the exact baseline/size of the
    /// snapshot lines at the same index.
    pub strict_match: bool,
    /// Content kind accepted by this placeholder.
    pub content_type: ContentType,
    /// Whether the region held multiple lines when captured.
    pub multi_line: bool,
    /// Default style, overridable per replacement.
    pub style: Option<PlaceholderStyle>,
}

impl Placeholder {
    /// Create a text placeholder with no capture attached.
    pub fn new(label: impl Into<String>, page: usize, region: Region) -> Self {
        Self {
            label: label.into(),
            page,
            region,
            detected_text: None,
            detection_source: None,
            lines: None,
            strict_match: false,
            content_type: ContentType::Text,
            multi_line: false,
            style: None,
        }
    }

    /// Attach the detection capture (text, source, line snapshot) taken at
    /// creation time. Multi-line is inferred from a newline in the text.
    pub fn with_capture(
        mut self,
        text: impl Into<String>,
        source: DetectionSource,
        lines: Vec<LineRecord>,
    ) -> Self {
        let text = text.into();
        if text.contains('\n') {
            self.multi_line = true;
        }
        self.detected_text = Some(text);
        self.detection_source = Some(source);
        self.lines = Some(lines);
        self
    }
}

/// A named, ordered collection of placeholders anchored to one source
/// document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub name: String,
    pub description: Option<String>,
    /// Placeholders in application order.
    pub placeholders: Vec<Placeholder>,
}

impl Template {
    pub fn new(name: impl Into<String>, placeholders: Vec<Placeholder>) -> Self {
        Self {
            name: name.into(),
            description: None,
            placeholders,
        }
    }

    /// Validate the template's placeholder records.
    ///
    /// Labels must be unique within the template and every region must be
    /// well-formed with positive extent.
    pub fn validate(&self) -> Result<(), StencilError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.placeholders.len());
        for p in &self.placeholders {
            if seen.contains(&p.label.as_str()) {
                return Err(StencilError::Validation(format!(
                    "placeholder labels must be unique: {:?}",
                    p.label
                )));
            }
            seen.push(&p.label);
            if p.region.x1 < p.region.x0 || p.region.y1 < p.region.y0 {
                return Err(StencilError::Validation(format!(
                    "placeholder {:?} has an inverted region",
                    p.label
                )));
            }
        }
        Ok(())
    }
}

/// A replacement supplied for a placeholder label.
///
/// A bare string is shorthand for a text replacement with no style
/// override.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Replacement {
    /// Literal text, `content_type = text`, no style override.
    Plain(String),
    /// Structured replacement with content type and optional style.
    Styled {
        /// Literal text or embedded image payload (base64, optionally a
        /// data URL).
        value: String,
        #[cfg_attr(feature = "serde", serde(default))]
        content_type: ContentType,
        #[cfg_attr(feature = "serde", serde(default))]
        style: Option<PlaceholderStyle>,
    },
}

/// A replacement normalized to one internal shape at the orchestrator
/// boundary.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedReplacement<'a> {
    pub value: &'a str,
    pub content_type: ContentType,
    pub style: Option<&'a PlaceholderStyle>,
}

impl Replacement {
    /// Normalize either variant to one internal shape.
    pub fn resolved(&self) -> ResolvedReplacement<'_> {
        match self {
            Replacement::Plain(value) => ResolvedReplacement {
                value,
                content_type: ContentType::Text,
                style: None,
            },
            Replacement::Styled {
                value,
                content_type,
                style,
            } => ResolvedReplacement {
                value,
                content_type: *content_type,
                style: style.as_ref(),
            },
        }
    }
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::Plain(value.to_string())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Plain(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(label: &str) -> Placeholder {
        Placeholder::new(label, 0, Region::new(0.0, 0.0, 100.0, 20.0))
    }

    #[test]
    fn duplicate_labels_fail_validation() {
        let template = Template::new("t", vec![placeholder("name"), placeholder("name")]);
        assert!(matches!(
            template.validate(),
            Err(StencilError::Validation(_))
        ));
    }

    #[test]
    fn unique_labels_pass_validation() {
        let template = Template::new("t", vec![placeholder("a"), placeholder("b")]);
        assert!(template.validate().is_ok());
    }

    #[test]
    fn inverted_region_fails_validation() {
        let mut p = placeholder("a");
        p.region = Region::new(100.0, 0.0, 0.0, 20.0);
        let template = Template::new("t", vec![p]);
        assert!(template.validate().is_err());
    }

    #[test]
    fn capture_with_newline_infers_multi_line() {
        let p = placeholder("addr").with_capture(
            "line one\nline two",
            DetectionSource::PreciseLayout,
            Vec::new(),
        );
        assert!(p.multi_line);
        let p = placeholder("name").with_capture("Jane", DetectionSource::FormField, Vec::new());
        assert!(!p.multi_line);
    }

    #[test]
    fn plain_replacement_resolves_to_text() {
        let r = Replacement::from("hello");
        let resolved = r.resolved();
        assert_eq!(resolved.value, "hello");
        assert_eq!(resolved.content_type, ContentType::Text);
        assert!(resolved.style.is_none());
    }

    #[test]
    fn styled_replacement_keeps_content_type() {
        let r = Replacement::Styled {
            value: "iVBORw0KGgo=".to_string(),
            content_type: ContentType::Image,
            style: None,
        };
        assert_eq!(r.resolved().content_type, ContentType::Image);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bare_json_string_deserializes_as_plain() {
        let r: Replacement = serde_json::from_str("\"Jane Smith\"").unwrap();
        assert_eq!(r, Replacement::Plain("Jane Smith".to_string()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn structured_json_deserializes_as_styled() {
        let r: Replacement = serde_json::from_str(
            r#"{"value": "x", "content_type": "image"}"#,
        )
        .unwrap();
        let resolved = r.resolved();
        assert_eq!(resolved.content_type, ContentType::Image);
        assert_eq!(resolved.value, "x");
    }
}
