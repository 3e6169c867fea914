//! Placeholder styling: colors, font weight, and style resolution.
//!
//! A [`PlaceholderStyle`] is an open record of optional overrides stored
//! with a placeholder or supplied per replacement. [`resolve`] merges the
//! two field-wise into an [`EffectiveStyle`] with documented defaults.

use std::fmt;

use crate::error::StencilError;

/// An RGB color with components in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Parse a hex color string (`#RGB` or `#RRGGBB`, leading `#` optional).
    ///
    /// Three-digit forms expand each digit (`#fa0` is `#ffaa00`).
    pub fn from_hex(hex: &str) -> Result<Color, StencilError> {
        let hex = hex.trim_start_matches('#');
        let expanded: String = if hex.len() == 3 {
            hex.chars().flat_map(|c| [c, c]).collect()
        } else {
            hex.to_string()
        };
        if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StencilError::Validation(format!(
                "invalid hex color: {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16).map(|v| f64::from(v) / 255.0)
        };
        Ok(Color {
            r: channel(0..2).map_err(|_| StencilError::Validation(format!("invalid hex color: {hex:?}")))?,
            g: channel(2..4).map_err(|_| StencilError::Validation(format!("invalid hex color: {hex:?}")))?,
            b: channel(4..6).map_err(|_| StencilError::Validation(format!("invalid hex color: {hex:?}")))?,
        })
    }

    /// Render the color as a `#RRGGBB` hex string.
    pub fn to_hex(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// The persistence layer stores colors as hex strings, so Color serializes
// as one rather than as a struct.
#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Font weight for replacement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Bold variants for the base font families the document engine ships.
///
/// Families without an entry are left unchanged; no synthetic bolding is
/// attempted.
const BOLD_FONT_MAP: &[(&str, &str)] = &[
    ("helv", "hebo"),
    ("times-roman", "tibo"),
    ("courier", "cobo"),
];

/// Styling overrides stored with a placeholder or supplied per replacement.
///
/// Every field is independently optional; absent fields fall back to the
/// defaults documented on [`EffectiveStyle`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaceholderStyle {
    /// Font size in points. Absent means auto-calculate.
    pub font_size: Option<f64>,
    /// Base font family identifier.
    pub font_name: Option<String>,
    /// Font weight.
    pub font_weight: Option<FontWeight>,
    /// Text color.
    pub color: Option<Color>,
    /// Text opacity in 0.0..=1.0.
    pub opacity: Option<f64>,
    /// Background fill color. Absent means transparent.
    pub background_color: Option<Color>,
    /// Background opacity in 0.0..=1.0.
    pub background_opacity: Option<f64>,
    /// Fixed background width. Absent means auto-fit to the placeholder region.
    pub background_width: Option<f64>,
    /// Fixed background height. Absent means auto-fit to the placeholder region.
    pub background_height: Option<f64>,
    /// Horizontal padding in points.
    pub padding: Option<f64>,
}

/// The result of merging a placeholder's default style with a
/// per-replacement override.
///
/// Defaults: font size auto, font `helv`, weight normal, color black, text
/// opacity 1.0, background unset (the region eraser fills with opaque
/// white when unset), background opacity 1.0, padding 1.0 point.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    /// Explicit font size, or `None` for auto-calculation.
    pub font_size: Option<f64>,
    /// Base font family identifier.
    pub font_name: String,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Text color.
    pub color: Color,
    /// Text opacity. The underlying engine does not support glyph-fill
    /// opacity, so this is carried but not applied to text.
    pub opacity: f64,
    /// Background fill color, `None` when not explicitly set.
    pub background_color: Option<Color>,
    /// Background opacity, honored only by the secondary custom-size paint.
    pub background_opacity: f64,
    /// Fixed background width, when requested.
    pub background_width: Option<f64>,
    /// Fixed background height, when requested.
    pub background_height: Option<f64>,
    /// Horizontal padding in points.
    pub padding: f64,
}

impl Default for EffectiveStyle {
    fn default() -> Self {
        Self {
            font_size: None,
            font_name: "helv".to_string(),
            font_weight: FontWeight::Normal,
            color: Color::BLACK,
            opacity: 1.0,
            background_color: None,
            background_opacity: 1.0,
            background_width: None,
            background_height: None,
            padding: 1.0,
        }
    }
}

impl EffectiveStyle {
    /// The font to draw with, with the bold variant applied when the
    /// weight is bold and the family has a mapped variant.
    pub fn resolved_font(&self) -> &str {
        if self.font_weight == FontWeight::Bold {
            for (base, bold) in BOLD_FONT_MAP {
                if *base == self.font_name {
                    return bold;
                }
            }
        }
        &self.font_name
    }

    /// Returns `true` when a fixed background size was requested.
    pub fn has_custom_background(&self) -> bool {
        self.background_width.is_some() || self.background_height.is_some()
    }
}

/// Merge a placeholder's default style with a per-replacement override.
///
/// A shallow field-wise merge: every field present in `override_style`
/// replaces the corresponding field of `default_style`; fields absent from
/// both take the documented defaults.
pub fn resolve(
    default_style: Option<&PlaceholderStyle>,
    override_style: Option<&PlaceholderStyle>,
) -> EffectiveStyle {
    let mut effective = EffectiveStyle::default();
    for style in [default_style, override_style].into_iter().flatten() {
        if let Some(size) = style.font_size {
            effective.font_size = Some(size);
        }
        if let Some(ref name) = style.font_name {
            effective.font_name = name.clone();
        }
        if let Some(weight) = style.font_weight {
            effective.font_weight = weight;
        }
        if let Some(color) = style.color {
            effective.color = color;
        }
        if let Some(opacity) = style.opacity {
            effective.opacity = opacity;
        }
        if let Some(bg) = style.background_color {
            effective.background_color = Some(bg);
        }
        if let Some(bg_opacity) = style.background_opacity {
            effective.background_opacity = bg_opacity;
        }
        if let Some(w) = style.background_width {
            effective.background_width = Some(w);
        }
        if let Some(h) = style.background_height {
            effective.background_height = Some(h);
        }
        if let Some(padding) = style.padding {
            effective.padding = padding;
        }
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_six_digit() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-9);
        assert!((c.b - 0.0).abs() < 1e-9);
    }

    #[test]
    fn hex_three_digit_expands() {
        assert_eq!(Color::from_hex("#fa0").unwrap(), Color::from_hex("#ffaa00").unwrap());
    }

    #[test]
    fn hex_without_hash() {
        assert_eq!(Color::from_hex("000000").unwrap(), Color::BLACK);
    }

    #[test]
    fn hex_invalid_is_validation_error() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Color::from_hex("#1A2B3C").unwrap().to_hex(), "#1A2B3C");
    }

    #[test]
    fn resolve_all_absent_gives_defaults() {
        let s = resolve(None, None);
        assert_eq!(s.font_size, None);
        assert_eq!(s.font_name, "helv");
        assert_eq!(s.font_weight, FontWeight::Normal);
        assert_eq!(s.color, Color::BLACK);
        assert_eq!(s.background_color, None);
        assert_eq!(s.padding, 1.0);
    }

    #[test]
    fn resolve_override_wins_field_wise() {
        let default_style = PlaceholderStyle {
            font_size: Some(12.0),
            color: Some(Color::from_hex("#112233").unwrap()),
            padding: Some(2.0),
            ..Default::default()
        };
        let override_style = PlaceholderStyle {
            color: Some(Color::WHITE),
            ..Default::default()
        };
        let s = resolve(Some(&default_style), Some(&override_style));
        assert_eq!(s.font_size, Some(12.0));
        assert_eq!(s.color, Color::WHITE);
        assert_eq!(s.padding, 2.0);
    }

    #[test]
    fn bold_maps_known_families() {
        let mut s = EffectiveStyle {
            font_weight: FontWeight::Bold,
            ..Default::default()
        };
        assert_eq!(s.resolved_font(), "hebo");
        s.font_name = "times-roman".to_string();
        assert_eq!(s.resolved_font(), "tibo");
        s.font_name = "courier".to_string();
        assert_eq!(s.resolved_font(), "cobo");
    }

    #[test]
    fn bold_leaves_unmapped_families_unchanged() {
        let s = EffectiveStyle {
            font_name: "futura".to_string(),
            font_weight: FontWeight::Bold,
            ..Default::default()
        };
        assert_eq!(s.resolved_font(), "futura");
    }

    #[test]
    fn normal_weight_never_maps() {
        let s = EffectiveStyle::default();
        assert_eq!(s.resolved_font(), "helv");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::from_hex("#ff0000").unwrap()).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(back, Color::from_hex("#00FF00").unwrap());
    }
}
