//! Heuristic text width estimation.
//!
//! Used when the page handle offers no native text metrics. Character
//! widths are approximated by class: spaces are narrow, a small set of
//! thin glyphs narrower still, a small set of wide glyphs wider, and
//! everything else takes an average width.

/// Glyphs estimated at 0.3 em.
const NARROW_GLYPHS: &str = "il.,:;|!'`";

/// Glyphs estimated at 0.9 em.
const WIDE_GLYPHS: &str = "wmMW@#%&";

/// Estimate the rendered width of `text` at `font_size` points.
pub fn heuristic_text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|ch| {
            let em = if ch == ' ' {
                0.35
            } else if NARROW_GLYPHS.contains(ch) {
                0.3
            } else if WIDE_GLYPHS.contains(ch) {
                0.9
            } else {
                0.6
            };
            em * font_size
        })
        .sum()
}
