//! Region erasure ahead of content insertion.
//!
//! Clears prior content (form widgets, glyphs, background) from a
//! placeholder's rectangle and fills it with the resolved background
//! color. Redaction actually removes the underlying content objects; when
//! the backend cannot redact, an opaque filled rectangle is drawn instead
//! as an accepted degraded mode.

use pdfstencil_core::{Color, EffectiveStyle, EngineWarning, Region, WarningCode};

use crate::handles::{DocumentHandle, WidgetId};

/// Margin in points added around the placeholder rectangle before
/// cleaning, absorbing anti-aliasing and border artifacts of the original
/// content.
const CLEAN_MARGIN: f64 = 2.0;

/// Erase `region` on `page_index`, filling with the style's background
/// color (opaque white when unset).
///
/// Single-unit failures (one widget that would not delete, a failed
/// custom-background paint) are pushed to `warnings` and never abort the
/// erase.
pub fn erase_region(
    doc: &mut dyn DocumentHandle,
    page_index: usize,
    region: &Region,
    style: &EffectiveStyle,
    warnings: &mut Vec<EngineWarning>,
) {
    let clean = region.expand(CLEAN_MARGIN);
    let fill = style.background_color.unwrap_or(Color::WHITE);

    let intersecting: Vec<WidgetId> = match doc.page(page_index) {
        Some(page) => page
            .widgets()
            .into_iter()
            .filter(|w| w.region.intersects(&clean))
            .map(|w| w.id)
            .collect(),
        None => Vec::new(),
    };
    for widget in intersecting {
        if let Err(err) = doc.delete_widget(page_index, widget) {
            warnings.push(EngineWarning::on_page(
                WarningCode::WidgetRemoval,
                format!("failed to delete widget: {err}"),
                page_index,
            ));
        }
    }

    if let Err(err) = doc.redact(page_index, &clean, fill) {
        warnings.push(EngineWarning::on_page(
            WarningCode::RedactionFallback,
            format!("redaction failed, drawing filled rectangle instead: {err}"),
            page_index,
        ));
        // The fallback paints over rather than removing content objects.
        if let Err(err) = doc.draw_rect(page_index, &clean, fill, 1.0) {
            warnings.push(EngineWarning::on_page(
                WarningCode::RedactionFallback,
                format!("fallback rectangle failed: {err}"),
                page_index,
            ));
        }
    }

    // The redaction fill is always opaque; only this secondary paint
    // honors the background opacity.
    if style.has_custom_background() {
        let background = Region::new(
            region.x0,
            region.y0,
            region.x0 + style.background_width.unwrap_or(clean.width()),
            region.y0 + style.background_height.unwrap_or(clean.height()),
        );
        if let Err(err) = doc.draw_rect(page_index, &background, fill, style.background_opacity) {
            warnings.push(EngineWarning::on_page(
                WarningCode::CustomBackground,
                format!("custom background failed: {err}"),
                page_index,
            ));
        }
    }
}
