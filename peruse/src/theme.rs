//! Widget sizing and visual style.
//!
//! The widget font size is one index into a fixed table, persisted in the
//! settings document and applied by rebuilding the egui text styles. The
//! index is clamped into range at every use, never rejected.

use egui::{FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Selectable widget font sizes, smallest to largest.
pub const WIDGET_FONT_SIZES: [f32; 12] = [
    6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 22.0, 24.0, 28.0, 32.0, 36.0,
];

/// Clamp a possibly out-of-range table index and write the result back.
pub fn normalize_index(index: &mut i32, len: usize) -> usize {
    *index = (*index).clamp(0, len as i32 - 1);
    *index as usize
}

/// Apply the theme for the given font-size index.
pub fn apply(ctx: &egui::Context, font_index: &mut i32) {
    let size = WIDGET_FONT_SIZES[normalize_index(font_index, WIDGET_FONT_SIZES.len())];

    let mut style = Style::default();
    style.text_styles = [
        (
            TextStyle::Small,
            FontId::new((size * 9.0 / 14.0).max(6.0), FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(size * 12.0 / 14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(size, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(size * 18.0 / 14.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(size * 12.0 / 14.0, FontFamily::Monospace),
        ),
    ]
    .into();

    let mut visuals = Visuals::light();
    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;
    visuals.window_stroke = Stroke::new(1.0, visuals.text_color());

    style.visuals = visuals;
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps_and_writes_back() {
        let mut idx = -3;
        assert_eq!(normalize_index(&mut idx, 12), 0);
        assert_eq!(idx, 0);

        let mut idx = 99;
        assert_eq!(normalize_index(&mut idx, 12), 11);
        assert_eq!(idx, 11);

        let mut idx = 4;
        assert_eq!(normalize_index(&mut idx, 12), 4);
        assert_eq!(idx, 4);
    }
}
