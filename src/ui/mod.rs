/// UI layer: filter controls in, chart specs out.
pub mod panels;
pub mod plot;

use eframe::egui::{self, Color32};

use crate::chart::{Rgb, Theme};

pub const ACCENT: Rgb = Rgb::ACCENT;

/// Page background around the chart panels.
const PAGE: Rgb = Rgb(75, 75, 75);

pub fn color32(rgb: Rgb, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(rgb.0, rgb.1, rgb.2, alpha)
}

/// Dark page theme shared with the charts.
pub fn apply_theme(ctx: &egui::Context) {
    let theme = Theme::DARK;
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = color32(theme.background, 1.0);
    visuals.window_fill = color32(theme.background, 1.0);
    visuals.extreme_bg_color = color32(PAGE, 1.0);
    visuals.override_text_color = Some(color32(theme.font_color, 1.0));
    visuals.selection.bg_fill = color32(ACCENT, 0.6);
    ctx.set_visuals(visuals);
}
