use eframe::egui;

use crate::state::AppState;
use crate::ui::{self, panels, plot};

pub const TITLE: &str = "Melbourne Residential Property Market Dashboard";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EstateDashApp {
    pub state: AppState,
}

impl EstateDashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        ui::apply_theme(&cc.egui_ctx);
        Self { state }
    }
}

impl eframe::App for EstateDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: about ----
        egui::TopBottomPanel::bottom("about").show(ctx, |ui| {
            panels::about(ui);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(egui::RichText::new(TITLE).color(ui::color32(ui::ACCENT, 1.0)));
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| plot::charts(ui, &self.state));
        });
    }
}
