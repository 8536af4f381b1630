use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::pipeline::PriceChoice;
use crate::state::{AppState, Dimension};
use crate::ui::{color32, ACCENT};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Filters").color(color32(ACCENT, 1.0)));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                category_filter(ui, state, dim);
            }
            ui.separator();

            date_filter(ui, state);
            ui.separator();

            price_filter(ui, state);
        });
}

/// Multi-select for one categorical dimension (collapsible).
fn category_filter(ui: &mut Ui, state: &mut AppState, dim: Dimension) {
    // Clone what we need so we can mutate state inside the loop.
    let choices = state.choices(dim).to_vec();

    // Show count of selected / total in the header
    let n_selected = choices
        .iter()
        .filter(|c| state.selected(dim).contains(c.as_str()))
        .count();
    let header_text = format!("{}  ({n_selected}/{})", dim.label(), choices.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dim.label())
        .default_open(dim == Dimension::PropertyType)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(dim);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(dim);
                }
            });

            for value in &choices {
                let mut checked = state.selected(dim).contains(value.as_str());
                if ui.checkbox(&mut checked, value).changed() {
                    state.toggle_value(dim, value);
                }
            }
        });
}

fn date_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Date Range");

    let mut start = state.criteria.dates.start;
    let mut end = state.criteria.dates.end;

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("sold_from"))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("sold_to"))
            .changed();
    });

    // The pickers themselves are unbounded; set_dates clamps.
    if changed {
        state.set_dates(start, end);
    }
}

fn price_filter(ui: &mut Ui, state: &mut AppState) {
    let options = state.dashboard.options();
    let (from_choices, to_choices) = (options.price_from, options.price_to);

    let from = state.criteria.prices.from;
    if let Some(value) = price_combo(ui, "Price From:", "price_from", from_choices, from) {
        state.set_price_from(value);
    }
    let to = state.criteria.prices.to;
    if let Some(value) = price_combo(ui, "Price To:", "price_to", to_choices, to) {
        state.set_price_to(value);
    }
}

/// Returns the newly picked value, if the user picked one.
fn price_combo(
    ui: &mut Ui,
    label: &str,
    id: &str,
    choices: &[PriceChoice],
    current: f64,
) -> Option<f64> {
    let current_label = choices
        .iter()
        .find(|c| c.value == current)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| format!("{current}"));

    let mut picked = None;
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current_label)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                if ui
                    .selectable_label(choice.value == current, choice.label)
                    .clicked()
                {
                    picked = Some(choice.value);
                }
            }
        });
    picked.filter(|v| *v != current)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export charts…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} sales loaded, {} match",
            state.dashboard.dataset().len(),
            state.charts.matched
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel
// ---------------------------------------------------------------------------

pub fn about(ui: &mut Ui) {
    ui.add_space(4.0);
    ui.strong("About DataRaft");
    ui.label(
        "DataRaft provides services in Customer Strategy and Data Analytics.  Our unique \
         value comes from our domain expertise from experience working in senior strategy \
         and marketing roles for ASX 200 organisations.",
    );
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match write_charts(&path, state) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_charts(path: &std::path::Path, state: &AppState) -> anyhow::Result<()> {
    use anyhow::Context;

    let json = serde_json::to_string_pretty(&state.charts).context("serialising charts")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
