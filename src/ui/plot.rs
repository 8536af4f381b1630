use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::{Axis, ChartSpec, Series};
use crate::state::AppState;
use crate::ui::color32;

const CHART_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// Central panel: the three charts stacked
// ---------------------------------------------------------------------------

pub fn charts(ui: &mut Ui, state: &AppState) {
    let charts = &state.charts;
    trend_plot(ui, &charts.trend);
    ui.add_space(12.0);
    statistics_plot(ui, &charts.statistics);
    ui.add_space(12.0);
    map_plot(ui, &charts.geography);
}

fn chart_title(ui: &mut Ui, spec: &ChartSpec) {
    let theme = spec.layout.theme;
    ui.label(
        RichText::new(&spec.layout.title)
            .strong()
            .size(theme.title_size)
            .color(color32(theme.font_color, 1.0)),
    );
}

fn empty_note(ui: &mut Ui, spec: &ChartSpec) {
    if spec.point_count() == 0 {
        ui.label(RichText::new("No sales match the current filters").color(Color32::GRAY));
    }
}

fn axis_title(axis: Option<&Axis>) -> String {
    axis.map(|a| a.title.clone()).unwrap_or_default()
}

/// Hover text lookup: (series name, x, y, label) for every labelled point.
type LabelEntry = (String, f64, f64, String);
type LabelIndex = Vec<LabelEntry>;

fn nearest_label(index: &[LabelEntry], name: &str, value: &PlotPoint) -> Option<String> {
    index
        .iter()
        .filter(|(series, ..)| series == name)
        .min_by(|a, b| {
            let da = (a.1 - value.x).powi(2) + (a.2 - value.y).powi(2);
            let db = (b.1 - value.x).powi(2) + (b.2 - value.y).powi(2);
            da.total_cmp(&db)
        })
        .map(|(.., label)| label.clone())
}

// ---------------------------------------------------------------------------
// Trend: price against sale date
// ---------------------------------------------------------------------------

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn format_day(value: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn trend_plot(ui: &mut Ui, spec: &ChartSpec) {
    chart_title(ui, spec);
    empty_note(ui, spec);

    let mut labels: LabelIndex = Vec::new();
    for series in &spec.series {
        if let Series::Scatter(s) = series {
            labels.extend(
                s.points
                    .iter()
                    .map(|p| (s.name.clone(), day_number(p.x), p.y, p.label.clone())),
            );
        }
    }

    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(axis_title(spec.layout.x_axis.as_ref()))
        .y_axis_label(axis_title(spec.layout.y_axis.as_ref()))
        .x_axis_formatter(|mark, _range| format_day(mark.value))
        .label_formatter(move |name, value| match nearest_label(&labels, name, value) {
            Some(address) => format!("{name}\n{address}\n{}\n${:.0}", format_day(value.x), value.y),
            None => String::new(),
        })
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let Series::Scatter(s) = series else {
                    continue;
                };
                let points: PlotPoints = s
                    .points
                    .iter()
                    .map(|p| [day_number(p.x), p.y])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&s.name)
                        .color(color32(s.marker.color, s.marker.opacity))
                        .radius(s.marker.size / 2.0)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Statistics: one box per locality
// ---------------------------------------------------------------------------

pub fn statistics_plot(ui: &mut Ui, spec: &ChartSpec) {
    chart_title(ui, spec);
    empty_note(ui, spec);

    let names: Vec<String> = spec.series.iter().map(|s| s.name().to_string()).collect();

    Plot::new("statistics_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(axis_title(spec.layout.x_axis.as_ref()))
        .y_axis_label(axis_title(spec.layout.y_axis.as_ref()))
        .x_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > f64::EPSILON || slot < 0.0 {
                return String::new();
            }
            names.get(slot as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (slot, series) in spec.series.iter().enumerate() {
                let Series::Box(b) = series else {
                    continue;
                };
                let fill = color32(b.color, b.opacity);
                let summary = &b.summary;
                let position = slot as f64;

                let elem = BoxElem::new(
                    position,
                    BoxSpread::new(
                        summary.lower_whisker,
                        summary.q1,
                        summary.median,
                        summary.q3,
                        summary.upper_whisker,
                    ),
                )
                .name(&b.name)
                .box_width(0.5)
                .whisker_width(0.3)
                .fill(fill.gamma_multiply(0.5))
                .stroke(Stroke::new(b.line_width, fill));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&b.name).color(fill));

                if !summary.outliers.is_empty() {
                    let outliers: PlotPoints =
                        summary.outliers.iter().map(|&v| [position, v]).collect();
                    plot_ui.points(Points::new(outliers).name(&b.name).color(fill).radius(2.5));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Geography: sale locations
// ---------------------------------------------------------------------------

pub fn map_plot(ui: &mut Ui, spec: &ChartSpec) {
    chart_title(ui, spec);
    empty_note(ui, spec);

    let Some(map) = &spec.layout.map else {
        return;
    };

    let mut labels: LabelIndex = Vec::new();
    for series in &spec.series {
        if let Series::MapMarkers(m) = series {
            labels.extend(
                m.points
                    .iter()
                    .map(|p| (m.name.clone(), p.lon, p.lat, p.label.clone())),
            );
        }
    }

    // Degrees of longitude visible across the plot at this zoom level.
    let span = 360.0 / 2f64.powf(map.zoom);
    let half = span / 2.0;

    Plot::new("map_plot")
        .height(map.height.min(CHART_HEIGHT * 1.5))
        .data_aspect(1.0)
        .show_axes([false, false])
        .include_x(map.center_lon - half)
        .include_x(map.center_lon + half)
        .include_y(map.center_lat - half)
        .include_y(map.center_lat + half)
        .label_formatter(move |name, value| nearest_label(&labels, name, value).unwrap_or_default())
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let Series::MapMarkers(m) = series else {
                    continue;
                };
                let points: PlotPoints = m.points.iter().map(|p| [p.lon, p.lat]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&m.name)
                        .color(color32(m.marker.color, m.marker.opacity))
                        .radius(m.marker.size / 2.0)
                        .filled(true),
                );
            }
        });

    let note = match &map.access_token {
        Some(_) => format!("Base map: {}", map.style),
        None => "Base map tiles disabled (MAPBOX_ACCESS_TOKEN not set)".to_string(),
    };
    ui.label(RichText::new(note).small().color(Color32::GRAY));
}
