use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::data::filter::FilterCriteria;
use crate::pipeline::{earliest_sale_date, Dashboard, DashboardCharts};

// ---------------------------------------------------------------------------
// Categorical filter dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Agency,
    Locality,
    PropertyType,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Agency,
        Dimension::Locality,
        Dimension::PropertyType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Agency => "Agencies",
            Dimension::Locality => "Localities",
            Dimension::PropertyType => "Property Types",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset plus map settings.
    pub dashboard: Dashboard,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Charts for `criteria` (recomputed on every change).
    pub charts: DashboardCharts,

    /// Upper bound for the date pickers.
    pub today: NaiveDate,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, today: NaiveDate) -> Self {
        let criteria = dashboard.initial_criteria(today);
        let charts = dashboard.render(&criteria);
        Self {
            dashboard,
            criteria,
            charts,
            today,
            status_message: None,
        }
    }

    /// Choices offered for a dimension, in dataset order.
    pub fn choices(&self, dim: Dimension) -> &[String] {
        let options = self.dashboard.options();
        match dim {
            Dimension::Agency => options.agencies,
            Dimension::Locality => options.localities,
            Dimension::PropertyType => options.property_types,
        }
    }

    pub fn selected(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Agency => &self.criteria.agencies,
            Dimension::Locality => &self.criteria.localities,
            Dimension::PropertyType => &self.criteria.property_types,
        }
    }

    fn selected_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Agency => &mut self.criteria.agencies,
            Dimension::Locality => &mut self.criteria.localities,
            Dimension::PropertyType => &mut self.criteria.property_types,
        }
    }

    /// Recompute the charts after a filter change.
    pub fn refresh(&mut self) {
        self.charts = self.dashboard.render(&self.criteria);
        self.status_message = self
            .criteria
            .validate()
            .err()
            .map(|e| format!("Nothing can match: {e}"));
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_value(&mut self, dim: Dimension, value: &str) {
        let selected = self.selected_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refresh();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let all: BTreeSet<String> = self.choices(dim).iter().cloned().collect();
        *self.selected_mut(dim) = all;
        self.refresh();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selected_mut(dim).clear();
        self.refresh();
    }

    /// Set the sale-date range, clamped to the pickers' limits. A reversed
    /// pair is swapped rather than rejected.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let lower = earliest_sale_date();
        self.criteria.dates.start = start.clamp(lower, self.today);
        self.criteria.dates.end = end.clamp(lower, self.today);
        self.refresh();
    }

    pub fn set_price_from(&mut self, value: f64) {
        self.criteria.prices.from = value;
        self.refresh();
    }

    pub fn set_price_to(&mut self, value: f64) {
        self.criteria.prices.to = value;
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::fixtures::sample_dataset;

    fn state() -> AppState {
        let dashboard = Dashboard::new(sample_dataset(), &DashboardConfig::default());
        AppState::new(dashboard, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn toggling_a_value_updates_the_charts() {
        let mut state = state();
        assert_eq!(state.charts.matched, 5);

        state.toggle_value(Dimension::Agency, "Ray White");
        assert!(!state.selected(Dimension::Agency).contains("Ray White"));
        assert_eq!(state.charts.matched, 3);

        state.toggle_value(Dimension::Agency, "Ray White");
        assert_eq!(state.charts.matched, 5);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = state();
        state.select_none(Dimension::PropertyType);
        assert_eq!(state.charts.matched, 0);
        assert!(state.charts.statistics.series.is_empty());
        // Trend still declares every property type.
        assert_eq!(state.charts.trend.series.len(), 3);

        state.select_all(Dimension::Agency);
        state.select_all(Dimension::PropertyType);
        assert_eq!(state.charts.matched, 5);

        // The 1.25m sale needs the top price bracket.
        state.set_price_to(10_000_000.0);
        assert_eq!(state.charts.matched, 6);
    }

    #[test]
    fn reversed_dates_are_swapped_and_clamped() {
        let mut state = state();
        let late = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let early = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
        state.set_dates(late, early);
        assert_eq!(state.criteria.dates.start, earliest_sale_date());
        assert_eq!(state.criteria.dates.end, state.today);
    }

    #[test]
    fn inverted_price_range_is_reported_not_rejected() {
        let mut state = state();
        state.set_price_from(5_000_000.0);
        state.set_price_to(100_000.0);
        assert_eq!(state.charts.matched, 0);
        assert!(state.status_message.is_some());

        state.set_price_from(10_000.0);
        assert!(state.status_message.is_none());
    }
}
