use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::{self, ChartSpec};
use crate::config::{DashboardConfig, MapConfig};
use crate::data::filter::{evaluate, DateBounds, DateRange, FilterCriteria, PriceRange};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Drop-down choices
// ---------------------------------------------------------------------------

/// A labelled price bound offered by the price drop-downs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChoice {
    pub label: &'static str,
    pub value: f64,
}

const fn choice(label: &'static str, value: f64) -> PriceChoice {
    PriceChoice { label, value }
}

pub const PRICE_FROM_CHOICES: [PriceChoice; 6] = [
    choice(">10k", 10_000.0),
    choice(">100k", 100_000.0),
    choice(">250k", 250_000.0),
    choice(">500k", 500_000.0),
    choice(">1m", 1_000_000.0),
    choice(">5m", 5_000_000.0),
];

pub const PRICE_TO_CHOICES: [PriceChoice; 6] = [
    choice("<=100k", 100_000.0),
    choice("<=250k", 250_000.0),
    choice("<=500k", 500_000.0),
    choice("<=1m", 1_000_000.0),
    choice("<=5m", 5_000_000.0),
    choice(">5m", 10_000_000.0),
];

/// Earliest date the date pickers allow.
pub fn earliest_sale_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Everything the filter controls can offer.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions<'a> {
    pub agencies: &'a [String],
    pub localities: &'a [String],
    pub property_types: &'a [String],
    pub price_from: &'static [PriceChoice],
    pub price_to: &'static [PriceChoice],
}

// ---------------------------------------------------------------------------
// Dashboard: dataset + settings → charts
// ---------------------------------------------------------------------------

/// The three charts for one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    /// Number of sales that passed the filter.
    pub matched: usize,
    pub trend: ChartSpec,
    pub statistics: ChartSpec,
    pub geography: ChartSpec,
}

/// Owns the read-only dataset and renders charts on demand.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    map: MapConfig,
    date_bounds: DateBounds,
}

impl Dashboard {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        if config.map.access_token.is_none() {
            log::warn!("MAPBOX_ACCESS_TOKEN is not set; the map will render without tiles");
        }
        Self {
            dataset,
            map: config.map.clone(),
            date_bounds: config.date_bounds,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> FilterOptions<'_> {
        FilterOptions {
            agencies: self.dataset.agencies(),
            localities: self.dataset.localities(),
            property_types: self.dataset.property_types(),
            price_from: &PRICE_FROM_CHOICES,
            price_to: &PRICE_TO_CHOICES,
        }
    }

    /// The selection shown when the dashboard opens.
    pub fn initial_criteria(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria::new(
            ["Barry Plant", "Ray White", "Harcourts"],
            ["Pakenham", "Mornington", "Berwick"],
            ["house", "unit", "townhouse"],
            DateRange {
                bounds: self.date_bounds,
                ..DateRange::new(earliest_sale_date(), today)
            },
            PriceRange {
                from: 10_000.0,
                to: 1_000_000.0,
            },
        )
    }

    /// Filter once, then build all three charts from the same view.
    pub fn render(&self, criteria: &FilterCriteria) -> DashboardCharts {
        let view = evaluate(&self.dataset, criteria);
        if view.is_empty() {
            log::debug!("No sales match the current filters");
        } else {
            log::debug!(
                "{} of {} sales match the current filters",
                view.len(),
                self.dataset.len()
            );
        }

        DashboardCharts {
            matched: view.len(),
            trend: chart::trend::build(&view),
            statistics: chart::statistics::build(&view),
            geography: chart::geography::build(&view, &self.map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_dataset;

    fn dashboard() -> Dashboard {
        Dashboard::new(sample_dataset(), &DashboardConfig::default())
    }

    #[test]
    fn initial_selection_matches_the_default_view() {
        let dash = dashboard();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let criteria = dash.initial_criteria(today);
        assert_eq!(criteria.agencies.len(), 3);
        assert_eq!(criteria.dates.end, today);
        assert_eq!(criteria.dates.bounds, DateBounds::HalfOpen);

        // Only the Jellis Craig sale is outside the default selection.
        let charts = dash.render(&criteria);
        assert_eq!(charts.matched, 5);
        assert_eq!(charts.trend.point_count(), 5);
        assert_eq!(charts.geography.point_count(), 5);
        assert_eq!(charts.statistics.point_count(), 5);
    }

    #[test]
    fn unplaced_sale_still_counts_in_trend_and_statistics() {
        let mut records = sample_dataset().records().to_vec();
        records[0].longitude = None;
        let dash = Dashboard::new(Dataset::from_records(records), &DashboardConfig::default());

        let charts = dash.render(&dash.initial_criteria(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert_eq!(charts.matched, 5);
        assert_eq!(charts.trend.point_count(), 5);
        assert_eq!(charts.statistics.point_count(), 5);
        assert_eq!(charts.geography.point_count(), 4);
    }

    #[test]
    fn render_is_repeatable() {
        let dash = dashboard();
        let criteria = dash.initial_criteria(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(dash.render(&criteria), dash.render(&criteria));
    }

    #[test]
    fn configured_bounds_flow_into_criteria() {
        let config = DashboardConfig {
            date_bounds: DateBounds::Exclusive,
            ..DashboardConfig::default()
        };
        let dash = Dashboard::new(sample_dataset(), &config);
        let criteria = dash.initial_criteria(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(criteria.dates.bounds, DateBounds::Exclusive);
    }

    #[test]
    fn options_expose_dataset_values_and_price_choices() {
        let dash = dashboard();
        let options = dash.options();
        assert_eq!(options.property_types, ["house", "unit", "townhouse"]);
        assert_eq!(options.price_from[0].value, 10_000.0);
        assert_eq!(options.price_to.last().unwrap().label, ">5m");
    }

    #[test]
    fn charts_serialise_to_json() {
        let dash = dashboard();
        let charts = dash.render(&dash.initial_criteria(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["trend"]["series"][0]["type"], "scatter");
        assert_eq!(json["statistics"]["series"][0]["type"], "box");
        assert_eq!(json["geography"]["layout"]["map"]["zoom"], 8.0);
    }
}
