use serde::Serialize;

use super::color::generate_palette;
use super::{Axis, BoxSeries, ChartSpec, Layout, Series, Theme};
use crate::data::filter::FilteredView;
use crate::data::model::distinct;

pub const TITLE: &str = "Property price statistics";

// ---------------------------------------------------------------------------
// Box-and-whisker summary
// ---------------------------------------------------------------------------

/// Five-number summary of a sample, plus Tukey whiskers and outliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest sample within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest sample within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarise `values`. Returns `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let within = |v: &f64| (low_fence..=high_fence).contains(v);
        let lower_whisker = sorted.iter().copied().find(within).unwrap_or(min);
        let upper_whisker = sorted.iter().copied().rev().find(within).unwrap_or(max);
        let outliers = sorted.iter().copied().filter(|v| !within(v)).collect();

        Some(BoxSummary {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Price distribution per locality.
///
/// Only localities present in the filtered view get a box; an empty view
/// produces a chart with no series.
pub fn build(view: &FilteredView<'_>) -> ChartSpec {
    let localities = distinct(view.records().map(|r| r.locality.as_str()));
    let palette = generate_palette(localities.len());

    let series = localities
        .into_iter()
        .zip(palette)
        .filter_map(|(locality, color)| {
            let prices: Vec<f64> = view
                .records()
                .filter(|r| r.locality == locality)
                .map(|r| r.price)
                .collect();
            let summary = BoxSummary::from_values(&prices)?;
            Some(Series::Box(BoxSeries {
                name: locality,
                opacity: 0.8,
                line_width: 1.0,
                color,
                summary,
            }))
        })
        .collect();

    ChartSpec {
        series,
        layout: Layout {
            title: TITLE.to_string(),
            x_axis: Axis::titled("Suburbs / Geo-location"),
            y_axis: Axis::titled("Property price (AUD)"),
            theme: Theme::DARK,
            map: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{evaluate, DateRange, FilterCriteria, PriceRange};
    use crate::data::model::fixtures::sample_dataset;
    use crate::data::model::Dataset;
    use chrono::NaiveDate;

    fn all_of(ds: &Dataset) -> FilterCriteria {
        FilterCriteria {
            agencies: ds.agencies().iter().cloned().collect(),
            localities: ds.localities().iter().cloned().collect(),
            property_types: ds.property_types().iter().cloned().collect(),
            dates: DateRange::new(
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(),
            ),
            prices: PriceRange {
                from: 0.0,
                to: 1e9,
            },
        }
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let s = BoxSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn far_values_become_outliers() {
        let s = BoxSummary::from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 100.0]).unwrap();
        assert_eq!(s.outliers, vec![100.0]);
        assert_eq!(s.upper_whisker, 14.0);
        assert_eq!(s.lower_whisker, 10.0);
        assert_eq!(s.max, 100.0);
    }

    #[test]
    fn single_value_collapses_the_box() {
        let s = BoxSummary::from_values(&[250_000.0]).unwrap();
        assert_eq!(s.q1, 250_000.0);
        assert_eq!(s.q3, 250_000.0);
        assert_eq!(s.lower_whisker, s.upper_whisker);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn one_box_per_filtered_locality_in_order() {
        let ds = sample_dataset();
        let mut criteria = all_of(&ds);
        criteria.localities.remove("Mornington");
        let chart = build(&evaluate(&ds, &criteria));

        let names: Vec<&str> = chart.series.iter().map(Series::name).collect();
        assert_eq!(names, ["Pakenham", "Berwick"]);
        assert_eq!(chart.series[0].len(), 3);
        assert_eq!(chart.series[1].len(), 2);
    }

    #[test]
    fn empty_view_has_no_series() {
        let ds = sample_dataset();
        let mut criteria = all_of(&ds);
        criteria.agencies.clear();
        let chart = build(&evaluate(&ds, &criteria));
        assert!(chart.series.is_empty());
        assert_eq!(chart.layout.title, TITLE);
    }
}
