use super::color::generate_palette;
use super::{Axis, ChartSpec, DatePoint, Layout, Marker, ScatterSeries, Series, Theme};
use crate::data::filter::FilteredView;

pub const TITLE: &str = "Property price trend over the years";

/// Price against sale date, one scatter series per property type.
///
/// Series are declared for every property type in the *whole* dataset, so a
/// type that the filter removed still shows up (empty) in the legend and
/// keeps its colour.
pub fn build(view: &FilteredView<'_>) -> ChartSpec {
    let kinds = view.dataset().property_types();
    let palette = generate_palette(kinds.len());

    let series = kinds
        .iter()
        .zip(palette)
        .map(|(kind, color)| {
            let points = view
                .records()
                .filter(|r| r.property_type == *kind)
                .map(|r| DatePoint {
                    x: r.date_sold,
                    y: r.price,
                    label: r.street_address.clone(),
                })
                .collect();

            Series::Scatter(ScatterSeries {
                name: kind.clone(),
                marker: Marker {
                    size: 10.0,
                    opacity: 0.7,
                    color,
                },
                points,
            })
        })
        .collect();

    ChartSpec {
        series,
        layout: Layout {
            title: TITLE.to_string(),
            x_axis: Axis::titled("Time"),
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
    use crate::data::model::fixtures::{record, sample_dataset};
    use crate::data::model::Dataset;
    use chrono::NaiveDate;

    fn wide_open(agencies: &[&str], localities: &[&str], kinds: &[&str]) -> FilterCriteria {
        let set = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        FilterCriteria {
            agencies: set(agencies),
            localities: set(localities),
            property_types: set(kinds),
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
    fn filtered_out_type_still_declares_an_empty_series() {
        let ds = Dataset::from_records(vec![
            record("A", "L", "house", "2016-01-01", 500_000.0),
            record("A", "L", "unit", "2016-02-01", 300_000.0),
            record("A", "L", "house", "2016-03-01", 550_000.0),
        ]);
        let view = evaluate(&ds, &wide_open(&["A"], &["L"], &["house"]));
        let chart = build(&view);

        let names: Vec<&str> = chart.series.iter().map(Series::name).collect();
        assert_eq!(names, ["house", "unit"]);
        assert_eq!(chart.series[0].len(), 2);
        assert!(chart.series[1].is_empty());
    }

    #[test]
    fn points_carry_date_price_and_address() {
        let ds = sample_dataset();
        let view = evaluate(
            &ds,
            &wide_open(&["Ray White"], &["Pakenham"], &["house", "unit", "townhouse"]),
        );
        let chart = build(&view);

        let Series::Scatter(house) = &chart.series[0] else {
            panic!("trend series must be scatter");
        };
        assert_eq!(house.points.len(), 1);
        let point = &house.points[0];
        assert_eq!(point.x, NaiveDate::from_ymd_opt(2016, 3, 5).unwrap());
        assert_eq!(point.y, 450_000.0);
        assert_eq!(point.label, ds.get(0).unwrap().street_address);
        assert_eq!(chart.layout.x_axis.as_ref().unwrap().title, "Time");
    }

    #[test]
    fn colours_do_not_depend_on_the_filter() {
        let ds = sample_dataset();
        let all = build(&evaluate(
            &ds,
            &wide_open(ds_strs(ds.agencies()).as_slice(), &["Pakenham"], &["unit"]),
        ));
        let none = build(&evaluate(&ds, &wide_open(&[], &[], &[])));
        assert_eq!(all.series.len(), none.series.len());
        for (a, b) in all.series.iter().zip(&none.series) {
            match (a, b) {
                (Series::Scatter(a), Series::Scatter(b)) => assert_eq!(a.marker, b.marker),
                _ => panic!("trend series must be scatter"),
            }
        }
        assert_eq!(none.point_count(), 0);
    }

    fn ds_strs(values: &[String]) -> Vec<&str> {
        values.iter().map(String::as_str).collect()
    }
}
