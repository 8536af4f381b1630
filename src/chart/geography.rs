use super::color::Rgb;
use super::{ChartSpec, GeoPoint, Layout, MapLayout, MapSeries, Marker, Series, Theme};
use crate::config::MapConfig;
use crate::data::filter::FilteredView;
use crate::data::model::Record;

pub const TITLE: &str = "Geolocation distribution of properties";

/// Sale locations on a map, one marker per record.
///
/// Always declares exactly one series, which is empty when the view is.
/// Sales without coordinates are left off the map.
pub fn build(view: &FilteredView<'_>, map: &MapConfig) -> ChartSpec {
    let points = view
        .records()
        .filter_map(|r| {
            let (lat, lon) = r.location()?;
            Some(GeoPoint {
                lat,
                lon,
                label: hover_label(r),
            })
        })
        .collect();

    ChartSpec {
        series: vec![Series::MapMarkers(MapSeries {
            name: "Sales".to_string(),
            marker: Marker {
                size: 10.0,
                opacity: 0.5,
                color: Rgb::ORANGE,
            },
            points,
        })],
        layout: Layout {
            title: TITLE.to_string(),
            x_axis: None,
            y_axis: None,
            theme: Theme {
                margin: [20.0, 20.0, 40.0, 40.0],
                ..Theme::DARK
            },
            map: Some(MapLayout {
                center_lat: map.center_lat,
                center_lon: map.center_lon,
                zoom: map.zoom,
                bearing: 0.0,
                pitch: 0.0,
                height: 768.0,
                style: map.style.clone(),
                access_token: map.access_token.clone(),
            }),
        },
    }
}

fn hover_label(r: &Record) -> String {
    format!(
        "Address: {}\nSuburb: {}\nPrice Sold: {}k AUD",
        r.street_address,
        r.locality,
        thousands(r.price)
    )
}

/// Price in thousands, always with at least one decimal (`650.0`, `652.5`).
fn thousands(price: f64) -> String {
    let k = price / 1000.0;
    if k.fract() == 0.0 {
        format!("{k:.1}")
    } else {
        k.to_string()
    }
}
