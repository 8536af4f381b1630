/// Chart layer: pure adapters from a filtered view to declarative chart specs.
///
/// Architecture:
/// ```text
///   FilteredView
///        │
///        ├──▶ trend       one scatter series per property type
///        ├──▶ statistics  one box summary per locality
///        └──▶ geography   one map-marker series
///        │
///        ▼
///   ChartSpec  (series + layout), rendered by `ui::plot` or exported as JSON
/// ```
///
/// Adapters never mutate their input and share no state, so they can run in
/// any order.
pub mod color;
pub mod geography;
pub mod statistics;
pub mod trend;

use chrono::NaiveDate;
use serde::Serialize;

pub use color::Rgb;

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// A complete, framework-independent description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub series: Vec<Series>,
    pub layout: Layout,
}

impl ChartSpec {
    /// Total number of plotted points (box summaries count their samples).
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    Scatter(ScatterSeries),
    Box(BoxSeries),
    MapMarkers(MapSeries),
}

impl Series {
    pub fn name(&self) -> &str {
        match self {
            Series::Scatter(s) => &s.name,
            Series::Box(b) => &b.name,
            Series::MapMarkers(m) => &m.name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Series::Scatter(s) => s.points.len(),
            Series::Box(b) => b.summary.count,
            Series::MapMarkers(m) => m.points.len(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub size: f32,
    pub opacity: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub marker: Marker,
    pub points: Vec<DatePoint>,
}

/// A sale plotted against its date, labelled with the street address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatePoint {
    pub x: NaiveDate,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSeries {
    pub name: String,
    pub opacity: f32,
    pub line_width: f32,
    pub color: Rgb,
    pub summary: statistics::BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSeries {
    pub name: String,
    pub marker: Marker,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub theme: Theme,
    /// Only present on map charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

impl Axis {
    pub fn titled(title: &str) -> Option<Self> {
        Some(Axis {
            title: title.to_string(),
        })
    }
}

/// Colours and spacing shared by every chart on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub title_size: f32,
    pub font_size: f32,
    pub font_color: Rgb,
    pub background: Rgb,
    pub grid_color: Rgb,
    /// left, right, top, bottom
    pub margin: [f32; 4],
}

impl Theme {
    pub const DARK: Theme = Theme {
        title_size: 16.0,
        font_size: 10.0,
        font_color: Rgb::WHITE,
        background: Rgb(64, 64, 64),
        grid_color: Rgb(75, 75, 75),
        margin: [40.0, 40.0, 40.0, 40.0],
    };
}

/// Base-map settings for the geography chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub height: f32,
    pub style: String,
    /// Tile-service credential; `None` renders the map without tiles.
    pub access_token: Option<String>,
}
