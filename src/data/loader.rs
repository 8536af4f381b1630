use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use super::model::{Dataset, Record};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Columns every dataset must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Agency",
    "Locality",
    "PropertyType",
    "DateSold",
    "Price",
    "StreetAddress",
    "Latitude",
    "Longitude",
];

/// Load the property-sales table from a CSV file.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file)?;
    if dataset.is_empty() {
        log::warn!("{} has a header but no sales", path.display());
    }

    log::info!(
        "Loaded {} sales from {} ({} agencies, {} localities, {} property types)",
        dataset.len(),
        path.display(),
        dataset.agencies().len(),
        dataset.localities().len(),
        dataset.property_types().len()
    );
    Ok(dataset)
}

/// Same as [`load`] but over any reader; the first row must be the header.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        // Row numbers are 1-based and count the header, matching what an
        // editor shows.
        records.push(columns.parse_row(&row, row_no + 2)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Header → position lookup
// ---------------------------------------------------------------------------

struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))?;
        }
        Ok(ColumnIndex { positions })
    }

    fn field<'r>(&self, row: &'r StringRecord, column: usize) -> &'r str {
        row.get(self.positions[column]).unwrap_or("")
    }

    fn parse_row(&self, row: &StringRecord, row_no: usize) -> Result<Record, LoadError> {
        let text = |column: usize| self.field(row, column).to_string();

        let date_raw = self.field(row, 3);
        let date_sold = parse_date(date_raw)
            .ok_or_else(|| invalid(row_no, 3, date_raw, "expected a calendar date"))?;

        let price_raw = self.field(row, 4);
        let price = parse_number(price_raw)
            .ok_or_else(|| invalid(row_no, 4, price_raw, "expected a number"))?;
        if price < 0.0 {
            return Err(invalid(row_no, 4, price_raw, "price cannot be negative"));
        }

        let coordinate = |column: usize| -> Result<Option<f64>, LoadError> {
            let raw = self.field(row, column);
            if raw.is_empty() {
                return Ok(None);
            }
            parse_number(raw)
                .map(Some)
                .ok_or_else(|| invalid(row_no, column, raw, "expected a number"))
        };
        let latitude = coordinate(6)?;
        let longitude = coordinate(7)?;

        Ok(Record {
            agency: text(0),
            locality: text(1),
            property_type: text(2),
            date_sold,
            price,
            street_address: text(5),
            latitude,
            longitude,
        })
    }
}

fn invalid(row: usize, column: usize, value: &str, reason: &str) -> LoadError {
    LoadError::InvalidField {
        row,
        column: REQUIRED_COLUMNS[column],
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn parse_number(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Accepts the date layouts seen in agency exports. A trailing time
/// component (`2016-03-05 00:00:00`) is dropped.
fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FMTS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Agency,Locality,PropertyType,DateSold,Price,StreetAddress,Latitude,Longitude,Bedrooms";

    fn load_str(body: &str) -> Result<Dataset, LoadError> {
        load_from_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let ds = load_str(
            "Ray White,Pakenham,house,2016-03-05,450000,1 Main St,-38.07,145.48,3\n\
             Harcourts,Berwick,unit,12/06/2017,380000.5,2 High St,-38.03,145.35,2\n",
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        let second = ds.get(1).unwrap();
        assert_eq!(second.date_sold, NaiveDate::from_ymd_opt(2017, 6, 12).unwrap());
        assert!((second.price - 380_000.5).abs() < 1e-9);
        assert_eq!(second.street_address, "2 High St");
        assert_eq!(ds.property_types(), ["house", "unit"]);
    }

    #[test]
    fn accepts_timestamps_in_date_column() {
        let ds = load_str("A,B,house,2016-03-05 00:00:00,1,x,0,0,1\n").unwrap();
        assert_eq!(
            ds.get(0).unwrap().date_sold,
            NaiveDate::from_ymd_opt(2016, 3, 5).unwrap()
        );
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = load_from_reader("Agency,Locality\nA,B\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("PropertyType")));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = load_str("A,B,house,2016-03-05,-5,x,0,0,1\n").unwrap_err();
        match err {
            LoadError::InvalidField { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Price");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = load_str("A,B,house,sometime,5,x,0,0,1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { column: "DateSold", .. }
        ));
    }

    #[test]
    fn blank_coordinates_load_as_unplaced() {
        let ds = load_str(
            "A,B,house,2016-03-05,1,x,,,1\n\
             A,B,house,2016-03-05,2,y,-37.8,145.0,1\n",
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0).unwrap().latitude, None);
        assert_eq!(ds.get(0).unwrap().longitude, None);
        assert_eq!(ds.get(1).unwrap().latitude, Some(-37.8));
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let err = load_str("A,B,house,2016-03-05,1,x,north,145.0,1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { row: 2, column: "Latitude", .. }
        ));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let err = load_str("A,B,house\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(Path::new("./definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
