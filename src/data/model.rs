use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Record – one property sale (one row of the source table)
// ---------------------------------------------------------------------------

/// A single property sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub agency: String,
    pub locality: String,
    /// Open set of values such as `house`, `unit`, `townhouse`.
    pub property_type: String,
    pub date_sold: NaiveDate,
    /// Sale price in AUD, never negative.
    pub price: f64,
    pub street_address: String,
    /// Blank in the source when the sale was never geocoded.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record {
    /// `(latitude, longitude)` when both coordinates are known.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values.
///
/// Built once at startup and never mutated afterwards; everything downstream
/// borrows it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    agencies: Vec<String>,
    localities: Vec<String>,
    property_types: Vec<String>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    ///
    /// Distinct values keep the order in which they first appear in the file.
    pub fn from_records(records: Vec<Record>) -> Self {
        let agencies = distinct(records.iter().map(|r| r.agency.as_str()));
        let localities = distinct(records.iter().map(|r| r.locality.as_str()));
        let property_types = distinct(records.iter().map(|r| r.property_type.as_str()));

        Dataset {
            records,
            agencies,
            localities,
            property_types,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn agencies(&self) -> &[String] {
        &self.agencies
    }

    pub fn localities(&self) -> &[String] {
        &self.localities
    }

    pub fn property_types(&self) -> &[String] {
        &self.property_types
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Unique values in order of first appearance.
pub(crate) fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(agency: &str, locality: &str, kind: &str, date: &str, price: f64) -> Record {
        Record {
            agency: agency.to_string(),
            locality: locality.to_string(),
            property_type: kind.to_string(),
            date_sold: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            price,
            street_address: format!("{} {locality} Rd", price as u64 % 97),
            latitude: Some(-37.9),
            longitude: Some(145.1),
        }
    }

    pub fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Ray White", "Pakenham", "house", "2016-03-05", 450_000.0),
            record("Barry Plant", "Berwick", "unit", "2017-06-12", 380_000.0),
            record("Harcourts", "Mornington", "house", "2015-11-30", 720_000.0),
            record("Ray White", "Berwick", "townhouse", "2018-01-20", 510_000.0),
            record("Jellis Craig", "Pakenham", "house", "2019-08-02", 1_250_000.0),
            record("Barry Plant", "Pakenham", "unit", "2012-02-14", 99_000.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_dataset;

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 6);
        assert_eq!(
            ds.agencies(),
            ["Ray White", "Barry Plant", "Harcourts", "Jellis Craig"]
        );
        assert_eq!(ds.localities(), ["Pakenham", "Berwick", "Mornington"]);
        assert_eq!(ds.property_types(), ["house", "unit", "townhouse"]);
    }
}
