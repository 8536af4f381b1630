use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, Record};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Selection: what the UI hands over for one categorical dimension
// ---------------------------------------------------------------------------

/// A categorical selection as it arrives from a drop-down: either a single
/// value or a list of values. Both normalise to a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    pub fn into_set(self) -> BTreeSet<String> {
        match self {
            Selection::One(value) => BTreeSet::from([value]),
            Selection::Many(values) => values.into_iter().collect(),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::One(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for Selection {
    fn from(values: [&str; N]) -> Self {
        Selection::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// How the sale-date bounds are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateBounds {
    /// `start <= date < end`
    #[default]
    HalfOpen,
    /// `start < date < end`, as the first release of the dashboard did.
    Exclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub bounds: DateBounds,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start,
            end,
            bounds: DateBounds::default(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = match self.bounds {
            DateBounds::HalfOpen => date >= self.start,
            DateBounds::Exclusive => date > self.start,
        };
        after_start && date < self.end
    }
}

/// `from < price <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub from: f64,
    pub to: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.from < price && price <= self.to
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The conjunction of every active filter. Built fresh for each UI
/// interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub agencies: BTreeSet<String>,
    pub localities: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
    pub dates: DateRange,
    pub prices: PriceRange,
}

impl FilterCriteria {
    pub fn new(
        agencies: impl Into<Selection>,
        localities: impl Into<Selection>,
        property_types: impl Into<Selection>,
        dates: DateRange,
        prices: PriceRange,
    ) -> Self {
        FilterCriteria {
            agencies: agencies.into().into_set(),
            localities: localities.into().into_set(),
            property_types: property_types.into().into_set(),
            dates,
            prices,
        }
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &Record) -> bool {
        self.agencies.contains(&record.agency)
            && self.localities.contains(&record.locality)
            && self.property_types.contains(&record.property_type)
            && self.dates.contains(record.date_sold)
            && self.prices.contains(record.price)
    }

    /// Report ranges that can never match anything. Evaluation does not
    /// require this; it is for callers that want to tell the user.
    pub fn validate(&self) -> Result<(), FilterError> {
        for bound in [self.prices.from, self.prices.to] {
            if !bound.is_finite() {
                return Err(FilterError::NonFinitePrice(bound));
            }
        }
        if self.dates.start > self.dates.end {
            return Err(FilterError::InvertedDateRange {
                start: self.dates.start,
                end: self.dates.end,
            });
        }
        if self.prices.from > self.prices.to {
            return Err(FilterError::InvertedPriceRange {
                from: self.prices.from,
                to: self.prices.to,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// The records of a dataset that passed a [`FilterCriteria`], in dataset
/// order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// The dataset the view was taken from.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the matching records in the dataset.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the records that pass all filters.
///
/// An empty set in any categorical dimension matches nothing, as does a value
/// that never occurs in the dataset.
pub fn evaluate<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}
