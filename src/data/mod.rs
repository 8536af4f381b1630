/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   mel_estate.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (fails with LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, distinct agencies / localities / types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
