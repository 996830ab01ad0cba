/// Data layer: core types, loading, and grouping.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, ordered column names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  group    │  bucket a numeric column by a categorical one
///   └──────────┘
/// ```

pub mod group;
pub mod loader;
pub mod model;
