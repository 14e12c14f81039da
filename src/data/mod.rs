/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  salary CSV (URL or file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalaryDataset │  Vec<SalaryRecord>, option lists per filter column
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics + grouped tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
