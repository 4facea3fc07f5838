/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GameTable + IngestReport   (literal: list cells)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ GameTable  │  Vec<Game>, immutable for the session
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterConfig stages → GameView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group / pivot / explode → small summary tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod literal;
pub mod loader;
pub mod model;
pub mod quality;
