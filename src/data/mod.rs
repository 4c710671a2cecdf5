/// Data layer: study tables, selection state and aggregation.
///
/// Architecture:
/// ```text
///  builtin tables      .json / .csv
///        │                  │
///        │            ┌──────────┐
///        │            │  loader   │  parse file → DataTable
///        │            └──────────┘
///        ▼                  ▼
///   ┌──────────────────────────┐
///   │ DataTable                │  selector → Dataset(Vec<Sample>)
///   └──────────────────────────┘
///        │   ◄── selection (weather, hour, metric, angle)
///        ▼
///   ┌───────────┐
///   │ aggregate │  mean / min-max / blend → AggregateResult
///   └───────────┘
/// ```

pub mod aggregate;
pub mod builtin;
pub mod loader;
pub mod model;
pub mod selection;
