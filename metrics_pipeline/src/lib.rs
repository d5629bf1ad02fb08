//! Metric CSVs for the dashboard: a seeded fake generator and the aggregator
//! that joins the three metric tables into summary and choropleth JSON.
//!
//! - [`fake`]: `dims.json` → `metric_{asking,registered,rent}_monthly.csv`
//! - [`table`]: tolerant reader for those CSVs
//! - [`aggregate`]: the per-key join, yield and paint arrays

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fake;
pub mod metric;
pub mod table;

pub use aggregate::{AggregateReport, Aggregation, aggregate, rental_yield, write_aggregation};
pub use config::{AggregateConfig, FakeConfig, FakeOptions, Month};
pub use error::MetricsError;
pub use metric::{MetricKind, PaintMetric};
