//! Application services built on top of the repository ports.

mod aggregation;

pub use aggregation::Aggregator;
