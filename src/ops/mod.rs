//! Operational jobs

pub mod usage;

pub use usage::{collect_usage, UsageReport};
