//! Descriptive statistics and distribution charts for restaurant tip records.
//!
//! [`pipeline::run`] loads a table, prints diagnostics, writes three charts
//! and reports the moments of one numeric column with a shape classification.

pub mod config;
pub mod data;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod stats;
