//! Descriptive statistics over dataset columns.
//!
//! * [`moments`] – mean, sample standard deviation, skewness, excess kurtosis
//! * [`shape`]   – distribution shape labels derived from the moments
//! * [`summary`] – per-column summaries and the correlation matrix

pub mod moments;
pub mod shape;
pub mod summary;

use thiserror::Error;

use crate::data::model::DataError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("column '{column}' has no numeric data after removing missing values")]
    NoNumericData { column: String },
}
