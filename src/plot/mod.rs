//! Chart rendering.
//!
//! Every chart is drawn with [`plotters`]' bitmap backend and saved as a PNG,
//! overwriting whatever was at the target path.
//!
//! * [`relational`]  – scatter of two numeric columns
//! * [`categorical`] – box plot of a numeric column per category
//! * [`statistical`] – histogram with a kernel density overlay

pub mod categorical;
pub mod color;
pub mod relational;
pub mod statistical;

use std::ops::Range;

use thiserror::Error;

use crate::data::model::DataError;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type Result<T> = core::result::Result<T, PlotError>;

/// Fonts shared by all charts.
pub(crate) const CAPTION_FONT: (&str, f64) = ("sans-serif", 40.0);
pub(crate) const DESC_FONT: (&str, f64) = ("sans-serif", 30.0);
pub(crate) const LABEL_FONT: (&str, f64) = ("sans-serif", 22.0);

/// `[min, max]` of the finite values widened by `pad` of the span on both
/// sides. A zero span is widened to one unit so the axis stays valid.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64) -> Option<Range<f64>> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    let span = max - min;
    if span == 0.0 {
        return Some(min - 0.5..max + 0.5);
    }
    Some(min - span * pad..max + span * pad)
}
