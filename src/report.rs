//! Console output: table previews, summaries and the moments paragraph.
//!
//! Tables are laid out with Arrow's pretty printer so every column lines up
//! regardless of cell width.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::Dataset;
use crate::stats::moments::Moments;
use crate::stats::shape::Shape;
use crate::stats::summary::{ColumnSummary, CorrelationMatrix};

/// Render string rows under `headers` as a boxed text table.
pub fn text_table(headers: &[String], rows: &[Vec<String>]) -> Result<String, ArrowError> {
    if headers.is_empty() {
        return Ok("(no columns)".to_string());
    }
    let fields: Vec<Field> = headers
        .iter()
        .map(|h| Field::new(h, DataType::Utf8, true))
        .collect();
    let columns: Vec<ArrayRef> = (0..headers.len())
        .map(|c| {
            let cells: Vec<Option<&str>> = rows
                .iter()
                .map(|r| r.get(c).map(String::as_str))
                .collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

/// The first `n` rows, with a leading row-number column.
pub fn preview(dataset: &Dataset, n: usize) -> Result<String, ArrowError> {
    let mut headers = vec![String::new()];
    headers.extend(dataset.column_names.iter().cloned());

    let rows: Vec<Vec<String>> = (0..dataset.head(n).len())
        .map(|row| {
            std::iter::once(row.to_string())
                .chain(
                    dataset
                        .column_names
                        .iter()
                        .map(|col| dataset.cell(row, col).to_string()),
                )
                .collect()
        })
        .collect();
    text_table(&headers, &rows)
}

/// One column per numeric column, one row per statistic.
pub fn describe_table(summary: &[ColumnSummary]) -> Result<String, ArrowError> {
    let mut headers = vec![String::new()];
    headers.extend(summary.iter().map(|s| s.column.clone()));

    type Stat = fn(&ColumnSummary) -> f64;
    let stats: [(&str, Stat); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std_dev),
        ("min", |s| s.min),
        ("25%", |s| s.q1),
        ("50%", |s| s.median),
        ("75%", |s| s.q3),
        ("max", |s| s.max),
    ];
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|(name, get)| {
            std::iter::once(name.to_string())
                .chain(summary.iter().map(|s| format!("{:.6}", get(s))))
                .collect()
        })
        .collect();
    text_table(&headers, &rows)
}

pub fn correlation_table(corr: &CorrelationMatrix) -> Result<String, ArrowError> {
    let mut headers = vec![String::new()];
    headers.extend(corr.columns.iter().cloned());

    let rows: Vec<Vec<String>> = corr
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            std::iter::once(name.clone())
                .chain((0..corr.columns.len()).map(|j| format!("{:.6}", corr.get(i, j))))
                .collect()
        })
        .collect();
    text_table(&headers, &rows)
}

/// The moments paragraph for `column`, followed by the shape sentence.
pub fn writing(moments: &Moments, shape: &Shape, column: &str) -> String {
    format!(
        "For the attribute {column}:\n\
         Mean = {:.2}, Standard Deviation = {:.2}, Skewness = {:.2}, and Excess Kurtosis = {:.2}.\n\
         The data was {shape}.",
        moments.mean, moments.std_dev, moments.skewness, moments.excess_kurtosis,
    )
}
