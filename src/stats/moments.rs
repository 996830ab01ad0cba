use log::warn;

use super::StatsError;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Moments of a single column
// ---------------------------------------------------------------------------

/// The four moments reported for an analysis column.
///
/// `skewness` and `excess_kurtosis` are NaN when the sample has no spread;
/// `std_dev` is NaN for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    /// Sample standard deviation (divisor n − 1).
    pub std_dev: f64,
    /// Biased Fisher–Pearson coefficient `m3 / m2^1.5`.
    pub skewness: f64,
    /// Biased `m4 / m2^2 − 3`.
    pub excess_kurtosis: f64,
    /// Observations used, after dropping missing values.
    pub count: usize,
}

/// Compute [`Moments`] for `column`, ignoring missing cells.
pub fn statistical_analysis(dataset: &Dataset, column: &str) -> Result<Moments, StatsError> {
    let values = dataset.numeric_values(column)?;
    let moments = moments_of(&values).ok_or_else(|| StatsError::NoNumericData {
        column: column.to_string(),
    })?;

    if moments.skewness.is_nan() {
        warn!(
            "column '{column}' has zero variance over {} values; skewness and kurtosis are undefined",
            moments.count
        );
    }
    Ok(moments)
}

/// Missing-aware moments of a sample: NaN entries are dropped before anything
/// is computed. `None` when nothing is left.
pub fn moments_of(values: &[f64]) -> Option<Moments> {
    let sample: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sample.is_empty() {
        return None;
    }

    let n = sample.len() as f64;
    // Exact mean for a repeated value, so its spread is exactly zero.
    let constant = sample.iter().all(|&x| x == sample[0]);
    let mean = if constant {
        sample[0]
    } else {
        sample.iter().sum::<f64>() / n
    };

    // Second pass: the rounding left in the mean, removed from every deviation.
    let shift = sample.iter().map(|&x| x - mean).sum::<f64>() / n;

    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in &sample {
        let d = (x - mean) - shift;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    let std_dev = if sample.len() > 1 {
        (m2 / (n - 1.0)).sqrt()
    } else {
        f64::NAN
    };
    m2 /= n;
    m3 /= n;
    m4 /= n;

    // Relative to the mean's magnitude: rounding noise is not spread.
    let degenerate = constant || m2 <= (f64::EPSILON * mean).powi(2);
    let (skewness, excess_kurtosis) = if degenerate {
        (f64::NAN, f64::NAN)
    } else {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    };

    Some(Moments {
        mean: mean + shift,
        std_dev,
        skewness,
        excess_kurtosis,
        count: sample.len(),
    })
}
