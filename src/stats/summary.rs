use crate::data::model::{DataError, Dataset};

use super::moments::moments_of;

// ---------------------------------------------------------------------------
// Per-column summary (count, mean, std, min, quartiles, max)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Summaries of every numeric column, in column order.
pub fn describe(dataset: &Dataset) -> Result<Vec<ColumnSummary>, DataError> {
    dataset
        .numeric_columns()
        .into_iter()
        .map(|col| {
            let mut values = dataset.numeric_values(col)?;
            values.sort_by(f64::total_cmp);
            Ok(summarize(col, &values))
        })
        .collect()
}

fn summarize(column: &str, sorted: &[f64]) -> ColumnSummary {
    let (mean, std_dev) = moments_of(sorted)
        .map(|m| (m.mean, m.std_dev))
        .unwrap_or((f64::NAN, f64::NAN));
    ColumnSummary {
        column: column.to_string(),
        count: sorted.len(),
        mean,
        std_dev,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolated quantile of an ascending slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Pearson correlation matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` squared.
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.columns.len() + col]
    }
}

/// Pearson correlation between every pair of numeric columns, using only the
/// rows where both cells are present.
pub fn correlation_matrix(dataset: &Dataset) -> Result<CorrelationMatrix, DataError> {
    let columns: Vec<String> = dataset
        .numeric_columns()
        .into_iter()
        .map(str::to_string)
        .collect();
    let n = columns.len();
    let mut values = vec![f64::NAN; n * n];

    for i in 0..n {
        for j in i..n {
            let pairs = dataset.paired_values(&columns[i], &columns[j])?;
            let r = pearson(&pairs);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }
    Ok(CorrelationMatrix { columns, values })
}

/// Pearson's r; NaN when either side has no spread or fewer than two pairs.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn table(rows: &[(f64, f64, &str)]) -> Dataset {
        let records: Vec<Record> = rows
            .iter()
            .map(|&(a, b, c)| {
                [
                    ("a".to_string(), CellValue::Float(a)),
                    ("b".to_string(), CellValue::Float(b)),
                    ("c".to_string(), CellValue::String(c.to_string())),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        Dataset::from_records(vec!["a".into(), "b".into(), "c".into()], records)
    }

    #[test]
    fn quantiles_interpolate() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), 1.0);
        assert_eq!(quantile(&v, 0.25), 1.75);
        assert_eq!(quantile(&v, 0.5), 2.5);
        assert_eq!(quantile(&v, 1.0), 4.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn describe_covers_numeric_columns_only() {
        let ds = table(&[(1.0, 10.0, "x"), (2.0, 20.0, "y"), (3.0, f64::NAN, "z")]);
        let summary = describe(&ds).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].column, "a");
        assert_eq!(summary[0].median, 2.0);
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[1].max, 20.0);
    }

    #[test]
    fn correlation_of_linear_columns_is_one() {
        let ds = table(&[(1.0, 2.0, "x"), (2.0, 4.0, "y"), (3.0, 6.0, "z")]);
        let corr = correlation_matrix(&ds).unwrap();
        assert_eq!(corr.columns, vec!["a", "b"]);
        assert!((corr.get(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(corr.get(0, 1), corr.get(1, 0));
    }

    #[test]
    fn correlation_without_spread_is_nan() {
        assert!(pearson(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]).is_nan());
        assert!(pearson(&[(1.0, 1.0)]).is_nan());
    }
}
