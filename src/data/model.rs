use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Schema and typing failures when reading columns out of a [`Dataset`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("column '{column}', row {row}: '{value}' is not numeric")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common DataFrame dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => write!(f, "NaN"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell (integers are widened).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// `Null` and floating-point NaN both count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single row: column_name → value. Columns absent from the map are missing.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All rows, in file order.
    pub records: Vec<Record>,
    /// Column names in file order.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset from column names (file order) and rows.
    ///
    /// Record keys missing from `columns` are appended in sorted order.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut column_names = columns;
        let mut extra: Vec<String> = records
            .iter()
            .flat_map(|r| r.keys())
            .filter(|k| !column_names.contains(k))
            .cloned()
            .collect();
        extra.sort();
        extra.dedup();
        column_names.extend(extra);

        Dataset {
            records,
            column_names,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Fail fast on the first column in `names` that the schema lacks.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), DataError> {
        match names.iter().find(|n| !self.has_column(n)) {
            Some(missing) => Err(DataError::ColumnNotFound(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Raw cell lookup; an absent key reads as `Null`.
    pub fn cell<'a>(&'a self, row: usize, column: &str) -> &'a CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(NULL)
    }

    /// All non-missing values of a numeric column.
    ///
    /// Missing cells are skipped, never read as zero. A present cell that is
    /// not numeric is malformed data and is reported with its row.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>, DataError> {
        if !self.has_column(column) {
            return Err(DataError::ColumnNotFound(column.to_string()));
        }
        let mut values = Vec::with_capacity(self.records.len());
        for row in 0..self.records.len() {
            let cell = self.cell(row, column);
            if cell.is_missing() {
                continue;
            }
            match cell.as_f64() {
                Some(v) => values.push(v),
                None => {
                    return Err(DataError::NotNumeric {
                        column: column.to_string(),
                        row,
                        value: cell.to_string(),
                    })
                }
            }
        }
        Ok(values)
    }

    /// Columns whose present cells are all numeric, with at least one present.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.column_names
            .iter()
            .filter(|col| {
                let mut seen = false;
                for row in 0..self.records.len() {
                    let cell = self.cell(row, col);
                    if cell.is_missing() {
                        continue;
                    }
                    if cell.as_f64().is_none() {
                        return false;
                    }
                    seen = true;
                }
                seen
            })
            .map(|c| c.as_str())
            .collect()
    }

    /// Row-aligned `(x, y)` pairs where both cells are present and numeric.
    pub fn paired_values(&self, x: &str, y: &str) -> Result<Vec<(f64, f64)>, DataError> {
        self.require_columns(&[x, y])?;
        Ok((0..self.records.len())
            .filter_map(|row| {
                let a = self.cell(row, x);
                let b = self.cell(row, y);
                if a.is_missing() || b.is_missing() {
                    return None;
                }
                Some((a.as_f64()?, b.as_f64()?))
            })
            .collect())
    }
}
