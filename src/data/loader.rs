use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one record per line
/// * `.json`    – `[{ "total_bill": 16.99, "tip": 1.01, "day": "Sun" }, ...]`
/// * `.parquet` – flat scalar columns (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell typed by inference.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: Record = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        records.push(row);
    }

    Ok(Dataset::from_records(headers, records))
}

/// Infer the type of a CSV cell. Missing-value markers read as `Null`.
pub fn guess_cell_type(raw: &str) -> CellValue {
    let s = raw.trim();
    if s.is_empty() || matches!(s, "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL") {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "total_bill": 16.99, "tip": 1.01, "day": "Sun" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        records.push(row);
    }

    Ok(Dataset::from_records(columns, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut record = BTreeMap::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_cell(batch.column(col_idx), row)
                    .with_context(|| format!("Row {row}, column '{}'", field.name()))?;
                record.insert(field.name().clone(), value);
            }
            records.push(record);
        }
    }

    Ok(Dataset::from_records(columns, records))
}

// -- Parquet / Arrow helpers --

fn downcast<'a, T: 'static>(col: &'a ArrayRef) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(downcast::<StringArray>(col)?.value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => CellValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => CellValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => CellValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => CellValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Date32Array;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn guesses_cell_types() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("NaN"), CellValue::Null);
        assert_eq!(guess_cell_type("3"), CellValue::Integer(3));
        assert_eq!(guess_cell_type(" 16.99 "), CellValue::Float(16.99));
        assert_eq!(guess_cell_type("true"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("Sun"), CellValue::String("Sun".into()));
    }

    #[test]
    fn loads_csv_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "tips.csv",
            "total_bill,tip,day\n16.99,1.01,Sun\n10.34,,Sat\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names, vec!["total_bill", "tip", "day"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(1, "tip"), &CellValue::Null);
        assert_eq!(ds.cell(0, "day"), &CellValue::String("Sun".into()));
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "tips.json",
            r#"[{"total_bill": 20.5, "tip": 3, "day": "Fri"}, {"total_bill": null, "tip": 2.5, "day": "Sat"}]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names, vec!["total_bill", "tip", "day"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.numeric_values("total_bill").unwrap(), vec![20.5]);
        assert_eq!(ds.cell(0, "tip"), &CellValue::Integer(3));
    }

    fn write_parquet(dir: &tempfile::TempDir, name: &str, batch: &RecordBatch) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn loads_parquet_columns_in_schema_order() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("total_bill", DataType::Float64, true),
            Field::new("size", DataType::Int32, false),
            Field::new("day", DataType::Utf8, false),
            Field::new("tip", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(16.99), None])) as ArrayRef,
                Arc::new(Int32Array::from(vec![2, 3])),
                Arc::new(StringArray::from(vec!["Sun", "Sat"])),
                Arc::new(Float32Array::from(vec![1.5f32, 2.25])),
            ],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, "tips.parquet", &batch);

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.column_names, vec!["total_bill", "size", "day", "tip"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(0, "total_bill"), &CellValue::Float(16.99));
        assert_eq!(ds.cell(1, "total_bill"), &CellValue::Null);
        assert_eq!(ds.cell(1, "size"), &CellValue::Integer(3));
        assert_eq!(ds.cell(0, "day"), &CellValue::String("Sun".into()));
        assert_eq!(ds.cell(1, "tip"), &CellValue::Float(2.25));
        assert_eq!(ds.numeric_values("total_bill").unwrap(), vec![16.99]);
    }

    #[test]
    fn parquet_with_unsupported_column_type_fails() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "visited",
            DataType::Date32,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Date32Array::from(vec![19_000])) as ArrayRef],
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_parquet(&dir, "dates.pq", &batch);

        let err = load_file(&path).unwrap_err();

        assert!(format!("{err:#}").contains("unsupported column type"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "tips.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }
}
