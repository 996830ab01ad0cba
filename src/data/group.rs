use super::model::{CellValue, DataError, Dataset};

// ---------------------------------------------------------------------------
// Group-by: numeric values bucketed by a categorical column
// ---------------------------------------------------------------------------

/// One category and the non-missing numeric values observed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: CellValue,
    pub values: Vec<f64>,
}

/// Bucket the numeric `value` column by the categorical `category` column.
///
/// Groups appear in order of first appearance. Rows with a missing value are
/// skipped; a missing category is kept under a `Null` label.
pub fn group_by(dataset: &Dataset, category: &str, value: &str) -> Result<Vec<Group>, DataError> {
    dataset.require_columns(&[category, value])?;

    let mut groups: Vec<Group> = Vec::new();
    for row in 0..dataset.len() {
        let cell = dataset.cell(row, value);
        if cell.is_missing() {
            continue;
        }
        let v = cell.as_f64().ok_or_else(|| DataError::NotNumeric {
            column: value.to_string(),
            row,
            value: cell.to_string(),
        })?;

        let label = match dataset.cell(row, category) {
            c if c.is_missing() => CellValue::Null,
            c => c.clone(),
        };
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.values.push(v),
            None => groups.push(Group {
                label,
                values: vec![v],
            }),
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn row(day: CellValue, tip: CellValue) -> Record {
        [("day".to_string(), day), ("tip".to_string(), tip)]
            .into_iter()
            .collect()
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let s = |v: &str| CellValue::String(v.into());
        let ds = Dataset::from_records(
            vec!["day".into(), "tip".into()],
            vec![
                row(s("Sun"), CellValue::Float(1.0)),
                row(s("Sat"), CellValue::Float(2.0)),
                row(s("Sun"), CellValue::Float(3.0)),
                row(s("Thur"), CellValue::Null),
                row(CellValue::Null, CellValue::Integer(4)),
            ],
        );
        let groups = group_by(&ds, "day", "tip").unwrap();
        let labels: Vec<String> = groups.iter().map(|g| g.label.to_string()).collect();
        assert_eq!(labels, vec!["Sun", "Sat", "NaN"]);
        assert_eq!(groups[0].values, vec![1.0, 3.0]);
        assert_eq!(groups[2].values, vec![4.0]);
    }

    #[test]
    fn numeric_categories_group_by_value() {
        let ds = Dataset::from_records(
            vec!["day".into(), "tip".into()],
            vec![
                row(CellValue::Integer(2), CellValue::Float(1.0)),
                row(CellValue::Integer(3), CellValue::Float(2.0)),
                row(CellValue::Integer(2), CellValue::Float(3.0)),
                row(CellValue::Float(f64::NAN), CellValue::Float(4.0)),
                row(CellValue::Null, CellValue::Float(5.0)),
            ],
        );
        let groups = group_by(&ds, "day", "tip").unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, CellValue::Integer(2));
        assert_eq!(groups[0].values, vec![1.0, 3.0]);
        assert_eq!(groups[2].label, CellValue::Null);
        assert_eq!(groups[2].values, vec![4.0, 5.0]);
    }

    #[test]
    fn missing_category_column_fails() {
        let ds = Dataset::from_records(vec!["tip".into()], vec![]);
        assert_eq!(
            group_by(&ds, "day", "tip"),
            Err(DataError::ColumnNotFound("day".into()))
        );
    }
}
