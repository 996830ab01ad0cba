//! Property-based tests for moment computation and shape classification
//!
//! These tests verify invariants that should hold for all inputs:
//! - Sample standard deviation is never negative
//! - Computation is deterministic on the same input
//! - Missing entries never change the result
//! - Every (skewness, kurtosis) pair gets exactly one label of each kind

use proptest::prelude::*;
use tips_report::data::model::{CellValue, Dataset, Record};
use tips_report::stats::moments::{moments_of, statistical_analysis};
use tips_report::stats::shape::{KurtosisKind, Shape, SkewKind, SHAPE_THRESHOLD};

fn dataset_of(cells: &[CellValue]) -> Dataset {
    let records: Vec<Record> = cells
        .iter()
        .map(|c| [("total_bill".to_string(), c.clone())].into_iter().collect())
        .collect();
    Dataset::from_records(vec!["total_bill".to_string()], records)
}

fn sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e4..1.0e4f64, 2..60)
}

proptest! {
    #[test]
    fn prop_std_dev_is_non_negative(values in sample()) {
        let m = moments_of(&values).unwrap();
        prop_assert!(m.std_dev >= 0.0);
    }

    #[test]
    fn prop_moments_are_deterministic(values in sample()) {
        let cells: Vec<CellValue> = values.iter().copied().map(CellValue::Float).collect();
        let ds = dataset_of(&cells);
        let first = statistical_analysis(&ds, "total_bill").unwrap();
        let second = statistical_analysis(&ds, "total_bill").unwrap();
        prop_assert_eq!(first.mean.to_bits(), second.mean.to_bits());
        prop_assert_eq!(first.std_dev.to_bits(), second.std_dev.to_bits());
        prop_assert_eq!(first.skewness.to_bits(), second.skewness.to_bits());
        prop_assert_eq!(first.excess_kurtosis.to_bits(), second.excess_kurtosis.to_bits());
    }

    #[test]
    fn prop_missing_cells_are_ignored(values in sample(), gaps in prop::collection::vec(any::<bool>(), 60)) {
        let mut cells = Vec::new();
        for (v, gap) in values.iter().zip(&gaps) {
            if *gap {
                cells.push(CellValue::Null);
            }
            cells.push(CellValue::Float(*v));
        }
        let with_gaps = statistical_analysis(&dataset_of(&cells), "total_bill").unwrap();
        let dense = moments_of(&values).unwrap();
        prop_assert_eq!(with_gaps.count, values.len());
        prop_assert_eq!(with_gaps.mean.to_bits(), dense.mean.to_bits());
        prop_assert_eq!(with_gaps.std_dev.to_bits(), dense.std_dev.to_bits());
    }

    #[test]
    fn prop_classifier_is_total(skew in any::<f64>(), kurt in any::<f64>()) {
        let shape = Shape::classify(skew, kurt);

        let expected_skew = if skew.is_nan() || skew.abs() < SHAPE_THRESHOLD {
            SkewKind::ApproximatelySymmetric
        } else if skew >= SHAPE_THRESHOLD {
            SkewKind::RightSkewed
        } else {
            SkewKind::LeftSkewed
        };
        let expected_kurt = if kurt > SHAPE_THRESHOLD {
            KurtosisKind::Leptokurtic
        } else if kurt < -SHAPE_THRESHOLD {
            KurtosisKind::Platykurtic
        } else {
            KurtosisKind::Mesokurtic
        };
        prop_assert_eq!(shape.skew, expected_skew);
        prop_assert_eq!(shape.kurtosis, expected_kurt);
    }

    #[test]
    fn prop_constant_column_is_symmetric_and_mesokurtic(v in -1.0e6..1.0e6f64, n in 2usize..30) {
        let m = moments_of(&vec![v; n]).unwrap();
        prop_assert_eq!(m.std_dev, 0.0);
        prop_assert!(m.skewness.is_nan());
        prop_assert!(m.excess_kurtosis.is_nan());
        let shape = Shape::of(&m);
        prop_assert_eq!(shape.skew, SkewKind::ApproximatelySymmetric);
        prop_assert_eq!(shape.kurtosis, KurtosisKind::Mesokurtic);
    }
}

#[test]
fn threshold_values_resolve_consistently() {
    assert_eq!(Shape::classify(0.5, 0.5).skew, SkewKind::RightSkewed);
    assert_eq!(Shape::classify(-0.5, 0.5).skew, SkewKind::LeftSkewed);
    assert_eq!(Shape::classify(0.0, 0.5).kurtosis, KurtosisKind::Mesokurtic);
    assert_eq!(Shape::classify(0.0, -0.5).kurtosis, KurtosisKind::Mesokurtic);
}
