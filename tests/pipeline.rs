//! End-to-end predictions: form inputs through the shipped classifier.

mod common;

use approx::assert_abs_diff_eq;
use churn_predict::model::sigmoid;
use churn_predict::report;
use churn_predict::{
    CATEGORICAL_POSITIONS, ChurnLabel, Department, EmployeeFeatures, FEATURE_COLUMNS,
    FeatureRecord, FeatureValue, InferenceError, SalaryLevel, assemble, infer, predict_employee,
};
use proptest::prelude::*;
use rstest::rstest;

fn scenario_a() -> EmployeeFeatures {
    EmployeeFeatures {
        satisfaction_level: 0.38,
        last_evaluation: 0.53,
        number_project: 2,
        average_monthly_hours: 157,
        time_spend_company: 3,
        work_accident: 0,
        promotion_last_5years: 0,
        department: Department::Sales,
        salary: SalaryLevel::Low,
    }
}

fn scenario_c() -> EmployeeFeatures {
    EmployeeFeatures {
        satisfaction_level: 0.0,
        last_evaluation: 1.0,
        number_project: 1,
        average_monthly_hours: 100,
        time_spend_company: 1,
        work_accident: 1,
        promotion_last_5years: 1,
        department: Department::RandD,
        salary: SalaryLevel::High,
    }
}

/// Record built from `assemble` with one column replaced.
fn with_column(input: &EmployeeFeatures, position: usize, name: &str) -> FeatureRecord {
    let record = assemble(input);
    let columns = record
        .iter()
        .enumerate()
        .map(|(i, (column, value))| {
            let column = if i == position { name } else { column };
            (column.to_string(), value.clone())
        })
        .collect::<Vec<_>>();
    FeatureRecord::from_columns(columns, &CATEGORICAL_POSITIONS)
}

#[test]
fn scenario_a_predicts_leave() {
    let model = common::load_model();
    let prediction = predict_employee(&model, &scenario_a()).unwrap();

    assert_eq!(prediction.label, ChurnLabel::Leave);
    assert_abs_diff_eq!(prediction.probability, sigmoid(0.5), epsilon = 1e-5);
    assert_eq!(
        report::render(&prediction),
        "Prediction: Employee will LEAVE the company (Confidence: 62.25%)"
    );
}

#[test]
fn default_form_predicts_stay() {
    let model = common::load_model();
    let prediction = predict_employee(&model, &EmployeeFeatures::default()).unwrap();

    assert_eq!(prediction.label, ChurnLabel::Stay);
    assert_abs_diff_eq!(prediction.probability, sigmoid(-2.0), epsilon = 1e-5);
    assert_eq!(
        report::render(&prediction),
        "Prediction: Employee will STAY with the company (Confidence: 88.08%)"
    );
}

#[test]
fn scenario_c_boundary_values() {
    let model = common::load_model();
    let prediction = predict_employee(&model, &scenario_c()).unwrap();

    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(prediction.label, ChurnLabel::Stay);
    assert_abs_diff_eq!(prediction.probability, sigmoid(-0.9), epsilon = 1e-5);
}

#[rstest]
#[case::corrected_spelling(3, "average_monthly_hours")]
#[case::capitalised(7, "department")]
#[case::lowercase_accident(5, "work_accident")]
fn renamed_column_is_rejected(#[case] position: usize, #[case] name: &str) {
    let model = common::load_model();
    let record = with_column(&scenario_a(), position, name);

    let err = infer(&model, &record).unwrap_err();
    match err {
        InferenceError::ColumnName {
            position: p,
            expected,
            found,
        } => {
            assert_eq!(p, position);
            assert_eq!(expected, FEATURE_COLUMNS[position]);
            assert_eq!(found, name);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reordered_columns_are_rejected() {
    let model = common::load_model();
    let record = assemble(&scenario_a());
    let mut columns = record
        .iter()
        .map(|(c, v)| (c, v.clone()))
        .collect::<Vec<_>>();
    columns.swap(0, 1);
    let record = FeatureRecord::from_columns(columns, &CATEGORICAL_POSITIONS);

    let err = infer(&model, &record).unwrap_err();
    assert!(
        matches!(err, InferenceError::ColumnName { position: 0, .. }),
        "got: {err:?}"
    );
}

#[test]
fn missing_column_is_rejected() {
    let model = common::load_model();
    let record = assemble(&scenario_a());
    let columns = record
        .iter()
        .take(8)
        .map(|(c, v)| (c, v.clone()))
        .collect::<Vec<_>>();
    let record = FeatureRecord::from_columns(columns, &[7]);

    let err = infer(&model, &record).unwrap_err();
    assert!(
        matches!(
            err,
            InferenceError::ColumnCount {
                expected: 9,
                found: 8
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn wrong_categorical_positions_are_rejected() {
    let model = common::load_model();
    let record = assemble(&scenario_a());
    let columns = record
        .iter()
        .map(|(c, v)| (c, v.clone()))
        .collect::<Vec<_>>();
    let record = FeatureRecord::from_columns(columns, &[8]);

    let err = infer(&model, &record).unwrap_err();
    assert!(
        matches!(err, InferenceError::CategoricalPositions { .. }),
        "got: {err:?}"
    );
}

#[test]
fn unknown_department_is_rejected() {
    let model = common::load_model();
    let record = assemble(&scenario_a());
    let columns = record
        .iter()
        .map(|(c, v)| {
            let v = if c == "Department" {
                FeatureValue::Category("legal".into())
            } else {
                v.clone()
            };
            (c, v)
        })
        .collect::<Vec<_>>();
    let record = FeatureRecord::from_columns(columns, &CATEGORICAL_POSITIONS);

    let err = infer(&model, &record).unwrap_err();
    assert!(
        matches!(err, InferenceError::UnknownCategory { ref column, .. } if column == "Department"),
        "got: {err:?}"
    );
}

#[test]
fn repeated_predictions_are_identical() {
    let model = common::load_model();
    let first = predict_employee(&model, &scenario_a()).unwrap();
    for _ in 0..10 {
        assert_eq!(predict_employee(&model, &scenario_a()).unwrap(), first);
    }
}

fn any_employee() -> impl Strategy<Value = EmployeeFeatures> {
    (
        0u32..=100,
        0u32..=100,
        1i64..=10,
        100i64..=400,
        1i64..=10,
        0u8..=1,
        0u8..=1,
        prop::sample::select(Department::ALL.to_vec()),
        prop::sample::select(SalaryLevel::ALL.to_vec()),
    )
        .prop_map(|(s, e, p, h, y, a, pr, d, sal)| EmployeeFeatures {
            satisfaction_level: f64::from(s) / 100.0,
            last_evaluation: f64::from(e) / 100.0,
            number_project: p,
            average_monthly_hours: h,
            time_spend_company: y,
            work_accident: a,
            promotion_last_5years: pr,
            department: d,
            salary: sal,
        })
}

proptest! {
    #[test]
    fn every_form_input_predicts(input in any_employee()) {
        let model = common::load_model();
        let prediction = predict_employee(&model, &input).unwrap();

        prop_assert!((0.0..=1.0).contains(&prediction.probability));
        prop_assert!((0.0..=1.0).contains(&prediction.confidence()));
        let expected = if prediction.probability > model.decision_threshold() {
            ChurnLabel::Leave
        } else {
            ChurnLabel::Stay
        };
        prop_assert_eq!(prediction.label, expected);

        let message = report::render(&prediction);
        prop_assert!(message.contains("LEAVE") ^ message.contains("STAY"));
        prop_assert!(message.ends_with("%)"));
    }
}
