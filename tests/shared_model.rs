//! The process-wide classifier.
//!
//! Everything touching the shared cache lives in this one test binary so the
//! load count is not disturbed by other tests.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use churn_predict::cache::shared_cache;
use churn_predict::{EmployeeFeatures, InferenceError, predict_employee, shared_model};

#[test]
fn loads_once_across_threads() {
    // A failed load must not poison later attempts.
    let err = shared_model("models/does_not_exist.json").unwrap_err();
    assert!(matches!(err, InferenceError::Load(_)), "got: {err:?}");
    assert!(!shared_cache().is_loaded());

    let n_threads = 8;
    let barrier = Arc::new(Barrier::new(n_threads));
    let handles: Vec<_> = (0..n_threads)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                shared_model(common::model_path()).unwrap()
            })
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for model in &models[1..] {
        assert!(Arc::ptr_eq(&models[0], model));
    }
    assert_eq!(shared_cache().load_count(), 1);

    // Later calls ignore the path once loaded.
    let again = shared_model("models/does_not_exist.json").unwrap();
    assert!(Arc::ptr_eq(&models[0], &again));
    assert_eq!(shared_cache().load_count(), 1);

    let prediction = predict_employee(again.as_ref(), &EmployeeFeatures::default()).unwrap();
    assert!((0.0..=1.0).contains(&prediction.probability));
}
