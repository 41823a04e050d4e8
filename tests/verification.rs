//! Integration tests for result verification

use spmv_bench::{constant_vector, reference_spmv, verify_results, MatrixGenerator};

#[test]
fn self_comparison_passes_at_any_tolerance() {
    let mut gen = MatrixGenerator::new(3);
    let m = gen.generate_random::<f64>(200, 10.0).unwrap();
    let v = constant_vector(200, 10.0);
    let reference = reference_spmv(&m, &v);

    for tolerance in [0.0, 1e-12, 1e-10, 1e-2] {
        let outcome = verify_results(&reference, &reference, tolerance);
        assert!(outcome.passed, "tolerance {} should pass", tolerance);
        assert_eq!(outcome.mismatch_count, 0);
    }
}

#[test]
fn single_divergent_entry_fails_with_lowest_index() {
    let reference: Vec<f64> = (1..=50).map(|i| i as f64).collect();
    let mut candidate = reference.clone();
    candidate[17] *= 1.0 + 1e-6;
    candidate[40] *= 1.0 + 1e-6;

    let outcome = verify_results(&reference, &candidate, 1e-10);
    assert!(!outcome.passed);
    assert_eq!(outcome.first_mismatch, Some(17));
    // The scan does not short-circuit at the first mismatch
    assert_eq!(outcome.mismatch_count, 2);
}

#[test]
fn tolerance_boundary_case() {
    // Relative error 1e-7 exceeds a 1e-10 tolerance
    let outcome = verify_results(&[10.0], &[10.000001], 1e-10);
    assert!(!outcome.passed);
    assert_eq!(outcome.first_mismatch, Some(0));
    assert_eq!(outcome.mismatch_count, 1);
}

#[test]
fn within_tolerance_passes() {
    // Relative error 1e-13 is inside a 1e-10 tolerance
    let outcome = verify_results(&[10.0], &[10.000000000001], 1e-10);
    assert!(outcome.passed);
}

#[test]
fn zero_reference_rows() {
    // A zero reference entry matched exactly passes (0/0 = NaN is not
    // greater than the tolerance); any deviation is an infinite relative
    // error and fails
    let reference = vec![0.0, 5.0, 0.0];

    let outcome = verify_results(&reference, &[0.0, 5.0, 0.0], 1e-10);
    assert!(outcome.passed);

    let outcome = verify_results(&reference, &[0.0, 5.0, 1e-300], 1e-10);
    assert!(!outcome.passed);
    assert_eq!(outcome.first_mismatch, Some(2));
    assert_eq!(outcome.mismatch_count, 1);
}
