//! Integration tests for the host reference SpMV

use spmv_bench::{constant_vector, reference_spmv, MatrixGenerator, SparseMatrixCSR};

#[test]
fn diagonal_matrix_times_ones() {
    // 4x4 diagonal: values [1,2,3,4] at columns [0,1,2,3]
    let m = SparseMatrixCSR::new(
        4,
        4,
        vec![0, 1, 2, 3, 4],
        vec![0, 1, 2, 3],
        vec![1.0, 2.0, 3.0, 4.0],
    );
    let v = vec![1.0, 1.0, 1.0, 1.0];

    assert_eq!(reference_spmv(&m, &v), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn reference_is_bit_deterministic() {
    let mut gen = MatrixGenerator::new(11);
    let m = gen.generate_random::<f64>(300, 10.0).unwrap();
    let v = constant_vector(300, 10.0);

    let first = reference_spmv(&m, &v);
    let second = reference_spmv(&m, &v);

    // Bit-identical, not merely within tolerance
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn reference_matches_dense_multiply() {
    let m = SparseMatrixCSR::new(
        3,
        3,
        vec![0, 2, 3, 5],
        vec![0, 1, 1, 0, 2],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
    );
    let v = vec![2.0, -1.0, 0.5];

    // Dense: [1 2 0; 0 3 0; 4 0 5] * [2, -1, 0.5]
    let mut dense = vec![vec![0.0; 3]; 3];
    for i in 0..3 {
        for (j, &val) in m.row_iter(i) {
            dense[i][j] = val;
        }
    }
    let expected: Vec<f64> = dense
        .iter()
        .map(|row| row.iter().zip(&v).map(|(a, b)| a * b).sum())
        .collect();

    assert_eq!(reference_spmv(&m, &v), expected);
}

#[test]
fn duplicate_columns_accumulate() {
    // Row 0 stores column 1 twice; both entries contribute
    let m = SparseMatrixCSR::new(1, 2, vec![0, 2], vec![1, 1], vec![3.0, 4.0]);
    let v = vec![0.0, 2.0];

    assert_eq!(reference_spmv(&m, &v), vec![14.0]);
}

#[test]
fn generated_matrix_row_sums_are_exact() {
    // Constant fill: every row sum is (row nnz) * max_val * max_val, exact
    // in floating point for these magnitudes
    let mut gen = MatrixGenerator::new(5);
    let m = gen.generate_random::<f64>(400, 10.0).unwrap();
    let v = constant_vector(400, 10.0);

    let out = reference_spmv(&m, &v);
    for i in 0..m.n_rows {
        assert_eq!(out[i], m.row_nnz(i) as f64 * 100.0);
    }
}
