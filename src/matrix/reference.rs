//! Reference implementation of SpMV on the host
//!
//! This provides the ground truth that every device result is verified
//! against. It is computed once per run and reused across all format
//! configurations; the tolerance check depends on that single stable
//! reference.

use num_traits::Num;
use std::ops::AddAssign;

use crate::matrix::SparseMatrixCSR;

/// Computes `out[i] = Σ values[j] * vec[col_idx[j]]` over row i's entries
///
/// Accumulation follows the stored (index-ascending) order within each row,
/// so repeated calls on identical inputs are bit-identical. O(nnz) time,
/// O(n_rows) extra space.
///
/// # Panics
///
/// Panics if `vec.len()` does not match the matrix column count.
pub fn reference_spmv<T>(matrix: &SparseMatrixCSR<T>, vec: &[T]) -> Vec<T>
where
    T: Copy + Num + AddAssign,
{
    assert_eq!(
        vec.len(),
        matrix.n_cols,
        "vector length must equal matrix column count"
    );

    let mut out = Vec::with_capacity(matrix.n_rows);
    for i in 0..matrix.n_rows {
        let mut t = T::zero();
        for j in matrix.row_ptr[i]..matrix.row_ptr[i + 1] {
            t += matrix.values[j] * vec[matrix.col_idx[j]];
        }
        out.push(t);
    }

    out
}
