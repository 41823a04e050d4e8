//! Conversions between our CSR format and external libraries
//!
//! Matrix-Market parsing is outside this crate; externally parsed matrices
//! arrive as `sprs::CsMat` and cross into the benchmark here.

use num_traits::Num;
use sprs::{CsMat, TriMat};

use crate::matrix::SparseMatrixCSR;

/// Converts our CSR matrix format to sprs CsMat format
///
/// Our format allows unsorted and duplicate column indices within a row;
/// sprs stores a canonical CSR. Conversion goes through triplet form, so
/// rows come out sorted and duplicate entries are summed.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num,
{
    let mut tri = TriMat::with_capacity((matrix.n_rows, matrix.n_cols), matrix.nnz());
    for i in 0..matrix.n_rows {
        for (col, &val) in matrix.row_iter(i) {
            tri.add_triplet(i, col, val);
        }
    }
    tri.to_csr()
}

/// Converts sprs CsMat (any storage order) to our SparseMatrixCSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}
