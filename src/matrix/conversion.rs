//! Conversion functions between matrix formats
//!
//! CSR is the canonical input format; the benchmark derives two layouts from
//! it. `to_padded` rounds the row count up to a multiple of a pad factor so
//! kernels can be dispatched with an aligned global work size. `to_ellpackr`
//! repacks the rows into the column-major fixed-width ELLPACKR layout. Both
//! transforms are pure: they never mutate the source matrix.

use std::fmt;

use num_traits::Num;

use crate::error::SpmvError;
use crate::matrix::ellpackr::{linear_index, EllpackrMatrix};
use crate::matrix::SparseMatrixCSR;

/// A CSR matrix whose row count has been rounded up to a multiple of a pad
/// factor
///
/// The appended rows are empty: `row_ptr` repeats the final offset, and no
/// values or column indices are added. Used to test kernel behavior under a
/// dispatch-size-aligned row count.
#[derive(Clone)]
pub struct PaddedCsr<T> {
    /// The padded matrix; `matrix.n_rows` is a multiple of `pad_factor`
    pub matrix: SparseMatrixCSR<T>,

    /// Row count of the source matrix
    pub n_rows_orig: usize,

    /// Pad factor the row count was rounded to
    pub pad_factor: usize,
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for PaddedCsr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PaddedCsr {{")?;
        writeln!(f, "  original rows: {}", self.n_rows_orig)?;
        writeln!(f, "  pad factor: {}", self.pad_factor)?;
        writeln!(f, "  matrix: {:?}", self.matrix)?;
        write!(f, "}}")
    }
}

/// Rounds `n_rows` up to a multiple of `pad_factor`
///
/// An exact multiple is returned unchanged; no extra pad block is added.
pub fn padded_row_count(n_rows: usize, pad_factor: usize) -> usize {
    if n_rows % pad_factor == 0 {
        n_rows
    } else {
        n_rows + (pad_factor - n_rows % pad_factor)
    }
}

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Derives a row-padded copy of this matrix
    ///
    /// The padded row count is `n_rows` rounded up to a multiple of
    /// `pad_factor` (unchanged when already a multiple). Every original
    /// non-zero keeps its value and column index; pad rows contribute
    /// nothing.
    pub fn to_padded(&self, pad_factor: usize) -> Result<PaddedCsr<T>, SpmvError> {
        if pad_factor == 0 {
            return Err(SpmvError::InvalidDimension(
                "pad factor must be positive".to_string(),
            ));
        }

        let n_rows_padded = padded_row_count(self.n_rows, pad_factor);

        let mut row_ptr = Vec::with_capacity(n_rows_padded + 1);
        row_ptr.extend_from_slice(&self.row_ptr);
        // Pad rows are empty: repeat the final offset
        row_ptr.resize(n_rows_padded + 1, self.row_ptr[self.n_rows]);

        let matrix = SparseMatrixCSR::new(
            n_rows_padded,
            self.n_cols,
            row_ptr,
            self.col_idx.clone(),
            self.values.clone(),
        );

        Ok(PaddedCsr {
            matrix,
            n_rows_orig: self.n_rows,
            pad_factor,
        })
    }

    /// Derives the column-major ELLPACKR layout of this matrix
    ///
    /// `n_rows_padded` is the leading dimension of the layout and must be at
    /// least `n_rows`; rows in `[n_rows, n_rows_padded)` get length 0. Each
    /// row's entries are copied into slots `0..row_lengths[r]` in stored
    /// order; every remaining slot is zero-value / column-0 padding.
    pub fn to_ellpackr(&self, n_rows_padded: usize) -> Result<EllpackrMatrix<T>, SpmvError> {
        if n_rows_padded < self.n_rows {
            return Err(SpmvError::InvalidDimension(format!(
                "padded row count {} is below matrix row count {}",
                n_rows_padded, self.n_rows
            )));
        }

        let mut row_lengths = Vec::with_capacity(n_rows_padded);
        let mut max_row_len = 0;
        for i in 0..self.n_rows {
            let len = self.row_ptr[i + 1] - self.row_ptr[i];
            if len > max_row_len {
                max_row_len = len;
            }
            row_lengths.push(len);
        }
        row_lengths.resize(n_rows_padded, 0);

        let flat_len = max_row_len.checked_mul(n_rows_padded).ok_or_else(|| {
            SpmvError::AllocationFailure(format!(
                "ELLPACKR array size {} x {} overflows",
                max_row_len, n_rows_padded
            ))
        })?;

        let mut values: Vec<T> = Vec::new();
        values
            .try_reserve_exact(flat_len)
            .map_err(|e| SpmvError::AllocationFailure(e.to_string()))?;
        values.resize(flat_len, T::zero());

        let mut cols: Vec<usize> = Vec::new();
        cols.try_reserve_exact(flat_len)
            .map_err(|e| SpmvError::AllocationFailure(e.to_string()))?;
        cols.resize(flat_len, 0);

        for r in 0..self.n_rows {
            let start = self.row_ptr[r];
            for k in 0..row_lengths[r] {
                let idx = linear_index(r, k, n_rows_padded);
                values[idx] = self.values[start + k];
                cols[idx] = self.col_idx[start + k];
            }
        }

        Ok(EllpackrMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            n_rows_padded,
            max_row_len,
            row_lengths,
            values,
            cols,
        })
    }
}

impl<T: Copy + Num> EllpackrMatrix<T> {
    /// Reconstructs the source CSR matrix, dropping padding slots
    ///
    /// Uses `row_lengths` to take exactly the stored entries of each of the
    /// original `n_rows` rows, in slot order. Together with `to_ellpackr`
    /// this is an exact round trip.
    pub fn to_csr(&self) -> SparseMatrixCSR<T> {
        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());

        row_ptr.push(0);
        for r in 0..self.n_rows {
            for (col, val) in self.row_iter(r) {
                col_idx.push(col);
                values.push(val);
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrixCSR::new(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csr() -> SparseMatrixCSR<f64> {
        // [1 2 0]
        // [0 3 0]
        // [4 0 5]
        SparseMatrixCSR::new(
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        )
    }

    #[test]
    fn test_padded_row_count_boundaries() {
        assert_eq!(padded_row_count(33, 32), 64);
        assert_eq!(padded_row_count(32, 32), 32);
        assert_eq!(padded_row_count(1, 16), 16);
        assert_eq!(padded_row_count(17, 16), 32);
    }

    #[test]
    fn test_to_padded_appends_empty_rows() {
        let csr = sample_csr();
        let padded = csr.to_padded(4).unwrap();

        assert_eq!(padded.n_rows_orig, 3);
        assert_eq!(padded.matrix.n_rows, 4);
        assert_eq!(padded.matrix.nnz(), csr.nnz());
        assert_eq!(padded.matrix.row_ptr, vec![0, 2, 3, 5, 5]);
        assert_eq!(padded.matrix.col_idx, csr.col_idx);
        assert_eq!(padded.matrix.values, csr.values);
    }

    #[test]
    fn test_padded_debug_format() {
        let padded = sample_csr().to_padded(4).unwrap();
        let text = format!("{:?}", padded);
        assert!(text.contains("original rows: 3"));
        assert!(text.contains("pad factor: 4"));
    }

    #[test]
    fn test_to_padded_rejects_zero_factor() {
        let csr = sample_csr();
        assert!(matches!(
            csr.to_padded(0),
            Err(SpmvError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_to_ellpackr_layout() {
        let csr = sample_csr();
        let ell = csr.to_ellpackr(4).unwrap();

        assert_eq!(ell.n_rows_padded, 4);
        assert_eq!(ell.max_row_len, 2);
        assert_eq!(ell.row_lengths, vec![2, 1, 2, 0]);

        // Column-major: slot 0 holds the first entry of every row
        assert_eq!(ell.values[linear_index(0, 0, 4)], 1.0);
        assert_eq!(ell.values[linear_index(1, 0, 4)], 3.0);
        assert_eq!(ell.values[linear_index(2, 0, 4)], 4.0);
        assert_eq!(ell.values[linear_index(0, 1, 4)], 2.0);
        assert_eq!(ell.values[linear_index(2, 1, 4)], 5.0);

        // Padding slots are finite zero / column 0
        assert_eq!(ell.values[linear_index(3, 0, 4)], 0.0);
        assert_eq!(ell.cols[linear_index(3, 1, 4)], 0);
        assert_eq!(ell.values[linear_index(1, 1, 4)], 0.0);
    }

    #[test]
    fn test_to_ellpackr_rejects_short_padding() {
        let csr = sample_csr();
        assert!(matches!(
            csr.to_ellpackr(2),
            Err(SpmvError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_ellpackr_roundtrip() {
        let csr = sample_csr();
        let ell = csr.to_ellpackr(8).unwrap();
        let back = ell.to_csr();

        assert_eq!(back.n_rows, csr.n_rows);
        assert_eq!(back.n_cols, csr.n_cols);
        assert_eq!(back.row_ptr, csr.row_ptr);
        assert_eq!(back.col_idx, csr.col_idx);
        assert_eq!(back.values, csr.values);
    }

    #[test]
    fn test_empty_matrix_converts() {
        let csr = SparseMatrixCSR::<f64>::zeros(5, 5);
        let ell = csr.to_ellpackr(8).unwrap();
        assert_eq!(ell.max_row_len, 0);
        assert_eq!(ell.values.len(), 0);
        assert_eq!(ell.to_csr().nnz(), 0);
    }
}
