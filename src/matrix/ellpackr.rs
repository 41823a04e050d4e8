//! ELLPACKR sparse matrix format
//!
//! ELLPACKR stores each row in a fixed-width band of `max_row_len` slots with
//! an explicit per-row length, laid out column-major so that consecutive rows
//! of the same slot are adjacent in memory. That gives a device kernel a
//! uniform stride when one execution lane handles one row: lane r reads slot
//! k at `linear_index(r, k, n_rows_padded)`.

use std::fmt;
use num_traits::Num;

/// Maps (row, slot) to a position in the flat column-major arrays.
///
/// The layout contract is `slot * n_rows_padded + row`: all rows' slot-0
/// entries first, then all slot-1 entries, and so on. Kept as a free function
/// so host code and backend kernels share one definition.
#[inline]
pub fn linear_index(row: usize, slot: usize, n_rows_padded: usize) -> usize {
    slot * n_rows_padded + row
}

/// A sparse matrix in ELLPACKR format, derived from a CSR matrix
///
/// `values` and `cols` are flat arrays of length
/// `max_row_len * n_rows_padded`. Slot k of row r lives at
/// `linear_index(r, k, n_rows_padded)`. Slots at or beyond `row_lengths[r]`
/// are padding: zero value, column 0, all finite and well-defined, so a
/// device kernel that overreads never touches uninitialized memory.
#[derive(Clone)]
pub struct EllpackrMatrix<T> {
    /// Number of rows in the source matrix
    pub n_rows: usize,

    /// Number of columns in the source matrix
    pub n_cols: usize,

    /// Row count after padding; `>= n_rows`, and the leading dimension of
    /// the column-major layout
    pub n_rows_padded: usize,

    /// Widest row of the source matrix (slots per row)
    pub max_row_len: usize,

    /// Stored entry count per row (size: n_rows_padded, 0 for pad rows)
    pub row_lengths: Vec<usize>,

    /// Non-zero values, column-major (size: max_row_len * n_rows_padded)
    pub values: Vec<T>,

    /// Column indices, column-major (size: max_row_len * n_rows_padded)
    pub cols: Vec<usize>,
}

impl<T> EllpackrMatrix<T>
where
    T: Copy + Num,
{
    /// Returns the number of non-zero elements (padding slots excluded)
    pub fn nnz(&self) -> usize {
        self.row_lengths.iter().sum()
    }

    /// Returns the (column, value) entry stored at slot `k` of row `r`
    ///
    /// Padding slots are returned as stored: `(0, T::zero())`.
    pub fn slot(&self, r: usize, k: usize) -> (usize, T) {
        assert!(r < self.n_rows_padded, "Row index out of bounds");
        assert!(k < self.max_row_len, "Slot index out of bounds");

        let idx = linear_index(r, k, self.n_rows_padded);
        (self.cols[idx], self.values[idx])
    }

    /// Returns an iterator over the stored entries of row `r`, skipping
    /// padding slots
    pub fn row_iter(&self, r: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        assert!(r < self.n_rows_padded, "Row index out of bounds");

        (0..self.row_lengths[r]).map(move |k| {
            let idx = linear_index(r, k, self.n_rows_padded);
            (self.cols[idx], self.values[idx])
        })
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for EllpackrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EllpackrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  padded rows: {}", self.n_rows_padded)?;
        writeln!(f, "  max row length: {}", self.max_row_len)?;
        writeln!(f, "  nnz: {}", self.nnz())?;
        write!(f, "}}")
    }
}
