//! Synthetic sparse matrix generation
//!
//! The benchmark either reads an externally parsed matrix or generates a
//! random square one. Generation is seeded so that every run (and every
//! backend under test) sees the same matrix.

use num_traits::Num;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::SpmvError;
use crate::matrix::SparseMatrixCSR;
use crate::utils::exclusive_scan;

/// Generates random sparse matrices with a seeded RNG
pub struct MatrixGenerator {
    rng: ChaCha8Rng,
}

impl MatrixGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates a random square matrix with ~1% density
    ///
    /// Produces exactly `n_rows * n_rows / 100` entries (integer
    /// truncation), scattered uniformly over rows, each with a uniform
    /// random column index and the constant value `max_val`. The constant
    /// fill keeps row sums independent of accumulation order, so device and
    /// host results stay comparable at tight tolerances across repeated
    /// runs. Column indices within a row are unsorted and may repeat.
    pub fn generate_random<T>(
        &mut self,
        n_rows: usize,
        max_val: T,
    ) -> Result<SparseMatrixCSR<T>, SpmvError>
    where
        T: Copy + Num,
    {
        if n_rows == 0 {
            return Err(SpmvError::InvalidDimension(
                "generated matrix must have at least one row".to_string(),
            ));
        }

        let nnz = n_rows * n_rows / 100;
        let row_dist = Uniform::from(0..n_rows);
        let col_dist = Uniform::from(0..n_rows);

        // Scatter the entry count over rows, then lay the rows out with a
        // prefix sum
        let mut row_counts = vec![0usize; n_rows];
        for _ in 0..nnz {
            row_counts[row_dist.sample(&mut self.rng)] += 1;
        }
        let row_ptr = exclusive_scan(&row_counts);

        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for _ in 0..nnz {
            col_idx.push(col_dist.sample(&mut self.rng));
            values.push(max_val);
        }

        Ok(SparseMatrixCSR::new(n_rows, n_rows, row_ptr, col_idx, values))
    }
}

/// Builds the dense multiplicand vector
///
/// The original benchmark fills the vector with the same constant used for
/// the matrix values.
pub fn constant_vector<T: Copy>(n: usize, value: T) -> Vec<T> {
    vec![value; n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nnz_count_is_one_percent_truncated() {
        let mut gen = MatrixGenerator::new(7);
        let m = gen.generate_random::<f64>(250, 10.0).unwrap();
        assert_eq!(m.nnz(), 250 * 250 / 100);
        assert_eq!(m.n_rows, 250);
        assert_eq!(m.n_cols, 250);

        // Small matrices truncate to zero entries but stay valid
        let tiny = gen.generate_random::<f64>(9, 10.0).unwrap();
        assert_eq!(tiny.nnz(), 0);
        assert_eq!(tiny.row_ptr, vec![0; 10]);
    }

    #[test]
    fn test_constant_fill() {
        let mut gen = MatrixGenerator::new(1);
        let m = gen.generate_random::<f64>(100, 3.5).unwrap();
        assert!(m.values.iter().all(|&v| v == 3.5));
        assert!(m.col_idx.iter().all(|&c| c < 100));
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = MatrixGenerator::new(42).generate_random::<f64>(120, 10.0).unwrap();
        let b = MatrixGenerator::new(42).generate_random::<f64>(120, 10.0).unwrap();
        assert_eq!(a.row_ptr, b.row_ptr);
        assert_eq!(a.col_idx, b.col_idx);
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let mut gen = MatrixGenerator::new(0);
        assert!(matches!(
            gen.generate_random::<f64>(0, 1.0),
            Err(SpmvError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_constant_vector() {
        assert_eq!(constant_vector(3, 2.0f64), vec![2.0, 2.0, 2.0]);
    }
}
