//! Host (CPU) rendition of the device backend
//!
//! `HostDevice` implements [`SpmvDevice`] with rayon-parallel versions of
//! the three kernels operating on aligned copies of the host arrays. It is
//! what the demo binary and the integration tests run against: the ELLPACKR
//! kernel reads through [`linear_index`], so a layout bug in the conversion
//! surfaces as a verification failure rather than a silently wrong number.
//! Timings come from `std::time::Instant`, and every call runs to completion
//! before returning, matching the blocking contract of the trait.

use std::time::Instant;

use aligned_vec::AVec;
use num_traits::Float;
use rayon::prelude::*;

use crate::bench::backend::{Kernel, SpmvDevice, BLOCK_SIZE, MIN_VECTOR_GROUP, VECTOR_SIZE};
use crate::error::SpmvError;
use crate::matrix::{linear_index, EllpackrMatrix, SparseMatrixCSR};

/// Alignment for simulated device buffers
const BUFFER_ALIGN: usize = 64;

struct CsrBuffers<T> {
    values: AVec<T>,
    cols: AVec<usize>,
    row_ptr: AVec<usize>,
    vec: AVec<T>,
    n_rows: usize,
}

struct EllpackrBuffers<T> {
    values: AVec<T>,
    cols: AVec<usize>,
    row_lengths: AVec<usize>,
    vec: AVec<T>,
    n_rows_padded: usize,
}

enum Resident<T> {
    None,
    Csr(CsrBuffers<T>),
    Ellpackr(EllpackrBuffers<T>),
}

/// CPU-simulated accelerator backend
pub struct HostDevice<T> {
    max_work_group: usize,
    resident: Resident<T>,
    out: Vec<T>,
}

impl<T> HostDevice<T> {
    /// Creates a backend sized to the host machine
    ///
    /// The reported work-group size is the logical CPU count, but never
    /// below the vector-kernel threshold, so the default backend exercises
    /// all three kernels.
    pub fn new() -> Self {
        Self::with_max_work_group_size(num_cpus::get().max(MIN_VECTOR_GROUP))
    }

    /// Creates a backend reporting a specific work-group capability
    ///
    /// Sub-threshold values make the orchestrator skip the CSR-Vector
    /// kernel, which is how the capability gate is tested.
    pub fn with_max_work_group_size(max_work_group: usize) -> Self {
        Self {
            max_work_group,
            resident: Resident::None,
            out: Vec::new(),
        }
    }
}

impl<T> Default for HostDevice<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpmvDevice<T> for HostDevice<T>
where
    T: Float + Send + Sync,
{
    fn max_work_group_size(&self) -> usize {
        self.max_work_group
    }

    fn load_csr(&mut self, matrix: &SparseMatrixCSR<T>, vec: &[T]) -> Result<f64, SpmvError> {
        let start = Instant::now();

        self.resident = Resident::Csr(CsrBuffers {
            values: AVec::from_iter(BUFFER_ALIGN, matrix.values.iter().copied()),
            cols: AVec::from_iter(BUFFER_ALIGN, matrix.col_idx.iter().copied()),
            row_ptr: AVec::from_iter(BUFFER_ALIGN, matrix.row_ptr.iter().copied()),
            vec: AVec::from_iter(BUFFER_ALIGN, vec.iter().copied()),
            n_rows: matrix.n_rows,
        });
        self.out = vec![T::zero(); matrix.n_rows];

        Ok(start.elapsed().as_secs_f64())
    }

    fn load_ellpackr(&mut self, matrix: &EllpackrMatrix<T>, vec: &[T]) -> Result<f64, SpmvError> {
        let start = Instant::now();

        self.resident = Resident::Ellpackr(EllpackrBuffers {
            values: AVec::from_iter(BUFFER_ALIGN, matrix.values.iter().copied()),
            cols: AVec::from_iter(BUFFER_ALIGN, matrix.cols.iter().copied()),
            row_lengths: AVec::from_iter(BUFFER_ALIGN, matrix.row_lengths.iter().copied()),
            vec: AVec::from_iter(BUFFER_ALIGN, vec.iter().copied()),
            n_rows_padded: matrix.n_rows_padded,
        });
        self.out = vec![T::zero(); matrix.n_rows_padded];

        Ok(start.elapsed().as_secs_f64())
    }

    fn dispatch(&mut self, kernel: Kernel) -> Result<f64, SpmvError> {
        match (kernel, &self.resident) {
            (Kernel::CsrScalar, Resident::Csr(buf)) => {
                let start = Instant::now();
                let (values, cols, row_ptr, vec) =
                    (&buf.values[..], &buf.cols[..], &buf.row_ptr[..], &buf.vec[..]);

                // Rows go to worker threads in BLOCK_SIZE groups, the
                // dispatch granularity of the one-work-item-per-row kernels
                self.out = (0..buf.n_rows)
                    .into_par_iter()
                    .with_min_len(BLOCK_SIZE)
                    .map(|i| {
                        let mut t = T::zero();
                        for j in row_ptr[i]..row_ptr[i + 1] {
                            t = t + values[j] * vec[cols[j]];
                        }
                        t
                    })
                    .collect();

                Ok(start.elapsed().as_secs_f64())
            }
            (Kernel::CsrVector, Resident::Csr(buf)) => {
                let start = Instant::now();
                let (values, cols, row_ptr, vec) =
                    (&buf.values[..], &buf.cols[..], &buf.row_ptr[..], &buf.vec[..]);

                // One group per row: VECTOR_SIZE lanes accumulate strided
                // partials, then a lane reduction produces the row sum
                self.out = (0..buf.n_rows)
                    .into_par_iter()
                    .with_min_len(BLOCK_SIZE / VECTOR_SIZE)
                    .map(|i| {
                        let mut lanes = [T::zero(); VECTOR_SIZE];
                        for (k, j) in (row_ptr[i]..row_ptr[i + 1]).enumerate() {
                            lanes[k % VECTOR_SIZE] = lanes[k % VECTOR_SIZE] + values[j] * vec[cols[j]];
                        }
                        lanes.iter().fold(T::zero(), |acc, &lane| acc + lane)
                    })
                    .collect();

                Ok(start.elapsed().as_secs_f64())
            }
            (Kernel::Ellpackr, Resident::Ellpackr(buf)) => {
                let start = Instant::now();
                let (values, cols, row_lengths, vec) = (
                    &buf.values[..],
                    &buf.cols[..],
                    &buf.row_lengths[..],
                    &buf.vec[..],
                );
                let n_rows_padded = buf.n_rows_padded;

                self.out = (0..n_rows_padded)
                    .into_par_iter()
                    .with_min_len(BLOCK_SIZE)
                    .map(|r| {
                        let mut t = T::zero();
                        for k in 0..row_lengths[r] {
                            let idx = linear_index(r, k, n_rows_padded);
                            t = t + values[idx] * vec[cols[idx]];
                        }
                        t
                    })
                    .collect();

                Ok(start.elapsed().as_secs_f64())
            }
            _ => Err(SpmvError::Backend(format!(
                "operands for {} are not resident",
                kernel.name()
            ))),
        }
    }

    fn read_output(&mut self, n: usize) -> Result<(Vec<T>, f64), SpmvError> {
        if self.out.len() < n {
            return Err(SpmvError::Backend(format!(
                "output buffer holds {} entries, {} requested",
                self.out.len(),
                n
            )));
        }

        let start = Instant::now();
        let out = self.out[..n].to_vec();
        Ok((out, start.elapsed().as_secs_f64()))
    }

    fn release_buffers(&mut self) {
        self.resident = Resident::None;
        self.out = Vec::new();
    }
}
