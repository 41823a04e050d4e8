//! Device backend seam
//!
//! The benchmark core never talks to an accelerator API directly. Everything
//! it needs from a device is behind [`SpmvDevice`]: timed buffer transfers,
//! timed blocking kernel dispatch, a timed result read-back, and one
//! capability query. Every call blocks until the device has finished, so
//! each iteration's timing is measured in isolation and the orchestrator
//! never pipelines overlapping dispatches.

use crate::error::SpmvError;
use crate::matrix::{EllpackrMatrix, SparseMatrixCSR};

/// Work-items per work-group for scalar and ELLPACKR dispatches
pub const BLOCK_SIZE: usize = 128;

/// Work-items cooperating on a single row in the CSR-Vector kernel
pub const VECTOR_SIZE: usize = 32;

/// Minimum work-group size required to run the CSR-Vector kernel
///
/// Devices below this granularity get the kernel reported as skipped, not
/// failed.
pub const MIN_VECTOR_GROUP: usize = 32;

/// The three kernels of the SpMV kernel library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// One work-item per row over CSR operands
    CsrScalar,
    /// One work-group (VECTOR_SIZE lanes) per row over CSR operands
    CsrVector,
    /// One work-item per row over column-major ELLPACKR operands
    Ellpackr,
}

impl Kernel {
    /// Kernel-library entry point name
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::CsrScalar => "spmv_csr_scalar_kernel",
            Kernel::CsrVector => "spmv_csr_vector_kernel",
            Kernel::Ellpackr => "spmv_ellpackr_kernel",
        }
    }
}

/// A blocking accelerator backend for the SpMV benchmark
///
/// Transfer and dispatch methods return the measured elapsed time in
/// seconds. Loading operands replaces whatever was previously resident;
/// `release_buffers` drops device-side state at configuration teardown.
pub trait SpmvDevice<T> {
    /// Maximum dispatch granularity (work-group size) the device supports
    fn max_work_group_size(&self) -> usize;

    /// Transfers CSR operands and the dense vector to the device
    ///
    /// Returns the summed elapsed transfer time in seconds.
    fn load_csr(&mut self, matrix: &SparseMatrixCSR<T>, vec: &[T]) -> Result<f64, SpmvError>;

    /// Transfers ELLPACKR operands and the dense vector to the device
    ///
    /// Returns the summed elapsed transfer time in seconds.
    fn load_ellpackr(&mut self, matrix: &EllpackrMatrix<T>, vec: &[T]) -> Result<f64, SpmvError>;

    /// Runs one kernel dispatch to completion
    ///
    /// Returns the elapsed kernel time in seconds. Fails if the kernel's
    /// operand format is not resident.
    fn dispatch(&mut self, kernel: Kernel) -> Result<f64, SpmvError>;

    /// Reads the first `n` entries of the output vector back to the host
    ///
    /// Returns the output and the elapsed transfer time in seconds.
    fn read_output(&mut self, n: usize) -> Result<(Vec<T>, f64), SpmvError>;

    /// Drops device-side buffers at configuration teardown
    fn release_buffers(&mut self);
}
