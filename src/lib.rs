//! # SpMV Benchmark Core
//!
//! Host-side core of a sparse matrix–vector multiplication (SpMV) benchmark
//! that measures CSR and ELLPACKR kernels on an accelerator device, in
//! GFLOP/s with and without host–device transfer overhead.
//!
//! ## Components
//!
//! - **Format conversion**: CSR → row-padded CSR and CSR → column-major
//!   ELLPACKR, with the layout contract (`linear_index`) a device kernel
//!   depends on made explicit.
//! - **Generation and reference**: seeded random matrix generation and the
//!   host SpMV that serves as the run's single ground truth.
//! - **Verification**: relative-error comparison of device output against
//!   the reference.
//! - **Orchestration**: the multi-pass, multi-iteration benchmark loop over
//!   all format configurations, reporting through [`ResultDatabase`].
//!
//! The accelerator itself sits behind the [`SpmvDevice`] trait;
//! [`HostDevice`] is a rayon-parallel CPU rendition used by the demo binary
//! and the tests.
//!
//! ## Usage
//!
//! ```
//! use spmv_bench::{
//!     BenchmarkConfig, HostDevice, MatrixGenerator, ResultDatabase, SpmvBenchmark,
//!     constant_vector,
//! };
//!
//! let mut gen = MatrixGenerator::new(42);
//! let matrix = gen.generate_random::<f64>(100, 10.0).unwrap();
//! let vec = constant_vector(100, 10.0);
//!
//! let config = BenchmarkConfig { passes: 1, iterations: 2, ..Default::default() };
//! let bench = SpmvBenchmark::new(matrix, vec, config);
//!
//! let mut device = HostDevice::new();
//! let mut db = ResultDatabase::new();
//! let summary = bench.run(&mut device, &mut db).unwrap();
//! assert!(summary.all_passed());
//! ```

pub mod bench;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod verify;

// Re-export primary components
pub use bench::{
    BenchResult, BenchmarkConfig, ConfigStatus, HostDevice, Kernel, ResultDatabase, RunSummary,
    SpmvBenchmark, SpmvDevice, BLOCK_SIZE, MIN_VECTOR_GROUP, VECTOR_SIZE,
};
pub use error::SpmvError;
pub use matrix::{
    constant_vector, linear_index, padded_row_count, reference_spmv, EllpackrMatrix,
    MatrixGenerator, PaddedCsr, SparseMatrixCSR,
};
pub use utils::{from_sprs_csr, to_sprs_csr};
pub use verify::{verify_results, VerificationOutcome};

/// Version information for the benchmark library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
