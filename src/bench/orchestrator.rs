//! Benchmark orchestration
//!
//! Per configuration the state machine is Setup → {Transfer, Execute,
//! Verify} repeated per pass → Report → Teardown. Derived layouts are built
//! once in Setup and transferred once; each pass runs `iterations`
//! back-to-back dispatches, reads the output back, verifies it against the
//! single per-run reference, and records two throughput rows. A failed
//! verification marks that configuration failed and skips its remaining
//! passes; sibling configurations still run.

use std::mem;
use std::ops::AddAssign;

use num_traits::Float;

use crate::bench::backend::{Kernel, SpmvDevice, MIN_VECTOR_GROUP};
use crate::bench::results::ResultDatabase;
use crate::error::SpmvError;
use crate::matrix::{padded_row_count, reference_spmv, SparseMatrixCSR};
use crate::verify::verify_results;

/// Knobs for one benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Measured passes per configuration; each pass is verified and
    /// reported independently
    pub passes: usize,

    /// Kernel dispatches averaged into one pass's kernel time
    pub iterations: usize,

    /// Maximum allowed relative error per output entry
    pub tolerance: f64,

    /// Row-count pad factor for the padded configurations
    pub pad_factor: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            passes: 10,
            iterations: 100,
            tolerance: 1e-10,
            pad_factor: 16,
        }
    }
}

/// Terminal state of one benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    /// Every pass verified within tolerance
    Passed,
    /// Verification diverged; remaining passes were not reported
    Failed {
        pass: usize,
        first_mismatch: Option<usize>,
    },
    /// The device lacks a required capability; not an error
    Skipped { reason: String },
}

/// Per-configuration outcomes of one benchmark run
#[derive(Debug, Default)]
pub struct RunSummary {
    entries: Vec<(String, ConfigStatus)>,
}

impl RunSummary {
    fn record(&mut self, name: &str, status: ConfigStatus) {
        self.entries.push((name.to_string(), status));
    }

    /// All configurations in execution order
    pub fn entries(&self) -> &[(String, ConfigStatus)] {
        &self.entries
    }

    /// Status of a configuration by benchmark name
    pub fn status_of(&self, name: &str) -> Option<&ConfigStatus> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// True when every configuration passed (skips count as not passed)
    pub fn all_passed(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, s)| matches!(s, ConfigStatus::Passed))
    }

    /// True when any configuration failed verification
    pub fn has_failures(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, s)| matches!(s, ConfigStatus::Failed { .. }))
    }

    /// Prints one status line per configuration
    pub fn print(&self) {
        for (name, status) in &self.entries {
            match status {
                ConfigStatus::Passed => println!("{}: passed", name),
                ConfigStatus::Failed { pass, .. } => {
                    println!("{}: FAILED at pass {}", name, pass)
                }
                ConfigStatus::Skipped { reason } => println!("{}: skipped ({})", name, reason),
            }
        }
    }
}

/// `-SP` / `-DP` benchmark-name suffix from the element width
fn precision_label<T>() -> &'static str {
    if mem::size_of::<T>() == mem::size_of::<f64>() {
        "DP"
    } else {
        "SP"
    }
}

/// Drives one matrix/vector pair through all format configurations
///
/// Owns the source matrix, the dense vector, and the host reference. The
/// reference is computed once at construction and shared across every
/// configuration and pass of the run.
pub struct SpmvBenchmark<T> {
    matrix: SparseMatrixCSR<T>,
    vec: Vec<T>,
    reference: Vec<T>,
    config: BenchmarkConfig,
}

impl<T> SpmvBenchmark<T>
where
    T: Float + AddAssign + Send + Sync,
{
    /// Builds the benchmark state and computes the reference solution
    ///
    /// # Panics
    ///
    /// Panics if `vec.len()` does not match the matrix column count, or if
    /// the configuration requests zero passes or iterations.
    pub fn new(matrix: SparseMatrixCSR<T>, vec: Vec<T>, config: BenchmarkConfig) -> Self {
        assert!(config.passes > 0, "pass count must be positive");
        assert!(config.iterations > 0, "iteration count must be positive");

        let reference = reference_spmv(&matrix, &vec);
        Self {
            matrix,
            vec,
            reference,
            config,
        }
    }

    /// The source matrix
    pub fn matrix(&self) -> &SparseMatrixCSR<T> {
        &self.matrix
    }

    /// The host-computed ground truth
    pub fn reference(&self) -> &[T] {
        &self.reference
    }

    /// Runs all four format configurations against `device`
    ///
    /// Configurations: CSR (scalar + vector kernels), padded CSR (same
    /// kernels), ELLPACKR, padded ELLPACKR. Conversion errors abort the run;
    /// verification failures are scoped to one configuration.
    pub fn run<D: SpmvDevice<T>>(
        &self,
        device: &mut D,
        db: &mut ResultDatabase,
    ) -> Result<RunSummary, SpmvError> {
        let mut summary = RunSummary::default();

        println!("CSR Test");
        self.run_csr(device, &self.matrix, false, db, &mut summary)?;

        println!("CSR Test -- Padded Data");
        {
            let padded = self.matrix.to_padded(self.config.pad_factor)?;
            self.run_csr(device, &padded.matrix, true, db, &mut summary)?;
            // padded arrays released here, on every exit path
        }

        println!("ELLPACKR Test");
        self.run_ellpackr(device, false, db, &mut summary)?;

        println!("ELLPACKR Test -- Padded Data");
        self.run_ellpackr(device, true, db, &mut summary)?;

        Ok(summary)
    }

    /// Runs the scalar and vector CSR kernels over one resident layout
    fn run_csr<D: SpmvDevice<T>>(
        &self,
        device: &mut D,
        matrix: &SparseMatrixCSR<T>,
        padded: bool,
        db: &mut ResultDatabase,
        summary: &mut RunSummary,
    ) -> Result<(), SpmvError> {
        let transfer_in = device.load_csr(matrix, &self.vec)?;

        let prefix = if padded { "Padded_" } else { "" };
        let atts = format!("{}_elements_{}_rows", matrix.nnz(), matrix.n_rows);
        let gflop = 2.0 * matrix.nnz() as f64;

        println!("CSR Scalar Kernel");
        let name = format!("{}CSR-Scalar-{}", prefix, precision_label::<T>());
        let status = self.run_passes(device, Kernel::CsrScalar, &name, &atts, gflop, transfer_in, db)?;
        summary.record(&name, status);

        println!("CSR Vector Kernel");
        let name = format!("{}CSR-Vector-{}", prefix, precision_label::<T>());
        let max_group = device.max_work_group_size();
        if max_group < MIN_VECTOR_GROUP {
            println!(
                "Warning: CSR-Vector requires a work group size >= {}",
                MIN_VECTOR_GROUP
            );
            println!("Skipping this kernel.");
            summary.record(
                &name,
                ConfigStatus::Skipped {
                    reason: format!(
                        "work group size {} below required {}",
                        max_group, MIN_VECTOR_GROUP
                    ),
                },
            );
        } else {
            let status =
                self.run_passes(device, Kernel::CsrVector, &name, &atts, gflop, transfer_in, db)?;
            summary.record(&name, status);
        }

        device.release_buffers();
        Ok(())
    }

    /// Runs the ELLPACKR kernel over the unpadded or padded layout
    fn run_ellpackr<D: SpmvDevice<T>>(
        &self,
        device: &mut D,
        padded: bool,
        db: &mut ResultDatabase,
        summary: &mut RunSummary,
    ) -> Result<(), SpmvError> {
        let n_rows_padded = if padded {
            padded_row_count(self.matrix.n_rows, self.config.pad_factor)
        } else {
            self.matrix.n_rows
        };

        let ell = self.matrix.to_ellpackr(n_rows_padded)?;
        let transfer_in = device.load_ellpackr(&ell, &self.vec)?;

        let prefix = if padded { "Padded_" } else { "" };
        let atts = format!("{}_elements_{}_rows", self.matrix.nnz(), n_rows_padded);
        let gflop = 2.0 * self.matrix.nnz() as f64;

        let name = format!("{}ELLPACKR-{}", prefix, precision_label::<T>());
        let status = self.run_passes(device, Kernel::Ellpackr, &name, &atts, gflop, transfer_in, db)?;
        summary.record(&name, status);

        device.release_buffers();
        Ok(())
        // ell dropped here: the derived arrays live exactly as long as the
        // configuration, success or failure
    }

    /// Executes the measured passes for one kernel configuration
    fn run_passes<D: SpmvDevice<T>>(
        &self,
        device: &mut D,
        kernel: Kernel,
        name: &str,
        atts: &str,
        gflop: f64,
        transfer_in: f64,
        db: &mut ResultDatabase,
    ) -> Result<ConfigStatus, SpmvError> {
        for pass in 0..self.config.passes {
            let mut total_kernel = 0.0;
            for _ in 0..self.config.iterations {
                total_kernel += device.dispatch(kernel)?;
            }

            // Only the original rows are verified; pad rows carry no data
            let (out, transfer_out) = device.read_output(self.reference.len())?;
            let outcome = verify_results(&self.reference, &out, self.config.tolerance);
            if !outcome.passed {
                println!("---FAILED---");
                return Ok(ConfigStatus::Failed {
                    pass,
                    first_mismatch: outcome.first_mismatch,
                });
            }
            println!("Passed!");

            let avg_time = total_kernel / self.config.iterations as f64;
            let total_transfer = transfer_in + transfer_out;
            db.add_result(name, atts, "Gflop/s", gflop / (avg_time * 1e9));
            db.add_result(
                &format!("{}_PCIe", name),
                atts,
                "Gflop/s",
                gflop / ((avg_time + total_transfer) * 1e9),
            );
        }

        Ok(ConfigStatus::Passed)
    }
}
