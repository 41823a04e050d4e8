// Benchmark orchestration and the device backend seam

pub mod backend;
pub mod host;
pub mod orchestrator;
pub mod results;

pub use backend::{Kernel, SpmvDevice, BLOCK_SIZE, MIN_VECTOR_GROUP, VECTOR_SIZE};
pub use host::HostDevice;
pub use orchestrator::{BenchmarkConfig, ConfigStatus, RunSummary, SpmvBenchmark};
pub use results::{BenchResult, ResultDatabase};
