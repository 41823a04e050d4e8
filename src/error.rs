//! Error types for the benchmark core
//!
//! Constructor contracts (consistent CSR arrays, matching vector lengths)
//! are enforced with asserts; `SpmvError` covers the failures a correct
//! caller can still hit at runtime.

use thiserror::Error;

/// Errors surfaced by conversions, generation, and device backends
#[derive(Debug, Error)]
pub enum SpmvError {
    /// A requested dimension or sizing parameter is unusable
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A derived layout would not fit in memory
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// The device backend rejected or failed an operation
    #[error("backend error: {0}")]
    Backend(String),
}
