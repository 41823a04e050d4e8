//! Numerical verification of device results against the host reference

use num_traits::Float;

/// Outcome of comparing a device result vector against the reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// True when no entry exceeded the tolerance
    pub passed: bool,

    /// Lowest index whose relative error exceeded the tolerance
    pub first_mismatch: Option<usize>,

    /// Total number of entries that exceeded the tolerance
    pub mismatch_count: usize,
}

/// Compares `candidate` to `reference` within a relative-error tolerance
///
/// An entry mismatches when `|reference[i] - candidate[i]| / |reference[i]|`
/// exceeds `tolerance` under IEEE comparison semantics. The division is
/// performed unconditionally, so a zero reference entry yields +Inf (always
/// a mismatch) when the candidate differs, and NaN (never `> tolerance`, so
/// a match) when the candidate is exactly equal. The whole vector is scanned
/// rather than short-circuiting, so `mismatch_count` covers every divergent
/// entry.
///
/// # Panics
///
/// Panics if the two vectors differ in length.
pub fn verify_results<T: Float>(
    reference: &[T],
    candidate: &[T],
    tolerance: f64,
) -> VerificationOutcome {
    assert_eq!(
        reference.len(),
        candidate.len(),
        "reference and candidate must have the same length"
    );

    let mut first_mismatch = None;
    let mut mismatch_count = 0;

    for (i, (&r, &c)) in reference.iter().zip(candidate.iter()).enumerate() {
        let rel = (r - c).abs() / r.abs();
        if rel.to_f64().unwrap_or(f64::NAN) > tolerance {
            mismatch_count += 1;
            if first_mismatch.is_none() {
                first_mismatch = Some(i);
            }
        }
    }

    VerificationOutcome {
        passed: mismatch_count == 0,
        first_mismatch,
        mismatch_count,
    }
}
