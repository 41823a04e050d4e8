//! In-memory result database
//!
//! Each executed pass records two throughput rows: compute-only and
//! transfer-inclusive (`_PCIe` suffix). Persistence of results is an
//! external concern; this database only collects rows and prints a summary
//! table.

use std::collections::BTreeMap;

/// One recorded measurement
#[derive(Debug, Clone)]
pub struct BenchResult {
    /// Benchmark name: format + precision + padded/unpadded, e.g.
    /// `Padded_CSR-Scalar-SP` or `ELLPACKR-DP_PCIe`
    pub test_name: String,

    /// Tagged attribute string: `"{nnz}_elements_{rows}_rows"`
    pub atts: String,

    /// Measurement unit, `Gflop/s` for every row this crate records
    pub unit: String,

    /// Measured value
    pub value: f64,
}

/// Collects benchmark results across configurations and passes
#[derive(Debug, Default)]
pub struct ResultDatabase {
    results: Vec<BenchResult>,
}

impl ResultDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one measurement
    pub fn add_result(&mut self, test_name: &str, atts: &str, unit: &str, value: f64) {
        self.results.push(BenchResult {
            test_name: test_name.to_string(),
            atts: atts.to_string(),
            unit: unit.to_string(),
            value,
        });
    }

    /// All recorded rows, in insertion order
    pub fn results(&self) -> &[BenchResult] {
        &self.results
    }

    /// Rows recorded under a given benchmark name
    pub fn results_for(&self, test_name: &str) -> Vec<&BenchResult> {
        self.results
            .iter()
            .filter(|r| r.test_name == test_name)
            .collect()
    }

    /// Prints a per-benchmark summary (passes, min, mean, max)
    pub fn print_summary(&self) {
        let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for r in &self.results {
            grouped.entry(&r.test_name).or_default().push(r.value);
        }

        println!(
            "{:<28} {:>7} {:>12} {:>12} {:>12}  unit",
            "benchmark", "passes", "min", "mean", "max"
        );
        for (name, values) in grouped {
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            println!(
                "{:<28} {:>7} {:>12.4} {:>12.4} {:>12.4}  Gflop/s",
                name,
                values.len(),
                min,
                mean,
                max
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_filter_results() {
        let mut db = ResultDatabase::new();
        db.add_result("CSR-Scalar-SP", "100_elements_10_rows", "Gflop/s", 1.5);
        db.add_result("CSR-Scalar-SP_PCIe", "100_elements_10_rows", "Gflop/s", 0.9);
        db.add_result("CSR-Scalar-SP", "100_elements_10_rows", "Gflop/s", 1.6);

        assert_eq!(db.results().len(), 3);
        assert_eq!(db.results_for("CSR-Scalar-SP").len(), 2);
        assert_eq!(db.results_for("CSR-Scalar-SP_PCIe").len(), 1);
        assert_eq!(db.results()[0].unit, "Gflop/s");
    }
}
