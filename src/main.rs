use spmv_bench::{
    constant_vector, BenchmarkConfig, HostDevice, MatrixGenerator, ResultDatabase, SpmvBenchmark,
    SpmvError,
};

fn main() -> Result<(), SpmvError> {
    println!("SpMV Benchmark: CSR and ELLPACKR kernels");

    // Optional positional overrides: rows, passes, iterations
    let args: Vec<String> = std::env::args().collect();
    let rows = parse_arg(&args, 1, 2048);
    let passes = parse_arg(&args, 2, 4);
    let iterations = parse_arg(&args, 3, 10);
    let max_val = 10.0f64;

    println!(
        "\nGenerating {} x {} random matrix (~1% density, fill value {})",
        rows, rows, max_val
    );
    let mut gen = MatrixGenerator::new(42);
    let matrix = gen.generate_random::<f64>(rows, max_val)?;
    let vec = constant_vector(rows, max_val);
    println!("{:?}", matrix);

    let config = BenchmarkConfig {
        passes,
        iterations,
        ..Default::default()
    };
    println!(
        "\nConfiguration: {} passes x {} iterations, tolerance {:e}, pad factor {}\n",
        config.passes, config.iterations, config.tolerance, config.pad_factor
    );

    let bench = SpmvBenchmark::new(matrix, vec, config);
    let mut device = HostDevice::new();
    let mut db = ResultDatabase::new();

    let summary = bench.run(&mut device, &mut db)?;

    println!("\nResults:");
    db.print_summary();

    println!("\nConfiguration outcomes:");
    summary.print();

    Ok(())
}

fn parse_arg(args: &[String], idx: usize, default: usize) -> usize {
    args.get(idx)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
