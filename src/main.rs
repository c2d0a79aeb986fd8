use std::time::Instant;

use csrmm::utils::{random_csr, random_dense};
use csrmm::{
    available_architectures, detect_architecture, spmm, Backend, DenseMatrix, SpmmConfig,
    SpmmEngine,
};
use tracing_subscriber::EnvFilter;

fn main() -> csrmm::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("csrmm {}: sparse (CSR) × dense matrix multiplication", csrmm::VERSION);

    let arch = detect_architecture();
    println!("\nDetected architecture: {:?}", arch);
    println!("  f32 lanes: {}", arch.lanes::<f32>());
    println!("  f64 lanes: {}", arch.lanes::<f64>());
    println!("  usable vector kernels: {:?}", available_architectures());

    // 1 0 0 2
    // 0 0 3 0
    // 4 0 0 5
    let row_offsets = vec![0, 2, 3, 5];
    let col_indices = vec![0, 3, 2, 0, 3];
    let values = vec![1.0f32, 2.0, 3.0, 4.0, 5.0];
    let dense = vec![1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 6.0];

    println!("\nResult of SpMM (scalar):");
    print_rows(&spmm(&row_offsets, &col_indices, &values, &dense, 2)?);

    for arch in available_architectures() {
        let engine = SpmmEngine::<f32>::new(SpmmConfig::vector().with_architecture(arch))?;
        println!("\nResult of SpMM ({}, {} lanes):", engine.kernel_name(), engine.lanes());
        print_rows(&engine.multiply_raw(&row_offsets, &col_indices, &values, &dense, 2)?);
    }

    let config = SpmmConfig::from_env()?;
    println!("\nConfiguration:");
    println!("  Backend: {:?}", config.backend);
    println!("  Parallel: {}", config.parallel);
    println!("  Parallel row threshold: {}", config.parallel_row_threshold);
    println!("  Threads: {}", config.n_threads);

    let engine = SpmmEngine::<f32>::new(config)?;
    println!("\nUsing {} kernel ({} lanes):", engine.kernel_name(), engine.lanes());
    print_rows(&engine.multiply_raw(&row_offsets, &col_indices, &values, &dense, 2)?);

    println!("\nRandom 2000 × 2000 (1% dense) × 2000 × 67:");
    let a = random_csr::<f32>(2000, 2000, 0.01, 1);
    let a = a.view()?;
    let b = random_dense::<f32>(2000, 67, 2);

    let scalar = SpmmEngine::<f32>::scalar();
    let start = Instant::now();
    let reference = scalar.multiply(&a, &b)?;
    println!("  scalar:   {:?}", start.elapsed());

    for backend in [Backend::Vector, Backend::Auto] {
        let engine = match SpmmEngine::<f32>::new(SpmmConfig::default().with_backend(backend)) {
            Ok(engine) => engine,
            Err(err) => {
                println!("  {:?}: {}", backend, err);
                continue;
            }
        };
        let start = Instant::now();
        let result = engine.multiply(&a, &b)?;
        let elapsed = start.elapsed();

        let max_diff = result
            .as_slice()
            .iter()
            .zip(reference.as_slice())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f32, f32::max);
        println!(
            "  {:?} ({}): {:?}, max |Δ| vs scalar = {:e}",
            backend,
            engine.kernel_name(),
            elapsed,
            max_diff
        );
    }

    Ok(())
}

fn print_rows(result: &DenseMatrix<f32>) {
    for row in result.to_rows() {
        println!("  {:?}", row);
    }
}
