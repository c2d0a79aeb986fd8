//! Tests for row-parallel execution

use csrmm::utils::{random_csr, random_dense};
use csrmm::{spmm_parallel, Backend, SpmmConfig, SpmmEngine};

#[test]
fn test_parallel_vs_sequential() {
    let data = random_csr::<f64>(1000, 200, 0.05, 3);
    let csr = data.view().unwrap();
    let dense = random_dense::<f64>(200, 33, 4);

    for backend in [Backend::Scalar, Backend::Auto] {
        let sequential = SpmmEngine::new(SpmmConfig::default().with_backend(backend))
            .unwrap()
            .multiply(&csr, &dense)
            .unwrap();
        let parallel = SpmmEngine::new(
            SpmmConfig::default()
                .with_backend(backend)
                .with_parallel(true)
                .with_parallel_row_threshold(1),
        )
        .unwrap()
        .multiply(&csr, &dense)
        .unwrap();

        // Each row is computed by the same kernel in the same order either way
        assert_eq!(sequential, parallel, "{:?}", backend);
    }
}

#[test]
fn test_spmm_parallel_small_inputs() {
    let offsets = [0, 1, 1];
    let cols = [0];
    let vals = [5.0f32];
    let csr = csrmm::SparseMatrixCSR::try_new(1, &offsets, &cols, &vals).unwrap();
    let dense = csrmm::DenseMatrix::from_rows(&[vec![1.0f32, -1.0, 2.0]]).unwrap();

    let result = spmm_parallel(&csr, &dense).unwrap();
    assert_eq!(result.to_rows(), vec![vec![5.0, -5.0, 10.0], vec![0.0, 0.0, 0.0]]);
}

#[test]
fn test_parallel_below_threshold_stays_sequential() {
    let config = SpmmConfig::default()
        .with_parallel(true)
        .with_parallel_row_threshold(10_000);
    assert!(!config.should_parallelize(500));

    let data = random_csr::<f32>(500, 50, 0.1, 5);
    let csr = data.view().unwrap();
    let dense = random_dense::<f32>(50, 8, 6);

    let engine = SpmmEngine::new(config).unwrap();
    let expected = SpmmEngine::new(SpmmConfig::default()).unwrap();
    assert_eq!(
        engine.multiply(&csr, &dense).unwrap(),
        expected.multiply(&csr, &dense).unwrap()
    );
}
