//! Seeded random matrices for tests, benchmarks and the demo binary

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::offsets_from_counts;
use crate::accumulator::SpmmElement;
use crate::matrix::{CsrData, DenseMatrix};

fn sample<T: SpmmElement>(rng: &mut StdRng) -> T {
    T::from_f64(rng.gen_range(-1.0..1.0)).unwrap_or_else(T::zero)
}

/// Random CSR matrix where each entry is stored with probability `density`
///
/// Columns within a row come out sorted and unique. Values are uniform in
/// `[-1, 1)`.
pub fn random_csr<T: SpmmElement>(
    n_rows: usize,
    n_cols: usize,
    density: f64,
    seed: u64,
) -> CsrData<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let density = density.clamp(0.0, 1.0);

    let mut counts = Vec::with_capacity(n_rows);
    let mut col_indices = Vec::new();
    let mut values = Vec::new();

    for _ in 0..n_rows {
        let before = col_indices.len();
        for col in 0..n_cols {
            if rng.gen_bool(density) {
                col_indices.push(col);
                values.push(sample(&mut rng));
            }
        }
        counts.push(col_indices.len() - before);
    }

    CsrData::new(n_cols, offsets_from_counts(&counts), col_indices, values)
}

/// Random CSR matrix with `nnz_per_row` entries per row, columns drawn with
/// replacement
///
/// Rows are unsorted and usually contain repeated columns.
pub fn random_csr_with_duplicates<T: SpmmElement>(
    n_rows: usize,
    n_cols: usize,
    nnz_per_row: usize,
    seed: u64,
) -> CsrData<T> {
    if n_cols == 0 {
        return CsrData::zeros(n_rows, 0);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let nnz = n_rows * nnz_per_row;
    let col_indices = (0..nnz).map(|_| rng.gen_range(0..n_cols)).collect();
    let values = (0..nnz).map(|_| sample(&mut rng)).collect();
    let row_offsets = (0..=n_rows).map(|row| row * nnz_per_row).collect();

    CsrData::new(n_cols, row_offsets, col_indices, values)
}

/// Random dense matrix with values uniform in `[-1, 1)`
pub fn random_dense<T: SpmmElement>(n_rows: usize, n_cols: usize, seed: u64) -> DenseMatrix<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dense = DenseMatrix::zeros(n_rows, n_cols);
    for value in dense.as_mut_slice() {
        *value = sample(&mut rng);
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_csr_is_valid_and_reproducible() {
        let a = random_csr::<f32>(50, 30, 0.2, 42);
        let b = random_csr::<f32>(50, 30, 0.2, 42);
        assert_eq!(a, b);

        let view = a.view().unwrap();
        assert_eq!(view.shape(), (50, 30));
        assert!(view.nnz() > 0);
        assert!(view.values().iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_density_extremes() {
        assert_eq!(random_csr::<f64>(5, 5, 0.0, 1).view().unwrap().nnz(), 0);
        assert_eq!(random_csr::<f64>(5, 5, 1.0, 1).view().unwrap().nnz(), 25);
    }

    #[test]
    fn test_duplicates_generator() {
        let data = random_csr_with_duplicates::<f64>(10, 3, 8, 5);
        let view = data.view().unwrap();
        assert_eq!(view.nnz(), 80);
        assert!((0..10).all(|row| view.row_nnz(row) == 8));

        let empty = random_csr_with_duplicates::<f64>(4, 0, 8, 5);
        assert_eq!(empty.view().unwrap().nnz(), 0);
    }

    #[test]
    fn test_random_dense_shape() {
        let dense = random_dense::<f32>(4, 7, 3);
        assert_eq!(dense.shape(), (4, 7));
        assert_eq!(dense, random_dense::<f32>(4, 7, 3));
    }
}
