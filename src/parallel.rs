//! # Row-parallel sparse × dense multiplication
//!
//! Product rows are independent: row `i` of the result only reads sparse row
//! `i` and the shared dense operand. Rows are therefore handed to Rayon as
//! disjoint mutable chunks of the already zeroed result buffer, and no
//! synchronization is needed.

use rayon::prelude::*;

use crate::accumulator::{RowKernel, SpmmElement};
use crate::engine::SpmmEngine;
use crate::error::Result;
use crate::matrix::{DenseMatrix, SparseMatrixCSR, SpmmConfig};

/// Fills `out` (row-major, `dense.n_cols()` wide) with `csr × dense` on the
/// Rayon pool, giving each task at least `min_rows` rows
pub(crate) fn accumulate_rows_parallel<T>(
    kernel: &dyn RowKernel<T>,
    csr: &SparseMatrixCSR<'_, T>,
    dense: &DenseMatrix<T>,
    out: &mut [T],
    min_rows: usize,
) where
    T: SpmmElement,
{
    out.par_chunks_mut(dense.n_cols())
        .with_min_len(min_rows)
        .enumerate()
        .for_each(|(row, out_row)| kernel.accumulate_row(csr, dense, row, out_row));
}

/// Computes `csr × dense` with the best available kernel, splitting rows
/// across threads
///
/// # Examples
///
/// ```
/// use csrmm::{spmm_parallel, DenseMatrix, SparseMatrixCSR};
///
/// let offsets = [0, 1, 2];
/// let cols = [0, 1];
/// let vals = [2.0, 3.0];
/// let a = SparseMatrixCSR::try_new(2, &offsets, &cols, &vals).unwrap();
/// let b = DenseMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
///
/// let c = spmm_parallel(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![2.0, 2.0], vec![3.0, 6.0]]);
/// ```
pub fn spmm_parallel<T: SpmmElement>(
    csr: &SparseMatrixCSR<'_, T>,
    dense: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    let config = SpmmConfig::default()
        .with_parallel(true)
        .with_parallel_row_threshold(0);
    SpmmEngine::new(config)?.multiply(csr, dense)
}
