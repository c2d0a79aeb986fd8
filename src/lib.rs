//! # csrmm: sparse × dense matrix multiplication
//!
//! Multiplies a sparse matrix in Compressed Sparse Row (CSR) form by a dense
//! row-major matrix (SpMM) and returns the dense product.
//!
//! ## Overview
//!
//! - Hardware-agnostic scalar reference kernel
//! - Vector kernels (AVX2+FMA, SSE2, NEON) whose lane width is queried from
//!   the running CPU, with a zero-padded tail step for widths that do not
//!   divide evenly
//! - One engine API; the kernel is picked once per engine
//! - Optional row-parallel execution with Rayon
//!
//! ## Layout
//!
//! Dense operands and results are row-major: element `(i, j)` of a matrix
//! with `cols` columns sits at `i * cols + j`. For `C = A × B` with `A`
//! `n × k` sparse and `B` `k × m` dense, each stored entry `(r, c, v)` of `A`
//! adds `v * B[c, ..]` into `C[r, ..]`, visiting entries in storage order.
//!
//! ## Usage
//!
//! ```
//! use csrmm::spmm;
//!
//! // 1 0 0 2
//! // 0 0 3 0
//! // 4 0 0 5
//! let row_offsets = [0, 2, 3, 5];
//! let col_indices = [0, 3, 2, 0, 3];
//! let values = [1.0f32, 2.0, 3.0, 4.0, 5.0];
//! let dense = [1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 6.0];
//!
//! let c = spmm(&row_offsets, &col_indices, &values, &dense, 2).unwrap();
//! assert_eq!(c.to_rows(), vec![vec![11.0, 14.0], vec![9.0, 12.0], vec![29.0, 38.0]]);
//! ```
//!
//! Reusing an engine:
//!
//! ```
//! use csrmm::{DenseMatrix, SparseMatrixCSR, SpmmConfig, SpmmEngine};
//!
//! let engine = SpmmEngine::<f64>::new(SpmmConfig::default()).unwrap();
//! let offsets = [0, 1];
//! let cols = [1];
//! let vals = [2.0];
//! let a = SparseMatrixCSR::try_new(2, &offsets, &cols, &vals).unwrap();
//! let b = DenseMatrix::from_rows(&[vec![1.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]]).unwrap();
//!
//! let c = engine.multiply(&a, &b).unwrap();
//! assert_eq!(c.to_vec(), vec![2.0, 4.0, 6.0]);
//! ```

pub mod accumulator;
pub mod constants;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use accumulator::{create_kernel, create_vector_kernel, RowKernel, ScalarKernel, SpmmElement};
pub use engine::SpmmEngine;
pub use error::{Result, ShapeError, SpmmError, UnsupportedHardwareError};
pub use matrix::{
    available_architectures, detect_architecture, Architecture, Backend, CsrData, DenseMatrix,
    SparseMatrixCSR, SpmmConfig,
};
pub use parallel::spmm_parallel;
pub use utils::{csr_from_sprs, dense_from_ndarray, dense_to_ndarray};

/// Sparse × dense product with the scalar reference kernel
///
/// `dense` is row-major with `dense_cols` columns; its row count is the
/// sparse column count. A flat buffer with `dense_cols == 0` has no rows, so
/// any stored entry is out of bounds; multiply by a `k × 0` operand through
/// [`SpmmEngine::multiply`] with a [`DenseMatrix`] instead.
///
/// # Errors
///
/// [`SpmmError::Shape`] if the CSR arrays are malformed or `dense.len()` is
/// not a multiple of `dense_cols`.
pub fn spmm<T: SpmmElement>(
    row_offsets: &[usize],
    col_indices: &[usize],
    values: &[T],
    dense: &[T],
    dense_cols: usize,
) -> Result<DenseMatrix<T>> {
    SpmmEngine::scalar().multiply_raw(row_offsets, col_indices, values, dense, dense_cols)
}

/// Sparse × dense product with the widest vector kernel this CPU supports
///
/// Same contract as [`spmm`]. Results match it up to rounding in the last
/// bits when the kernel fuses multiply and add.
///
/// # Errors
///
/// [`SpmmError::UnsupportedHardware`] if no vector kernel can run here,
/// otherwise the same shape errors as [`spmm`].
pub fn spmm_vectorized<T: SpmmElement>(
    row_offsets: &[usize],
    col_indices: &[usize],
    values: &[T],
    dense: &[T],
    dense_cols: usize,
) -> Result<DenseMatrix<T>> {
    SpmmEngine::vectorized()?.multiply_raw(row_offsets, col_indices, values, dense, dense_cols)
}

/// `csr × dense` with the vector kernel when available, else scalar
pub fn multiply<T: SpmmElement>(
    csr: &SparseMatrixCSR<'_, T>,
    dense: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>> {
    SpmmEngine::new(SpmmConfig::default())?.multiply(csr, dense)
}

/// Version information for the csrmm library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
