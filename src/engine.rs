//! The sparse × dense multiplication engine
//!
//! An [`SpmmEngine`] picks its [`RowKernel`] once, at construction, and then
//! runs any number of independent multiplications with it. Each call
//! validates shapes, allocates a zeroed result, and fills it row by row.

use std::fmt;

use crate::accumulator::{create_kernel, RowKernel, SpmmElement};
use crate::error::{Result, ShapeError};
use crate::matrix::dense::infer_rows;
use crate::matrix::{Architecture, DenseMatrix, SparseMatrixCSR, SpmmConfig};
use crate::parallel;

/// Multiplies CSR matrices by dense matrices with a fixed kernel
pub struct SpmmEngine<T> {
    kernel: Box<dyn RowKernel<T>>,
    config: SpmmConfig,
}

impl<T: SpmmElement> SpmmEngine<T> {
    /// Builds an engine, selecting the kernel described by `config`
    ///
    /// # Errors
    ///
    /// Fails with an unsupported-hardware error if `config.backend` is
    /// [`Backend::Vector`](crate::Backend::Vector) and no vector kernel is
    /// available.
    pub fn new(config: SpmmConfig) -> Result<Self> {
        let kernel = create_kernel(config.backend, config.architecture)?;
        Ok(Self { kernel, config })
    }

    /// Engine running the scalar reference kernel
    pub fn scalar() -> Self {
        Self::with_kernel(
            Box::new(crate::accumulator::ScalarKernel::new()),
            SpmmConfig::scalar(),
        )
    }

    /// Engine running the widest vector kernel this CPU supports
    pub fn vectorized() -> Result<Self> {
        Self::new(SpmmConfig::vector())
    }

    /// Engine running a caller-supplied kernel
    pub fn with_kernel(kernel: Box<dyn RowKernel<T>>, config: SpmmConfig) -> Self {
        Self { kernel, config }
    }

    pub fn kernel_name(&self) -> &'static str {
        self.kernel.name()
    }

    pub fn architecture(&self) -> Architecture {
        self.kernel.architecture()
    }

    /// Columns processed per kernel step
    pub fn lanes(&self) -> usize {
        self.kernel.lanes()
    }

    pub fn config(&self) -> &SpmmConfig {
        &self.config
    }

    /// Computes `csr × dense`
    ///
    /// The result has `csr.n_rows()` rows and `dense.n_cols()` columns and is
    /// freshly allocated on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::DimensionMismatch`] if `csr.n_cols()` differs from
    /// `dense.n_rows()`. Nothing is allocated in that case.
    pub fn multiply(
        &self,
        csr: &SparseMatrixCSR<'_, T>,
        dense: &DenseMatrix<T>,
    ) -> Result<DenseMatrix<T>> {
        check_compatible(csr, dense)?;

        let n_rows = csr.n_rows();
        let n_cols = dense.n_cols();
        let mut result = DenseMatrix::zeros(n_rows, n_cols);
        if n_rows == 0 || n_cols == 0 {
            return Ok(result);
        }

        let kernel = self.kernel.as_ref();
        if self.config.should_parallelize(n_rows) {
            let min_rows = self.config.min_rows_per_task(n_rows);
            parallel::accumulate_rows_parallel(kernel, csr, dense, result.as_mut_slice(), min_rows);
        } else {
            for (row, out) in result.as_mut_slice().chunks_mut(n_cols).enumerate() {
                kernel.accumulate_row(csr, dense, row, out);
            }
        }

        Ok(result)
    }

    /// Computes the product straight from raw CSR arrays and a row-major
    /// dense buffer with `dense_cols` columns
    ///
    /// The sparse column count is taken to be the dense row count, which is
    /// 0 whenever `dense_cols` is 0.
    pub fn multiply_raw(
        &self,
        row_offsets: &[usize],
        col_indices: &[usize],
        values: &[T],
        dense: &[T],
        dense_cols: usize,
    ) -> Result<DenseMatrix<T>> {
        let dense_rows = infer_rows(dense.len(), dense_cols)?;
        let csr = SparseMatrixCSR::try_new(dense_rows, row_offsets, col_indices, values)?;
        let dense = DenseMatrix::from_slice(dense, dense_cols)?;
        self.multiply(&csr, &dense)
    }
}

impl<T> fmt::Debug for SpmmEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpmmEngine")
            .field("kernel", &self.kernel.name())
            .field("config", &self.config)
            .finish()
    }
}

/// Sparse column count must match dense row count
pub fn check_compatible<T>(
    csr: &SparseMatrixCSR<'_, T>,
    dense: &DenseMatrix<T>,
) -> std::result::Result<(), ShapeError> {
    if csr.n_cols() != dense.n_rows() {
        return Err(ShapeError::DimensionMismatch {
            sparse_cols: csr.n_cols(),
            dense_rows: dense.n_rows(),
        });
    }
    Ok(())
}
