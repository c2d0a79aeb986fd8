//! Row accumulation kernels for sparse × dense multiplication
//!
//! Every product row is built by the same loop: for each stored nonzero
//! `(col, v)` of the sparse row, add `v * dense.row(col)` into the output row.
//! A [`RowKernel`] supplies that inner step. The scalar kernel is the
//! reference; the vector kernels process a register's worth of columns per
//! instruction and push the final short chunk through a zero-padded scratch
//! register, so they never touch memory past the end of a row.

/// Generates a lane-wide `acc += alpha * x` over two equally long slices
///
/// Full chunks are loaded and stored in place. The remainder is copied into
/// zero-padded stack buffers, run through the same vector operation and only
/// the valid elements are copied back.
macro_rules! lane_axpy {
    (
        $(#[$attr:meta])*
        fn $name:ident($elem:ty, lanes = $lanes:expr) {
            splat: $splat:path,
            load: $load:path,
            store: $store:path,
            madd: |$a:ident, $x:ident, $y:ident| $madd:expr $(,)?
        }
    ) => {
        $(#[$attr])*
        unsafe fn $name(acc: &mut [$elem], alpha: $elem, x: &[$elem]) {
            const LANES: usize = $lanes;
            let n = acc.len().min(x.len());
            let full = n - n % LANES;
            let $a = $splat(alpha);

            let acc_ptr = acc.as_mut_ptr();
            let x_ptr = x.as_ptr();
            let mut j = 0;
            while j < full {
                let $x = $load(x_ptr.add(j));
                let $y = $load(acc_ptr.add(j));
                $store(acc_ptr.add(j), $madd);
                j += LANES;
            }

            if full < n {
                let rem = n - full;
                let mut x_tail = [0.0 as $elem; LANES];
                let mut y_tail = [0.0 as $elem; LANES];
                x_tail[..rem].copy_from_slice(&x[full..n]);
                y_tail[..rem].copy_from_slice(&acc[full..n]);

                let $x = $load(x_tail.as_ptr());
                let $y = $load(y_tail.as_ptr());
                $store(y_tail.as_mut_ptr(), $madd);
                acc[full..n].copy_from_slice(&y_tail[..rem]);
            }
        }
    };
}

pub mod scalar;
pub mod simd;
#[cfg(target_arch = "x86_64")]
pub mod x86;
#[cfg(target_arch = "aarch64")]
pub mod neon;

use crate::matrix::{Architecture, DenseMatrix, SparseMatrixCSR};

/// Strategy for accumulating one product row
///
/// Implementations are selected once per engine and shared read-only across
/// row workers, hence the `Send + Sync` bound.
pub trait RowKernel<T>: Send + Sync {
    /// Short identifier used in logs and benchmark labels
    fn name(&self) -> &'static str;

    /// Instruction set this kernel runs on
    fn architecture(&self) -> Architecture;

    /// Number of columns processed per step
    fn lanes(&self) -> usize {
        self.architecture().lanes::<T>()
    }

    /// `acc[j] += alpha * x[j]` for every `j` in the column range
    ///
    /// `acc` and `x` cover the same columns and must have equal length.
    fn axpy(&self, acc: &mut [T], alpha: T, x: &[T]);

    /// Accumulate sparse row `row` times `dense` into `out`
    ///
    /// Nonzeros are visited in storage order. `out` must already be zeroed
    /// and hold `dense.n_cols()` elements.
    fn accumulate_row(
        &self,
        csr: &SparseMatrixCSR<'_, T>,
        dense: &DenseMatrix<T>,
        row: usize,
        out: &mut [T],
    ) where
        T: Copy,
    {
        debug_assert_eq!(out.len(), dense.n_cols());
        for (col, &value) in csr.row_iter(row) {
            self.axpy(out, value, dense.row(col));
        }
    }
}

pub use scalar::ScalarKernel;
pub use simd::{create_kernel, create_vector_kernel, SpmmElement};
