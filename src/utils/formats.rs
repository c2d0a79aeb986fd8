//! Interop with `sprs` sparse matrices and `ndarray` dense arrays

use ndarray::{Array2, ArrayView2};
use num_traits::Num;
use sprs::CsMat;

use crate::matrix::{CsrData, DenseMatrix};

/// Converts a `sprs` matrix into owned CSR arrays
///
/// CSC input is converted to CSR first. Call [`CsrData::view`] to validate
/// and multiply.
pub fn csr_from_sprs<T>(matrix: CsMat<T>) -> CsrData<T>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let n_cols = matrix.cols();
    let (row_offsets, col_indices, values) = matrix.into_raw_storage();
    CsrData::new(n_cols, row_offsets, col_indices, values)
}

/// Copies a 2-D array (any memory order) into a row-major [`DenseMatrix`]
pub fn dense_from_ndarray<T: Copy>(array: ArrayView2<'_, T>) -> DenseMatrix<T> {
    let (n_rows, n_cols) = array.dim();
    DenseMatrix::from_fn(n_rows, n_cols, |i, j| array[[i, j]])
}

/// Copies a [`DenseMatrix`] into an owned standard-layout `Array2`
pub fn dense_to_ndarray<T: Copy>(dense: &DenseMatrix<T>) -> Array2<T> {
    Array2::from_shape_fn(dense.shape(), |(i, j)| dense.row(i)[j])
}
