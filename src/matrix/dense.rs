//! Row-major dense matrices used as the right operand and the product

use std::fmt;

use aligned_vec::{AVec, ConstAlign};
use num_traits::Zero;

use crate::constants::{DEBUG_SAMPLE_ENTRIES, DEBUG_SAMPLE_ROWS, DENSE_ALIGNMENT};
use crate::error::ShapeError;

type DenseStorage<T> = AVec<T, ConstAlign<DENSE_ALIGNMENT>>;

/// A dense matrix stored row-major in one cache-line aligned buffer
///
/// Element `(i, j)` lives at flat index `i * n_cols + j`. When used as the
/// right operand of a product, row `k` is the vector scaled by every sparse
/// nonzero stored in column `k`.
pub struct DenseMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    data: DenseStorage<T>,
}

impl<T: Copy + Zero> DenseMatrix<T> {
    /// Creates a matrix filled with zeros
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        let len = n_rows * n_cols;
        Self {
            n_rows,
            n_cols,
            data: AVec::from_iter(DENSE_ALIGNMENT, std::iter::repeat(T::zero()).take(len)),
        }
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Wraps a row-major buffer of exactly `n_rows * n_cols` elements
    pub fn from_vec(n_rows: usize, n_cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        if data.len() != n_rows * n_cols {
            return Err(ShapeError::DenseLength {
                len: data.len(),
                cols: n_cols,
            });
        }
        Ok(Self {
            n_rows,
            n_cols,
            data: AVec::from_slice(DENSE_ALIGNMENT, &data),
        })
    }

    /// Copies a flat row-major buffer, inferring the row count from `n_cols`
    ///
    /// A zero column count is only accepted for an empty buffer, which yields
    /// a `0 × 0` matrix.
    pub fn from_slice(data: &[T], n_cols: usize) -> Result<Self, ShapeError> {
        let n_rows = infer_rows(data.len(), n_cols)?;
        Ok(Self {
            n_rows,
            n_cols,
            data: AVec::from_slice(DENSE_ALIGNMENT, data),
        })
    }

    /// Builds a matrix by evaluating `f(i, j)` in row-major order
    pub fn from_fn<F>(n_rows: usize, n_cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let cells = (0..n_rows).flat_map(|i| (0..n_cols).map(move |j| (i, j)));
        Self {
            n_rows,
            n_cols,
            data: AVec::from_iter(DENSE_ALIGNMENT, cells.map(|(i, j)| f(i, j))),
        }
    }

    /// Copies nested rows; every row must have the same length as the first
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let n_cols = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some((row, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != n_cols)
        {
            return Err(ShapeError::RaggedDense {
                row,
                expected: n_cols,
                actual: bad.as_ref().len(),
            });
        }
        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            data: AVec::from_iter(
                DENSE_ALIGNMENT,
                rows.iter().flat_map(|row| row.as_ref().iter().copied()),
            ),
        })
    }

    /// Element `(i, j)`, or `None` outside the matrix
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.n_rows && j < self.n_cols {
            Some(self.data[i * self.n_cols + j])
        } else {
            None
        }
    }

    /// Copies the matrix out as one `Vec` per row
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.n_rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Copies the row-major buffer out
    pub fn to_vec(&self) -> Vec<T> {
        self.data.to_vec()
    }
}

/// Row count of a flat row-major buffer of `len` elements with `n_cols` columns
pub fn infer_rows(len: usize, n_cols: usize) -> Result<usize, ShapeError> {
    match n_cols {
        0 if len == 0 => Ok(0),
        0 => Err(ShapeError::DenseLength { len, cols: 0 }),
        _ if len % n_cols != 0 => Err(ShapeError::DenseLength { len, cols: n_cols }),
        _ => Ok(len / n_cols),
    }
}

impl<T> DenseMatrix<T> {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Row `i` as a contiguous slice
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let start = i * self.n_cols;
        &mut self.data[start..start + self.n_cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy> Clone for DenseMatrix<T> {
    fn clone(&self) -> Self {
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            data: AVec::from_slice(DENSE_ALIGNMENT, &self.data),
        }
    }
}

impl<T: PartialEq> PartialEq for DenseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseMatrix {} × {}", self.n_rows, self.n_cols)?;

        let shown_rows = self.n_rows.min(DEBUG_SAMPLE_ROWS);
        for i in 0..shown_rows {
            let row = self.row(i);
            let shown = row.len().min(DEBUG_SAMPLE_ENTRIES);
            write!(f, "  row {}: {:?}", i, &row[..shown])?;
            if row.len() > shown {
                write!(f, " ... ({} more)", row.len() - shown)?;
            }
            writeln!(f)?;
        }
        if self.n_rows > shown_rows {
            writeln!(f, "  ... ({} more rows)", self.n_rows - shown_rows)?;
        }
        Ok(())
    }
}
