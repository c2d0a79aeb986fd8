//! Compressed Sparse Row (CSR) matrix views

use std::fmt;

use num_traits::Num;

use crate::constants::{DEBUG_SAMPLE_ENTRIES, DEBUG_SAMPLE_ROWS};
use crate::error::ShapeError;

/// A validated, borrowed sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_offsets: `n_rows + 1` non-decreasing indices into the other two arrays
/// - col_indices: column index of each stored nonzero
/// - values: value of each stored nonzero
///
/// The arrays stay owned by the caller. Column indices within a row are not
/// required to be sorted or unique; duplicates add up when multiplied.
#[derive(Clone, Copy)]
pub struct SparseMatrixCSR<'a, T> {
    n_cols: usize,
    row_offsets: &'a [usize],
    col_indices: &'a [usize],
    values: &'a [T],
}

impl<'a, T> SparseMatrixCSR<'a, T> {
    /// Creates a CSR view after checking every structural invariant
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if:
    /// - `row_offsets` is empty or does not start at 0
    /// - `col_indices.len() != values.len()`
    /// - the last row offset differs from `col_indices.len()`
    /// - row offsets decrease anywhere
    /// - any column index is `>= n_cols`
    pub fn try_new(
        n_cols: usize,
        row_offsets: &'a [usize],
        col_indices: &'a [usize],
        values: &'a [T],
    ) -> Result<Self, ShapeError> {
        let (&first, &last) = match (row_offsets.first(), row_offsets.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ShapeError::EmptyRowOffsets),
        };
        if first != 0 {
            return Err(ShapeError::NonZeroFirstOffset { found: first });
        }
        if col_indices.len() != values.len() {
            return Err(ShapeError::ValuesLengthMismatch {
                col_indices: col_indices.len(),
                values: values.len(),
            });
        }
        if last != col_indices.len() {
            return Err(ShapeError::NnzMismatch {
                last_offset: last,
                nnz: col_indices.len(),
            });
        }
        if let Some(row) = row_offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(ShapeError::DecreasingRowOffsets {
                row,
                start: row_offsets[row],
                end: row_offsets[row + 1],
            });
        }
        if let Some(position) = col_indices.iter().position(|&col| col >= n_cols) {
            return Err(ShapeError::ColumnOutOfBounds {
                position,
                col: col_indices[position],
                n_cols,
            });
        }

        Ok(Self {
            n_cols,
            row_offsets,
            col_indices,
            values,
        })
    }

    /// Creates a CSR view whose column count is the largest column index + 1
    pub fn with_inferred_cols(
        row_offsets: &'a [usize],
        col_indices: &'a [usize],
        values: &'a [T],
    ) -> Result<Self, ShapeError> {
        let n_cols = col_indices.iter().max().map_or(0, |&max| max + 1);
        Self::try_new(n_cols, row_offsets, col_indices, values)
    }

    pub fn n_rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    /// Returns the number of stored entries (duplicates counted separately)
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Number of stored entries in row `i`
    pub fn row_nnz(&self, i: usize) -> usize {
        self.row_offsets[i + 1] - self.row_offsets[i]
    }

    pub fn row_offsets(&self) -> &'a [usize] {
        self.row_offsets
    }

    pub fn col_indices(&self) -> &'a [usize] {
        self.col_indices
    }

    pub fn values(&self) -> &'a [T] {
        self.values
    }

    /// Returns an iterator over the stored entries of row i, in storage order
    ///
    /// Each item is a tuple (col_idx, value).
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &'a T)> {
        assert!(i < self.n_rows(), "Row index out of bounds");

        let start = self.row_offsets[i];
        let end = self.row_offsets[i + 1];
        let (cols, vals) = (self.col_indices, self.values);

        cols[start..end]
            .iter()
            .zip(&vals[start..end])
            .map(|(&col, val)| (col, val))
    }
}

/// Owned CSR arrays, for callers that need somewhere to keep the data
#[derive(Debug, Clone, PartialEq)]
pub struct CsrData<T> {
    pub n_cols: usize,
    pub row_offsets: Vec<usize>,
    pub col_indices: Vec<usize>,
    pub values: Vec<T>,
}

impl<T> CsrData<T> {
    pub fn new(
        n_cols: usize,
        row_offsets: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        Self {
            n_cols,
            row_offsets,
            col_indices,
            values,
        }
    }

    /// Validates the arrays and borrows them as a [`SparseMatrixCSR`]
    pub fn view(&self) -> Result<SparseMatrixCSR<'_, T>, ShapeError> {
        SparseMatrixCSR::try_new(
            self.n_cols,
            &self.row_offsets,
            &self.col_indices,
            &self.values,
        )
    }
}

impl<T: Copy + Num> CsrData<T> {
    /// Creates a matrix with no stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_cols, vec![0; n_rows + 1], Vec::new(), Vec::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::new(n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }
}

impl<T: fmt::Debug> fmt::Debug for SparseMatrixCSR<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_rows, n_cols) = self.shape();
        writeln!(f, "SparseMatrixCSR {} × {} ({} stored)", n_rows, n_cols, self.nnz())?;

        let shown_rows = n_rows.min(DEBUG_SAMPLE_ROWS);
        for i in 0..shown_rows {
            let (start, end) = (self.row_offsets[i], self.row_offsets[i + 1]);
            write!(f, "  row {}:", i)?;
            if start == end {
                write!(f, " (empty)")?;
            }

            let shown = (end - start).min(DEBUG_SAMPLE_ENTRIES);
            for (col, value) in self.row_iter(i).take(shown) {
                write!(f, " ({}, {:?})", col, value)?;
            }
            if end - start > shown {
                write!(f, " ... ({} more)", end - start - shown)?;
            }
            writeln!(f)?;
        }
        if n_rows > shown_rows {
            writeln!(f, "  ... ({} more rows)", n_rows - shown_rows)?;
        }
        Ok(())
    }
}
