//! Error types for sparse × dense multiplication
//!
//! Shape problems are detected before any accumulation starts, so a failed
//! call never hands back a partially written result.

use thiserror::Error;

use crate::matrix::config::Architecture;

/// Malformed CSR arrays or incompatible operand dimensions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `row_offsets` must hold at least the leading zero
    #[error("row_offsets is empty; expected n_rows + 1 entries")]
    EmptyRowOffsets,

    #[error("row_offsets[0] must be 0, found {found}")]
    NonZeroFirstOffset { found: usize },

    #[error("col_indices has {col_indices} entries but values has {values}")]
    ValuesLengthMismatch { col_indices: usize, values: usize },

    /// The last row offset must equal the number of stored nonzeros
    #[error("row_offsets ends at {last_offset} but col_indices has {nnz} entries")]
    NnzMismatch { last_offset: usize, nnz: usize },

    #[error("row_offsets decreases at row {row}: {start} > {end}")]
    DecreasingRowOffsets { row: usize, start: usize, end: usize },

    #[error("col_indices[{position}] = {col} is out of bounds for {n_cols} columns")]
    ColumnOutOfBounds {
        position: usize,
        col: usize,
        n_cols: usize,
    },

    /// Flat dense buffer that cannot be split into rows of `cols` elements
    #[error("dense buffer of length {len} is not a whole number of rows of {cols} columns")]
    DenseLength { len: usize, cols: usize },

    #[error("dense row {row} has {actual} columns, expected {expected}")]
    RaggedDense {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Sparse column count must equal the dense row count
    #[error("sparse matrix has {sparse_cols} columns but dense matrix has {dense_rows} rows")]
    DimensionMismatch {
        sparse_cols: usize,
        dense_rows: usize,
    },
}

/// A vector backend was requested on a CPU that cannot run it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{architecture:?} kernel for {element} is unavailable: {reason}")]
pub struct UnsupportedHardwareError {
    pub architecture: Architecture,
    pub element: &'static str,
    pub reason: String,
}

/// Umbrella error for every fallible operation in the crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpmmError {
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("unsupported hardware: {0}")]
    UnsupportedHardware(#[from] UnsupportedHardwareError),

    /// Invalid configuration value (for example from the environment)
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias using [`SpmmError`]
pub type Result<T> = std::result::Result<T, SpmmError>;

impl SpmmError {
    pub fn is_shape(&self) -> bool {
        matches!(self, SpmmError::Shape(_))
    }

    pub fn is_unsupported_hardware(&self) -> bool {
        matches!(self, SpmmError::UnsupportedHardware(_))
    }
}
