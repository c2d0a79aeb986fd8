//! End-to-end correctness of the public entry points

use csrmm::{
    multiply, spmm, spmm_vectorized, CsrData, DenseMatrix, ShapeError, SparseMatrixCSR,
    SpmmError,
};

const ROW_OFFSETS: [usize; 4] = [0, 2, 3, 5];
const COL_INDICES: [usize; 5] = [0, 3, 2, 0, 3];
const VALUES: [f32; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

fn literal_dense() -> Vec<f32> {
    // 4 x 2, row-major
    vec![1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 6.0]
}

fn expected_rows() -> Vec<Vec<f32>> {
    vec![vec![11.0, 14.0], vec![9.0, 12.0], vec![29.0, 38.0]]
}

#[test]
fn test_literal_scenario_scalar() {
    let result = spmm(&ROW_OFFSETS, &COL_INDICES, &VALUES, &literal_dense(), 2).unwrap();

    assert_eq!(result.shape(), (3, 2));
    assert_eq!(result.to_rows(), expected_rows());
}

#[test]
fn test_literal_scenario_vectorized() {
    match spmm_vectorized(&ROW_OFFSETS, &COL_INDICES, &VALUES, &literal_dense(), 2) {
        Ok(result) => assert_eq!(result.to_rows(), expected_rows()),
        Err(err) => assert!(err.is_unsupported_hardware(), "unexpected error: {}", err),
    }
}

#[test]
fn test_literal_scenario_from_nested_rows() {
    let dense = DenseMatrix::from_rows(&[
        vec![1.0f32, 2.0],
        vec![0.0, 0.0],
        vec![3.0, 4.0],
        vec![5.0, 6.0],
    ])
    .unwrap();
    let csr = SparseMatrixCSR::try_new(4, &ROW_OFFSETS, &COL_INDICES, &VALUES).unwrap();

    let result = multiply(&csr, &dense).unwrap();
    assert_eq!(result.to_rows(), expected_rows());
}

#[test]
fn test_all_zero_sparse_gives_zero_result() {
    let row_offsets = [0, 0, 0, 0, 0];
    let dense: Vec<f64> = (0..21).map(|i| i as f64 + 0.5).collect();

    let result = spmm::<f64>(&row_offsets, &[], &[], &dense, 7).unwrap();
    assert_eq!(result.shape(), (4, 7));
    assert!(result.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn test_empty_rows_between_populated_rows() {
    // row 1 and row 3 are empty
    let row_offsets = [0, 1, 1, 2, 2];
    let col_indices = [1, 0];
    let values = [2.0f64, -1.0];
    let dense = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let result = spmm(&row_offsets, &col_indices, &values, &dense, 3).unwrap();
    assert_eq!(
        result.to_rows(),
        vec![
            vec![8.0, 10.0, 12.0],
            vec![0.0, 0.0, 0.0],
            vec![-1.0, -2.0, -3.0],
            vec![0.0, 0.0, 0.0],
        ]
    );
}

#[test]
fn test_duplicate_columns_accumulate() {
    // Row 0 stores column 1 twice; both contributions must be added
    let row_offsets = [0, 3];
    let col_indices = [1, 0, 1];
    let values = [2.0f32, 1.0, 3.0];
    let dense = [10.0, 20.0, 1.0, 2.0];

    let result = spmm(&row_offsets, &col_indices, &values, &dense, 2).unwrap();
    assert_eq!(result.to_rows(), vec![vec![15.0, 30.0]]);

    if let Ok(result) = spmm_vectorized(&row_offsets, &col_indices, &values, &dense, 2) {
        assert_eq!(result.to_rows(), vec![vec![15.0, 30.0]]);
    }
}

#[test]
fn test_identity_times_dense_is_dense() {
    let identity = CsrData::<f64>::identity(5);
    let csr = identity.view().unwrap();
    let dense = DenseMatrix::from_fn(5, 9, |i, j| (i * 9 + j) as f64);

    let result = multiply(&csr, &dense).unwrap();
    assert_eq!(result, dense);
}

#[test]
fn test_shape_error_on_nnz_mismatch() {
    let err = spmm(&[0, 2, 3, 4], &COL_INDICES, &VALUES, &literal_dense(), 2).unwrap_err();
    assert_eq!(
        err,
        SpmmError::Shape(ShapeError::NnzMismatch {
            last_offset: 4,
            nnz: 5
        })
    );
}

#[test]
fn test_shape_error_on_column_past_dense_rows() {
    // Dense has only 3 rows, so column 3 is out of range
    let dense = vec![1.0f32, 2.0, 0.0, 0.0, 3.0, 4.0];
    let err = spmm(&ROW_OFFSETS, &COL_INDICES, &VALUES, &dense, 2).unwrap_err();
    assert_eq!(
        err,
        SpmmError::Shape(ShapeError::ColumnOutOfBounds {
            position: 1,
            col: 3,
            n_cols: 3
        })
    );
}

#[test]
fn test_shape_error_on_partial_dense_row() {
    let mut dense = literal_dense();
    dense.pop();
    let err = spmm(&ROW_OFFSETS, &COL_INDICES, &VALUES, &dense, 2).unwrap_err();
    assert_eq!(err, SpmmError::Shape(ShapeError::DenseLength { len: 7, cols: 2 }));
}

#[test]
fn test_shape_error_on_empty_offsets() {
    let err = spmm::<f32>(&[], &[], &[], &[], 0).unwrap_err();
    assert_eq!(err, SpmmError::Shape(ShapeError::EmptyRowOffsets));
}

#[test]
fn test_zero_width_dense_needs_a_typed_operand() {
    // A flat buffer with no columns has no rows either
    let err = spmm(&[0, 1], &[0], &[1.0f32], &[], 0).unwrap_err();
    assert_eq!(
        err,
        SpmmError::Shape(ShapeError::ColumnOutOfBounds {
            position: 0,
            col: 0,
            n_cols: 0
        })
    );

    let a = SparseMatrixCSR::try_new(1, &[0, 1], &[0], &[1.0f32]).unwrap();
    let c = multiply(&a, &DenseMatrix::zeros(1, 0)).unwrap();
    assert_eq!(c.shape(), (1, 0));
}
