//! Portable scalar kernel, the reference every vector kernel is checked against

use num_traits::Float;

use super::RowKernel;
use crate::matrix::Architecture;

/// One multiply-add per (nonzero, dense column) pair, in ascending column order
///
/// Each step rounds twice (multiply, then add). Vector kernels that fuse the
/// two may differ from this in the last bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl ScalarKernel {
    pub fn new() -> Self {
        ScalarKernel
    }
}

impl<T> RowKernel<T> for ScalarKernel
where
    T: Float + Send + Sync,
{
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn architecture(&self) -> Architecture {
        Architecture::Generic
    }

    fn axpy(&self, acc: &mut [T], alpha: T, x: &[T]) {
        debug_assert_eq!(acc.len(), x.len());
        for (a, &b) in acc.iter_mut().zip(x) {
            *a = *a + alpha * b;
        }
    }
}
