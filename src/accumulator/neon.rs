//! ARM NEON (Advanced SIMD) vector kernel

use std::arch::aarch64::*;
use std::mem::size_of;

use super::RowKernel;
use crate::constants::NEON_VECTOR_WIDTH_BYTES;
use crate::matrix::Architecture;

lane_axpy! {
    #[target_feature(enable = "neon")]
    fn axpy_f32_neon(f32, lanes = NEON_VECTOR_WIDTH_BYTES / size_of::<f32>()) {
        splat: vdupq_n_f32,
        load: vld1q_f32,
        store: vst1q_f32,
        madd: |a, vx, vy| vfmaq_f32(vy, vx, a),
    }
}

lane_axpy! {
    #[target_feature(enable = "neon")]
    fn axpy_f64_neon(f64, lanes = NEON_VECTOR_WIDTH_BYTES / size_of::<f64>()) {
        splat: vdupq_n_f64,
        load: vld1q_f64,
        store: vst1q_f64,
        madd: |a, vx, vy| vfmaq_f64(vy, vx, a),
    }
}

/// 128-bit NEON kernel with fused multiply-add
#[derive(Debug)]
pub struct NeonKernel {
    _detected: (),
}

impl NeonKernel {
    pub fn detect() -> Option<Self> {
        Architecture::ArmNeon
            .is_supported()
            .then_some(Self { _detected: () })
    }
}

impl RowKernel<f32> for NeonKernel {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn architecture(&self) -> Architecture {
        Architecture::ArmNeon
    }

    fn axpy(&self, acc: &mut [f32], alpha: f32, x: &[f32]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: neon was detected when `self` was built
        unsafe { axpy_f32_neon(acc, alpha, x) }
    }
}

impl RowKernel<f64> for NeonKernel {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn architecture(&self) -> Architecture {
        Architecture::ArmNeon
    }

    fn axpy(&self, acc: &mut [f64], alpha: f64, x: &[f64]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: neon was detected when `self` was built
        unsafe { axpy_f64_neon(acc, alpha, x) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_tail_widths() {
        let Some(kernel) = NeonKernel::detect() else {
            return;
        };
        assert_eq!(RowKernel::<f32>::lanes(&kernel), 4);

        for n in 0..=11 {
            let x: Vec<f32> = (0..n).map(|i| i as f32).collect();
            let mut acc = vec![1.0f32; n];
            RowKernel::<f32>::axpy(&kernel, &mut acc, 2.0, &x);
            let expected: Vec<f32> = (0..n).map(|i| 1.0 + 2.0 * i as f32).collect();
            assert_eq!(acc, expected);
        }
    }
}
