//! x86_64 vector kernels (AVX2 + FMA, and the SSE2 baseline)

use std::arch::x86_64::*;
use std::mem::size_of;

use super::RowKernel;
use crate::constants::{AVX2_VECTOR_WIDTH_BYTES, SSE2_VECTOR_WIDTH_BYTES};
use crate::matrix::Architecture;

lane_axpy! {
    #[target_feature(enable = "avx2,fma")]
    fn axpy_f32_avx2(f32, lanes = AVX2_VECTOR_WIDTH_BYTES / size_of::<f32>()) {
        splat: _mm256_set1_ps,
        load: _mm256_loadu_ps,
        store: _mm256_storeu_ps,
        madd: |a, vx, vy| _mm256_fmadd_ps(a, vx, vy),
    }
}

lane_axpy! {
    #[target_feature(enable = "avx2,fma")]
    fn axpy_f64_avx2(f64, lanes = AVX2_VECTOR_WIDTH_BYTES / size_of::<f64>()) {
        splat: _mm256_set1_pd,
        load: _mm256_loadu_pd,
        store: _mm256_storeu_pd,
        madd: |a, vx, vy| _mm256_fmadd_pd(a, vx, vy),
    }
}

lane_axpy! {
    #[target_feature(enable = "sse2")]
    fn axpy_f32_sse2(f32, lanes = SSE2_VECTOR_WIDTH_BYTES / size_of::<f32>()) {
        splat: _mm_set1_ps,
        load: _mm_loadu_ps,
        store: _mm_storeu_ps,
        madd: |a, vx, vy| _mm_add_ps(vy, _mm_mul_ps(a, vx)),
    }
}

lane_axpy! {
    #[target_feature(enable = "sse2")]
    fn axpy_f64_sse2(f64, lanes = SSE2_VECTOR_WIDTH_BYTES / size_of::<f64>()) {
        splat: _mm_set1_pd,
        load: _mm_loadu_pd,
        store: _mm_storeu_pd,
        madd: |a, vx, vy| _mm_add_pd(vy, _mm_mul_pd(a, vx)),
    }
}

/// 256-bit kernel with fused multiply-add
///
/// Only obtainable through [`Avx2FmaKernel::detect`], which is what makes the
/// `unsafe` calls below sound.
#[derive(Debug)]
pub struct Avx2FmaKernel {
    _detected: (),
}

impl Avx2FmaKernel {
    pub fn detect() -> Option<Self> {
        Architecture::X86Avx2Fma
            .is_supported()
            .then_some(Self { _detected: () })
    }
}

impl RowKernel<f32> for Avx2FmaKernel {
    fn name(&self) -> &'static str {
        "avx2-fma"
    }

    fn architecture(&self) -> Architecture {
        Architecture::X86Avx2Fma
    }

    fn axpy(&self, acc: &mut [f32], alpha: f32, x: &[f32]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: avx2 and fma were detected when `self` was built
        unsafe { axpy_f32_avx2(acc, alpha, x) }
    }
}

impl RowKernel<f64> for Avx2FmaKernel {
    fn name(&self) -> &'static str {
        "avx2-fma"
    }

    fn architecture(&self) -> Architecture {
        Architecture::X86Avx2Fma
    }

    fn axpy(&self, acc: &mut [f64], alpha: f64, x: &[f64]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: avx2 and fma were detected when `self` was built
        unsafe { axpy_f64_avx2(acc, alpha, x) }
    }
}

/// 128-bit kernel; SSE2 has no fused multiply-add, so it rounds like scalar
#[derive(Debug)]
pub struct Sse2Kernel {
    _detected: (),
}

impl Sse2Kernel {
    pub fn detect() -> Option<Self> {
        Architecture::X86Sse2
            .is_supported()
            .then_some(Self { _detected: () })
    }
}

impl RowKernel<f32> for Sse2Kernel {
    fn name(&self) -> &'static str {
        "sse2"
    }

    fn architecture(&self) -> Architecture {
        Architecture::X86Sse2
    }

    fn axpy(&self, acc: &mut [f32], alpha: f32, x: &[f32]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: sse2 was detected when `self` was built
        unsafe { axpy_f32_sse2(acc, alpha, x) }
    }
}

impl RowKernel<f64> for Sse2Kernel {
    fn name(&self) -> &'static str {
        "sse2"
    }

    fn architecture(&self) -> Architecture {
        Architecture::X86Sse2
    }

    fn axpy(&self, acc: &mut [f64], alpha: f64, x: &[f64]) {
        debug_assert_eq!(acc.len(), x.len());
        // SAFETY: sse2 was detected when `self` was built
        unsafe { axpy_f64_sse2(acc, alpha, x) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::ScalarKernel;

    fn check_against_scalar<K>(kernel: &K)
    where
        K: RowKernel<f32> + RowKernel<f64>,
    {
        for n in 0..=19 {
            let x32: Vec<f32> = (0..n).map(|i| i as f32 - 3.0).collect();
            let mut acc32: Vec<f32> = (0..n).map(|i| (i * 2) as f32).collect();
            let mut expected32 = acc32.clone();
            RowKernel::<f32>::axpy(&ScalarKernel, &mut expected32, 1.5, &x32);
            RowKernel::<f32>::axpy(kernel, &mut acc32, 1.5, &x32);
            assert_eq!(acc32, expected32, "f32 width {}", n);

            let x64: Vec<f64> = x32.iter().map(|&v| v as f64).collect();
            let mut acc64: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let mut expected64 = acc64.clone();
            RowKernel::<f64>::axpy(&ScalarKernel, &mut expected64, -0.25, &x64);
            RowKernel::<f64>::axpy(kernel, &mut acc64, -0.25, &x64);
            assert_eq!(acc64, expected64, "f64 width {}", n);
        }
    }

    #[test]
    fn test_sse2_matches_scalar_on_every_tail() {
        let kernel = Sse2Kernel::detect().expect("sse2 is part of the x86_64 baseline");
        assert_eq!(RowKernel::<f32>::lanes(&kernel), 4);
        assert_eq!(RowKernel::<f64>::lanes(&kernel), 2);
        check_against_scalar(&kernel);
    }

    #[test]
    fn test_avx2_matches_scalar_on_every_tail() {
        let Some(kernel) = Avx2FmaKernel::detect() else {
            return;
        };
        assert_eq!(RowKernel::<f32>::lanes(&kernel), 8);
        assert_eq!(RowKernel::<f64>::lanes(&kernel), 4);
        check_against_scalar(&kernel);
    }

    #[test]
    fn test_tail_leaves_neighbours_untouched() {
        let kernel = Sse2Kernel::detect().expect("sse2 is part of the x86_64 baseline");
        let mut buffer = vec![-1.0f32; 9];
        let x = vec![1.0f32; 7];
        RowKernel::<f32>::axpy(&kernel, &mut buffer[1..8], 2.0, &x);
        assert_eq!(buffer[0], -1.0);
        assert_eq!(buffer[8], -1.0);
        assert!(buffer[1..8].iter().all(|&v| v == 1.0));
    }
}
