//! Configuration and hardware detection for the SpMM engine

use std::str::FromStr;

use crate::constants::{
    AVX2_VECTOR_WIDTH_BYTES, DEFAULT_PARALLEL_ROW_THRESHOLD, ENV_BACKEND, ENV_PARALLEL,
    ENV_PARALLEL_THRESHOLD, ENV_THREADS, NEON_VECTOR_WIDTH_BYTES, SSE2_VECTOR_WIDTH_BYTES,
};
use crate::error::{Result, SpmmError};

/// Instruction set a vector kernel targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// x86_64 with AVX2 and FMA (256-bit lanes, fused multiply-add)
    X86Avx2Fma,
    /// x86_64 baseline SSE2 (128-bit lanes, separate multiply and add)
    X86Sse2,
    /// aarch64 Advanced SIMD (128-bit lanes, fused multiply-add)
    ArmNeon,
    /// No vector unit available; everything runs one element at a time
    Generic,
}

impl Architecture {
    /// Check if this architecture has SIMD support
    pub fn has_simd_support(&self) -> bool {
        !matches!(self, Architecture::Generic)
    }

    /// Check if the vector kernel uses a fused multiply-add instruction
    pub fn has_fma(&self) -> bool {
        matches!(self, Architecture::X86Avx2Fma | Architecture::ArmNeon)
    }

    /// Vector register width in bytes, or 0 for [`Architecture::Generic`]
    pub fn vector_width_bytes(&self) -> usize {
        match self {
            Architecture::X86Avx2Fma => AVX2_VECTOR_WIDTH_BYTES,
            Architecture::X86Sse2 => SSE2_VECTOR_WIDTH_BYTES,
            Architecture::ArmNeon => NEON_VECTOR_WIDTH_BYTES,
            Architecture::Generic => 0,
        }
    }

    /// Number of `T` elements one vector instruction processes
    ///
    /// Never less than 1, so a scalar target degrades to width-one steps.
    pub fn lanes<T>(&self) -> usize {
        (self.vector_width_bytes() / std::mem::size_of::<T>()).max(1)
    }

    /// Check whether the running CPU can execute this architecture's kernels
    pub fn is_supported(&self) -> bool {
        match self {
            Architecture::Generic => true,
            #[cfg(target_arch = "x86_64")]
            Architecture::X86Avx2Fma => {
                std::is_x86_feature_detected!("avx2") && std::is_x86_feature_detected!("fma")
            }
            #[cfg(target_arch = "x86_64")]
            Architecture::X86Sse2 => std::is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "aarch64")]
            Architecture::ArmNeon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// All architectures with vector kernels, widest first
    pub fn vector_architectures() -> [Architecture; 3] {
        [
            Architecture::X86Avx2Fma,
            Architecture::ArmNeon,
            Architecture::X86Sse2,
        ]
    }
}

/// Detects the widest vector architecture the running CPU supports
pub fn detect_architecture() -> Architecture {
    Architecture::vector_architectures()
        .into_iter()
        .find(Architecture::is_supported)
        .unwrap_or(Architecture::Generic)
}

/// Every vector architecture the running CPU supports, widest first
pub fn available_architectures() -> Vec<Architecture> {
    Architecture::vector_architectures()
        .into_iter()
        .filter(Architecture::is_supported)
        .collect()
}

/// Which kernel family the engine should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Portable reference kernel
    Scalar,
    /// Vector kernel; selection fails if the CPU has none
    Vector,
    /// Vector kernel when available, otherwise scalar
    #[default]
    Auto,
}

impl FromStr for Backend {
    type Err = SpmmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Backend::Scalar),
            "vector" | "simd" => Ok(Backend::Vector),
            "auto" => Ok(Backend::Auto),
            other => Err(SpmmError::Config(format!(
                "unknown backend {other:?}; expected scalar, vector or auto"
            ))),
        }
    }
}

/// Configuration for [`SpmmEngine`](crate::SpmmEngine)
#[derive(Debug, Clone)]
pub struct SpmmConfig {
    /// Kernel family to select
    pub backend: Backend,

    /// Vector architecture to use; `None` picks the widest supported one
    pub architecture: Option<Architecture>,

    /// Whether rows may be processed on the rayon thread pool
    pub parallel: bool,

    /// Minimum number of sparse rows before rows are split across threads
    pub parallel_row_threshold: usize,

    /// Number of threads the work split is sized for
    pub n_threads: usize,
}

impl Default for SpmmConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            architecture: None,
            parallel: false,
            parallel_row_threshold: DEFAULT_PARALLEL_ROW_THRESHOLD,
            n_threads: num_cpus::get(),
        }
    }
}

impl SpmmConfig {
    /// Config that always runs the scalar reference kernel
    pub fn scalar() -> Self {
        Self::default().with_backend(Backend::Scalar)
    }

    /// Config that requires a vector kernel
    pub fn vector() -> Self {
        Self::default().with_backend(Backend::Vector)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_row_threshold(mut self, threshold: usize) -> Self {
        self.parallel_row_threshold = threshold;
        self
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads.max(1);
        self
    }

    /// Build a config from `CSRMM_*` environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup over the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BACKEND) {
            config.backend = value.parse()?;
        }
        if let Some(value) = lookup(ENV_PARALLEL) {
            config.parallel = parse_flag(ENV_PARALLEL, &value)?;
        }
        if let Some(value) = lookup(ENV_PARALLEL_THRESHOLD) {
            config.parallel_row_threshold = parse_count(ENV_PARALLEL_THRESHOLD, &value)?;
        }
        if let Some(value) = lookup(ENV_THREADS) {
            config = config.with_threads(parse_count(ENV_THREADS, &value)?);
        }

        Ok(config)
    }

    /// Minimum rows per rayon task for a matrix with `n_rows` rows
    pub fn min_rows_per_task(&self, n_rows: usize) -> usize {
        let tasks = self.n_threads.max(1) * crate::constants::TASKS_PER_THREAD;
        (n_rows / tasks).max(1)
    }

    /// Whether a matrix with `n_rows` rows should be split across threads
    pub fn should_parallelize(&self, n_rows: usize) -> bool {
        self.parallel && n_rows >= self.parallel_row_threshold
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SpmmError::Config(format!(
            "{key}: expected a boolean, got {other:?}"
        ))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| SpmmError::Config(format!("{key}: expected a count, got {value:?}")))
}
