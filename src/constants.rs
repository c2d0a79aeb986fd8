//! Centralized constants for the csrmm library
//!
//! All hardcoded numbers used by the kernels and the engine live here.

// ============================================================================
// ARCHITECTURE-SPECIFIC CONSTANTS
// ============================================================================

/// Vector register width in bytes for AVX2
pub const AVX2_VECTOR_WIDTH_BYTES: usize = 32;

/// Vector register width in bytes for SSE2
pub const SSE2_VECTOR_WIDTH_BYTES: usize = 16;

/// Vector register width in bytes for ARM NEON
pub const NEON_VECTOR_WIDTH_BYTES: usize = 16;

// ============================================================================
// MEMORY LAYOUT
// ============================================================================

/// Alignment of dense matrix storage (one cache line)
pub const DENSE_ALIGNMENT: usize = 64;

// ============================================================================
// PARALLEL EXECUTION
// ============================================================================

/// Row count below which the engine stays on the calling thread
pub const DEFAULT_PARALLEL_ROW_THRESHOLD: usize = 256;

/// Work items handed to each thread when splitting rows
pub const TASKS_PER_THREAD: usize = 4;

// ============================================================================
// DEBUG OUTPUT
// ============================================================================

/// Rows shown by the `Debug` impls of the matrix types
pub const DEBUG_SAMPLE_ROWS: usize = 4;

/// Entries shown per row by the `Debug` impls of the matrix types
pub const DEBUG_SAMPLE_ENTRIES: usize = 4;

// ============================================================================
// ENVIRONMENT
// ============================================================================

pub const ENV_BACKEND: &str = "CSRMM_BACKEND";
pub const ENV_PARALLEL: &str = "CSRMM_PARALLEL";
pub const ENV_PARALLEL_THRESHOLD: &str = "CSRMM_PARALLEL_THRESHOLD";
pub const ENV_THREADS: &str = "CSRMM_THREADS";
