//! Utility functions and helpers

pub mod formats;
pub mod generate;

pub use formats::{csr_from_sprs, dense_from_ndarray, dense_to_ndarray};
pub use generate::{random_csr, random_csr_with_duplicates, random_dense};

/// CSR row offsets for rows holding `counts[i]` stored entries each
///
/// The result has `counts.len() + 1` entries, starts at 0 and ends at the
/// total number of entries.
pub fn offsets_from_counts(counts: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(counts.iter().scan(0, |total, &count| {
            *total += count;
            Some(*total)
        }))
        .collect()
}
