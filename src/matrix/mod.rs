// Matrix data structures and configuration

pub mod config;
pub mod csr;
pub mod dense;

pub use config::{available_architectures, detect_architecture, Architecture, Backend, SpmmConfig};
pub use csr::{CsrData, SparseMatrixCSR};
pub use dense::DenseMatrix;
