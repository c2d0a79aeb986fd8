//! Element types and kernel selection

use std::fmt::Debug;

use num_traits::{Float, FromPrimitive};
use tracing::{debug, warn};

use super::{RowKernel, ScalarKernel};
use crate::error::UnsupportedHardwareError;
use crate::matrix::config::{detect_architecture, Architecture, Backend};

/// Floating-point element types with scalar and vector kernels
pub trait SpmmElement: Float + FromPrimitive + Debug + Default + Send + Sync + 'static {
    /// Type name reported in errors
    const NAME: &'static str;

    /// Vector kernel for `arch`, or `None` when this build has none for it
    /// or the CPU lacks the instruction set
    fn vector_kernel(arch: Architecture) -> Option<Box<dyn RowKernel<Self>>>;
}

macro_rules! impl_spmm_element {
    ($($elem:ty),*) => {
        $(
            impl SpmmElement for $elem {
                const NAME: &'static str = stringify!($elem);

                fn vector_kernel(arch: Architecture) -> Option<Box<dyn RowKernel<Self>>> {
                    match arch {
                        #[cfg(target_arch = "x86_64")]
                        Architecture::X86Avx2Fma => super::x86::Avx2FmaKernel::detect()
                            .map(|k| Box::new(k) as Box<dyn RowKernel<Self>>),
                        #[cfg(target_arch = "x86_64")]
                        Architecture::X86Sse2 => super::x86::Sse2Kernel::detect()
                            .map(|k| Box::new(k) as Box<dyn RowKernel<Self>>),
                        #[cfg(target_arch = "aarch64")]
                        Architecture::ArmNeon => super::neon::NeonKernel::detect()
                            .map(|k| Box::new(k) as Box<dyn RowKernel<Self>>),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_spmm_element!(f32, f64);

/// Create the vector kernel for `arch`
///
/// # Errors
///
/// Returns [`UnsupportedHardwareError`] when `arch` has no vector unit, the
/// running CPU lacks its instruction set, or this build targets a different
/// architecture family.
pub fn create_vector_kernel<T: SpmmElement>(
    arch: Architecture,
) -> Result<Box<dyn RowKernel<T>>, UnsupportedHardwareError> {
    let unsupported = |reason: &str| UnsupportedHardwareError {
        architecture: arch,
        element: T::NAME,
        reason: reason.to_string(),
    };

    if !arch.has_simd_support() {
        return Err(unsupported("no vector unit detected on this CPU"));
    }
    if !arch.is_supported() {
        return Err(unsupported("instruction set not available on this CPU or target"));
    }
    T::vector_kernel(arch).ok_or_else(|| unsupported("no kernel compiled for this target"))
}

/// Create the kernel a backend asks for
///
/// `architecture` overrides detection of the widest supported instruction
/// set. Under [`Backend::Auto`] a detected-but-unusable vector unit falls
/// back to [`ScalarKernel`], and an explicit [`Architecture::Generic`] means
/// the scalar kernel.
///
/// # Errors
///
/// [`Backend::Vector`] without a usable vector kernel, or any backend other
/// than [`Backend::Scalar`] given an explicit vector architecture the CPU
/// cannot run.
pub fn create_kernel<T: SpmmElement>(
    backend: Backend,
    architecture: Option<Architecture>,
) -> Result<Box<dyn RowKernel<T>>, UnsupportedHardwareError> {
    let arch = architecture.unwrap_or_else(detect_architecture);

    let kernel: Box<dyn RowKernel<T>> = match backend {
        Backend::Scalar => Box::new(ScalarKernel::new()),
        Backend::Vector => create_vector_kernel(arch)?,
        Backend::Auto if architecture.is_some() && arch.has_simd_support() => {
            create_vector_kernel(arch)?
        }
        Backend::Auto => match create_vector_kernel(arch) {
            Ok(kernel) => kernel,
            Err(err) => {
                warn!(%err, "no vector kernel, using scalar");
                Box::new(ScalarKernel::new())
            }
        },
    };

    debug!(
        kernel = kernel.name(),
        lanes = kernel.lanes(),
        element = T::NAME,
        ?backend,
        "selected spmm kernel"
    );
    Ok(kernel)
}
