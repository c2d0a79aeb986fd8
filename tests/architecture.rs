use csrmm::{
    available_architectures, detect_architecture, Architecture, Backend, SpmmConfig, SpmmEngine,
};

#[test]
fn test_architecture_detection() {
    let arch = detect_architecture();

    // SSE2 is part of the x86_64 baseline, so some vector unit is always found
    #[cfg(target_arch = "x86_64")]
    {
        assert!(arch == Architecture::X86Avx2Fma || arch == Architecture::X86Sse2);
    }

    #[cfg(target_arch = "aarch64")]
    {
        assert!(arch == Architecture::ArmNeon || arch == Architecture::Generic);
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        assert_eq!(arch, Architecture::Generic);
    }
}

#[test]
fn test_architecture_capabilities() {
    assert!(Architecture::X86Avx2Fma.has_fma());
    assert!(Architecture::ArmNeon.has_fma());
    assert!(!Architecture::X86Sse2.has_fma());
    assert!(!Architecture::Generic.has_simd_support());
    assert_eq!(Architecture::Generic.vector_width_bytes(), 0);
}

#[test]
fn test_vectorized_engine_follows_detection() {
    match SpmmEngine::<f32>::vectorized() {
        Ok(engine) => {
            assert_eq!(engine.architecture(), detect_architecture());
            assert_eq!(engine.lanes(), detect_architecture().lanes::<f32>());
            assert!(engine.lanes() > 1);
        }
        Err(err) => {
            assert!(err.is_unsupported_hardware());
            assert!(available_architectures().is_empty());
        }
    }
}

#[test]
fn test_available_architectures_are_ordered_widest_first() {
    let widths: Vec<usize> = available_architectures()
        .iter()
        .map(Architecture::vector_width_bytes)
        .collect();
    assert!(widths.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_auto_rejects_unavailable_requested_architecture() {
    let missing = Architecture::vector_architectures()
        .into_iter()
        .find(|arch| !arch.is_supported());

    // Every vector architecture is foreign to some target, so this only
    // skips on a CPU that somehow supports all of them
    let Some(arch) = missing else { return };

    let config = SpmmConfig::default()
        .with_backend(Backend::Auto)
        .with_architecture(arch);
    let err = SpmmEngine::<f32>::new(config).unwrap_err();
    assert!(err.is_unsupported_hardware());
    assert!(err.to_string().contains(&format!("{:?}", arch)));
}

#[test]
fn test_auto_with_generic_runs_scalar() {
    let config = SpmmConfig::default()
        .with_backend(Backend::Auto)
        .with_architecture(Architecture::Generic);
    let engine = SpmmEngine::<f64>::new(config).unwrap();
    assert_eq!(engine.kernel_name(), "scalar");
    assert_eq!(engine.lanes(), 1);
}
