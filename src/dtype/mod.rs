//! Data type system for kprim
//!
//! This module provides the `DType` tag for the supported floating point element
//! types, the [`Element`] trait connecting Rust types to it, and the accumulation
//! precision used by host reductions.
//!
//! Transcendental dispatch never looks at `DType`: it is resolved by trait impls
//! on the concrete element type (see [`crate::ops::math`]). The tag exists for
//! logging, error reporting and accumulation precision resolution.

mod element;

pub use element::{Element, cast};

use std::fmt;

// ============================================================================
// Accumulation Precision
// ============================================================================

/// Accumulation precision for host reductions.
///
/// Reduced-precision inputs (F16, BF16) lose digits quickly when summed in their
/// own format, so reductions accumulate in a wider type before the
/// post-processing functor runs.
///
/// # Resolution
///
/// Accumulation never narrows below the input type: an F64 input with
/// `AccumulationPrecision::F32` still accumulates in F64. See [`Self::resolve`].
///
/// # Default
///
/// F32, which widens F16/BF16 and leaves F32 untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AccumulationPrecision {
    /// Accumulate in the input type itself
    Native,
    /// Accumulate in at least F32
    #[default]
    F32,
    /// Accumulate in F64
    F64,
}

impl AccumulationPrecision {
    /// The dtype a reduction over `input` accumulates in
    pub const fn resolve(self, input: DType) -> DType {
        match self {
            Self::Native => input,
            Self::F32 => match input {
                DType::F64 => DType::F64,
                _ => DType::F32,
            },
            Self::F64 => DType::F64,
        }
    }
}

// ============================================================================
// DType Enum
// ============================================================================

/// Element types supported by kprim functors
///
/// # Discriminant Values
///
/// The discriminants follow the usual float ordering (F64=0, F32=1, F16=2,
/// BF16=3) and are stable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
    /// 16-bit floating point (IEEE 754)
    F16 = 2,
    /// 16-bit brain floating point
    BF16 = 3,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 => 4,
            Self::F16 | Self::BF16 => 2,
        }
    }

    /// Returns true for the 16-bit types that take the reduced-precision math path
    #[inline]
    pub const fn is_reduced_precision(self) -> bool {
        matches!(self, Self::F16 | Self::BF16)
    }

    /// Short name for display (e.g., "f32", "bf16")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
        }
    }

    /// Largest finite value representable by this dtype (as f64)
    pub fn max_value(self) -> f64 {
        match self {
            Self::F64 => f64::MAX,
            Self::F32 => f32::MAX as f64,
            Self::F16 => 65504.0,
            Self::BF16 => 3.389_531_389_251_535_5e38,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
