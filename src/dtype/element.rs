//! Element trait for mapping Rust types to DType

use super::DType;
use std::fmt::Debug;
use std::ops::{Add, Mul};

/// Trait for scalar types the functors operate on
///
/// This trait connects Rust's type system to the [`DType`] tag. It is
/// implemented for `f64`, `f32` and, with the `f16` feature, `half::f16` and
/// `half::bf16`.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - functors are shared freely across workers
/// - `Add + Mul` - accumulation and the mean reciprocal (Output = Self)
/// - `PartialOrd` - comparison for min/max reductions
pub trait Element:
    Copy + Debug + Send + Sync + 'static + Add<Output = Self> + Mul<Output = Self> + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 (exact for every supported type)
    fn to_f64(self) -> f64;

    /// Convert from f64, rounding to nearest
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

/// Cast between element types
///
/// Goes through f64, which holds every supported type exactly, so widening is
/// lossless and narrowing rounds exactly once. Casting a type to itself returns
/// the value unchanged (NaN payload aside).
#[inline]
pub fn cast<Tx: Element, Ty: Element>(x: Tx) -> Ty {
    Ty::from_f64(x.to_f64())
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }
}
