//! Elementwise transform functors
//!
//! These are the per-element steps reduction kernels plug in around their
//! accumulation loop: a transform applied to each input ([`ExpLogitTransformer`])
//! and the post-processing applied to the accumulated value ([`IdentityFunctor`]
//! for sum/max/min/prod/any, [`DivideFunctor`] for mean).
//!
//! Every functor is built from a single element count, used or not, so call
//! sites can construct any of them the same way:
//!
//! ```
//! use kprim::ops::{DivideFunctor, IdentityFunctor, Transformer};
//!
//! let n = 4;
//! let mean = DivideFunctor::<f32>::new(n);
//! let id = IdentityFunctor::<f32, f64>::new(n);
//!
//! assert_eq!(mean.apply(20.0), 5.0);
//! assert_eq!(id.apply_first(&[1.5, 9.0]), 1.5);
//! ```
//!
//! Functors are `Copy + Send + Sync`, hold no mutable state and never allocate,
//! block or log.

use std::marker::PhantomData;

use super::math::{self, DeviceMath};
use crate::dtype::{Element, cast};
use crate::error::{Error, Result};

/// Uniform calling contract shared by all functors
///
/// `Tx` is the input element type, `Ty` the output type (defaults to `Tx`).
pub trait Transformer<Tx: Element, Ty: Element = Tx>: Copy + Send + Sync {
    /// Build the functor for a reduction over `n` elements
    fn new(n: i32) -> Self;

    /// Transform a single value
    fn apply(&self, x: Tx) -> Ty;

    /// Transform the first element of `xs`, ignoring the rest
    ///
    /// This is the pointer form of [`Self::apply`], not a reduction over `xs`.
    ///
    /// # Panics
    /// Panics if `xs` is empty. Use [`Self::try_apply_first`] to get an error
    /// instead.
    #[inline]
    fn apply_first(&self, xs: &[Tx]) -> Ty {
        self.apply(xs[0])
    }

    /// Like [`Self::apply_first`], but returns [`Error::EmptyInput`] on an empty slice
    #[inline]
    fn try_apply_first(&self, xs: &[Tx]) -> Result<Ty> {
        xs.first()
            .map(|&x| self.apply(x))
            .ok_or_else(|| Error::empty_input("apply_first"))
    }
}

// ============================================================================
// Exponential
// ============================================================================

/// `x -> exp(x)`, cast to the output type
///
/// Used to turn logits into unnormalized probabilities inside a summing
/// reduction (the margin cross-entropy normalizer).
pub struct ExpLogitTransformer<Tx, Ty = Tx> {
    _marker: PhantomData<fn(Tx) -> Ty>,
}

impl<Tx, Ty> ExpLogitTransformer<Tx, Ty> {
    /// Count is ignored
    #[inline]
    pub const fn new(_n: i32) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<Tx: DeviceMath, Ty: Element> Transformer<Tx, Ty> for ExpLogitTransformer<Tx, Ty> {
    #[inline]
    fn new(n: i32) -> Self {
        Self::new(n)
    }

    #[inline]
    fn apply(&self, x: Tx) -> Ty {
        cast(math::exp(x))
    }
}

// ============================================================================
// Identity
// ============================================================================

/// `x -> x`, cast to the output type
///
/// Post-processing for sum, max, min, prod and any.
pub struct IdentityFunctor<Tx, Ty = Tx> {
    _marker: PhantomData<fn(Tx) -> Ty>,
}

impl<Tx, Ty> IdentityFunctor<Tx, Ty> {
    /// Count is ignored
    #[inline]
    pub const fn new(_n: i32) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<Tx: Element, Ty: Element> Transformer<Tx, Ty> for IdentityFunctor<Tx, Ty> {
    #[inline]
    fn new(n: i32) -> Self {
        Self::new(n)
    }

    #[inline]
    fn apply(&self, x: Tx) -> Ty {
        cast(x)
    }
}

// ============================================================================
// Divide by N
// ============================================================================

/// `x -> x * (1 / n)`, in the output type
///
/// Post-processing for mean. The reciprocal is computed once, in f64, and
/// rounded to `Ty` at construction; each call is a single multiply.
///
/// `n = 0` is not rejected: the stored reciprocal is `+inf` and results follow
/// IEEE-754 (`+inf`, `-inf`, or NaN for a zero input).
pub struct DivideFunctor<Tx, Ty = Tx> {
    n_inv: Ty,
    _marker: PhantomData<fn(Tx)>,
}

impl<Tx, Ty: Element> DivideFunctor<Tx, Ty> {
    /// Precompute `1 / n` in the output type
    #[inline]
    pub fn new(n: i32) -> Self {
        Self {
            n_inv: Ty::from_f64(1.0 / n as f64),
            _marker: PhantomData,
        }
    }

    /// The stored reciprocal
    #[inline]
    pub fn reciprocal(&self) -> Ty {
        self.n_inv
    }
}

impl<Tx: Element, Ty: Element> Transformer<Tx, Ty> for DivideFunctor<Tx, Ty> {
    #[inline]
    fn new(n: i32) -> Self {
        Self::new(n)
    }

    #[inline]
    fn apply(&self, x: Tx) -> Ty {
        cast::<Tx, Ty>(x) * self.n_inv
    }
}

// Manual impls: derives would put bounds on the phantom parameters.

macro_rules! impl_functor_traits {
    ($name:ident) => {
        impl<Tx, Ty> Clone for $name<Tx, Ty> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<Tx, Ty> Copy for $name<Tx, Ty> {}

        impl<Tx, Ty> Default for $name<Tx, Ty> {
            #[inline]
            fn default() -> Self {
                Self::new(0)
            }
        }

        impl<Tx, Ty> std::fmt::Debug for $name<Tx, Ty> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    };
}

impl_functor_traits!(ExpLogitTransformer);
impl_functor_traits!(IdentityFunctor);

impl<Tx, Ty: Clone> Clone for DivideFunctor<Tx, Ty> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            n_inv: self.n_inv.clone(),
            _marker: PhantomData,
        }
    }
}

impl<Tx, Ty: Copy> Copy for DivideFunctor<Tx, Ty> {}

impl<Tx, Ty: std::fmt::Debug> std::fmt::Debug for DivideFunctor<Tx, Ty> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DivideFunctor")
            .field("n_inv", &self.n_inv)
            .finish()
    }
}
