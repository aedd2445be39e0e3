//! Tagged-variant post-processing
//!
//! [`Finalizer`] is the closed set of functors behind one constructor, for call
//! sites that pick the post-processing step at runtime (e.g. from a
//! [`ReduceOp`](super::ReduceOp)) instead of through a type parameter.
//!
//! `Finalizer` does not implement [`Transformer`]: a count alone cannot pick the
//! variant, so the kind is always passed to [`Finalizer::new`].

use super::functor::{DivideFunctor, ExpLogitTransformer, IdentityFunctor, Transformer};
use super::math::DeviceMath;
use crate::dtype::Element;

/// Which functor a [`Finalizer`] wraps
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PostOp {
    /// [`ExpLogitTransformer`]
    Exp,
    /// [`IdentityFunctor`]
    Identity,
    /// [`DivideFunctor`]
    Divide,
}

/// One of the elementwise functors, selected by [`PostOp`]
#[derive(Copy, Clone, Debug)]
pub enum Finalizer<Tx, Ty = Tx> {
    /// `exp(x)`
    Exp(ExpLogitTransformer<Tx, Ty>),
    /// `x`
    Identity(IdentityFunctor<Tx, Ty>),
    /// `x * (1 / n)`
    Divide(DivideFunctor<Tx, Ty>),
}

// DeviceMath is needed by the Exp variant only, but bounds apply to the whole enum.
impl<Tx: DeviceMath, Ty: Element> Finalizer<Tx, Ty> {
    /// Build the functor for `kind` over `n` elements
    #[inline]
    pub fn new(kind: PostOp, n: i32) -> Self {
        match kind {
            PostOp::Exp => Self::Exp(ExpLogitTransformer::new(n)),
            PostOp::Identity => Self::Identity(IdentityFunctor::new(n)),
            PostOp::Divide => Self::Divide(DivideFunctor::new(n)),
        }
    }

    /// The wrapped functor's kind
    #[inline]
    pub fn kind(&self) -> PostOp {
        match self {
            Self::Exp(_) => PostOp::Exp,
            Self::Identity(_) => PostOp::Identity,
            Self::Divide(_) => PostOp::Divide,
        }
    }

    /// Apply the wrapped functor to `x`
    #[inline]
    pub fn apply(&self, x: Tx) -> Ty {
        match self {
            Self::Exp(f) => f.apply(x),
            Self::Identity(f) => f.apply(x),
            Self::Divide(f) => f.apply(x),
        }
    }

    /// Apply the wrapped functor to `xs[0]`
    ///
    /// # Panics
    /// Panics if `xs` is empty.
    #[inline]
    pub fn apply_first(&self, xs: &[Tx]) -> Ty {
        self.apply(xs[0])
    }
}
