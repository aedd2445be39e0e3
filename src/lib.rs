//! # kprim
//!
//! **Elementwise transform functors for reduction and elementwise kernels.**
//!
//! kprim provides the small per-element building blocks reduction kernels are
//! assembled from: a type-dispatched exponential and logarithm, an exponential
//! transform for logits, and the identity and divide-by-N post-processing steps
//! that finish sum-like and mean reductions.
//!
//! ## Features
//!
//! - **Type dispatch**: `exp`/`log` resolved per element type at compile time
//! - **Uniform functors**: every functor is built from an element count
//! - **Multiple dtypes**: f64, f32, f16, bf16
//! - **Reference reductions**: sum, mean, max, min, prod, any, log-sum-exp
//!
//! ## Quick Start
//!
//! ```rust
//! use kprim::prelude::*;
//!
//! let data = [2.0f32, 4.0, 6.0, 8.0];
//! let sum: f32 = reduce(ReduceOp::Sum, &data, &ReduceConfig::default())?;
//!
//! let mean = DivideFunctor::<f32>::new(data.len() as i32);
//! assert_eq!(mean.apply(sum), 5.0);
//! # Ok::<(), kprim::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16` (default): Half-precision floats (F16, BF16)
//! - `rayon` (default): Multi-threaded row reductions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod ops;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{AccumulationPrecision, DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        DeviceMath, DivideFunctor, ExpLogitTransformer, Finalizer, IdentityFunctor, PostOp,
        ReduceConfig, ReduceOp, Transformer, reduce, reduce_rows,
    };
}
