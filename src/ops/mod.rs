//! Elementwise functors and the reductions that use them
//!
//! # Design
//!
//! ```text
//! math      exp / log per element type (DeviceMath)
//!   └── functor    ExpLogitTransformer, IdentityFunctor, DivideFunctor (Transformer)
//!         └── finalize   PostOp + Finalizer (runtime-selected functor)
//!               └── reduce     ReduceOp, ReduceConfig, host reference reductions
//! ```
//!
//! Everything below `reduce` is pure and allocation-free; it is what a kernel
//! calls per element. `reduce` is host code: it validates input, logs, and may
//! fan rows out across threads.

mod finalize;
mod functor;
pub mod math;
mod reduce;

pub use finalize::{Finalizer, PostOp};
pub use functor::{DivideFunctor, ExpLogitTransformer, IdentityFunctor, Transformer};
pub use math::{DeviceMath, exp, log};
pub use reduce::{
    ReduceConfig, ReduceOp, log_sum_exp_rows, reduce, reduce_rows, transform_reduce,
};
