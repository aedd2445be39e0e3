//! Host reference reductions
//!
//! Reductions are built from three pieces: an optional per-element transform,
//! an accumulation in the resolved [`AccumulationPrecision`], and a
//! post-processing functor chosen by [`ReduceOp::post_op`]. The functions here
//! run that pipeline on the host so kernel call sites have a reference to
//! compare against.
//!
//! ```text
//! input ──transform──▶ accumulate (Sum/Max/...) ──finalizer(n)──▶ cast ──▶ output
//! ```

use super::finalize::{Finalizer, PostOp};
use super::functor::{ExpLogitTransformer, Transformer};
use super::math::{self, DeviceMath};
use crate::dtype::{AccumulationPrecision, DType, Element, cast};
use crate::error::{Error, Result};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Reduction operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    /// Sum of elements
    Sum,
    /// Mean of elements
    Mean,
    /// Maximum element
    Max,
    /// Minimum element
    Min,
    /// Product of elements
    Prod,
    /// Logical OR (non-zero is true), as 1 or 0
    Any,
}

impl ReduceOp {
    /// Operation name for logs and errors
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Max => "max",
            Self::Min => "min",
            Self::Prod => "prod",
            Self::Any => "any",
        }
    }

    /// Post-processing applied to the accumulated value
    pub const fn post_op(self) -> PostOp {
        match self {
            Self::Mean => PostOp::Divide,
            Self::Sum | Self::Max | Self::Min | Self::Prod | Self::Any => PostOp::Identity,
        }
    }

    /// Build the post-processing functor for a reduction over `n` elements
    #[inline]
    pub fn finalizer<Tx: DeviceMath, Ty: Element>(self, n: i32) -> Finalizer<Tx, Ty> {
        Finalizer::new(self.post_op(), n)
    }
}

/// Settings for host reductions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReduceConfig {
    precision: AccumulationPrecision,
    min_len: usize,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            precision: AccumulationPrecision::default(),
            min_len: 4,
        }
    }
}

impl ReduceConfig {
    /// Set the accumulation precision
    pub fn with_precision(mut self, precision: AccumulationPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Minimum rows handed to one rayon task (clamped to at least 1)
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Accumulation precision
    pub fn precision(&self) -> AccumulationPrecision {
        self.precision
    }

    /// Minimum rows per rayon task
    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Reduce all of `input` to one value
///
/// The finalizer is built with `n = input.len()`, so `Mean` divides by the
/// element count.
///
/// # Errors
/// - [`Error::EmptyInput`] if `input` is empty
/// - [`Error::InvalidArgument`] if `input.len()` exceeds `i32::MAX`
#[tracing::instrument(skip(op, input, config), fields(
    op = op.name(),
    len = input.len(),
    dtype = Tx::DTYPE.short_name()
))]
pub fn reduce<Tx: DeviceMath, Ty: Element>(
    op: ReduceOp,
    input: &[Tx],
    config: &ReduceConfig,
) -> Result<Ty> {
    if input.is_empty() {
        return Err(Error::empty_input(op.name()));
    }
    let n = element_count(input.len())?;
    let acc = config.precision().resolve(Tx::DTYPE);
    tracing::debug!(accumulate = acc.short_name(), "reducing");

    Ok(reduce_slice(op, input, n, acc))
}

/// Reduce each contiguous row of `row_len` elements
///
/// Rows are independent; with the `rayon` feature they run in parallel.
///
/// # Errors
/// - [`Error::EmptyInput`] if `input` is empty
/// - [`Error::InvalidArgument`] if `row_len` is zero, does not divide
///   `input.len()`, or exceeds `i32::MAX`
#[tracing::instrument(skip(op, input, config), fields(
    op = op.name(),
    len = input.len(),
    dtype = Tx::DTYPE.short_name()
))]
pub fn reduce_rows<Tx: DeviceMath, Ty: Element>(
    op: ReduceOp,
    input: &[Tx],
    row_len: usize,
    config: &ReduceConfig,
) -> Result<Vec<Ty>> {
    let rows = validate_rows(op.name(), input.len(), row_len)?;
    let n = element_count(row_len)?;
    let acc = config.precision().resolve(Tx::DTYPE);
    tracing::debug!(rows, accumulate = acc.short_name(), "reducing rows");

    Ok(map_rows(input, row_len, config, |row| {
        reduce_slice(op, row, n, acc)
    }))
}

/// Sum `transform.apply(x)` over `input`, accumulating in `Ty`
///
/// With [`ExpLogitTransformer`] this is the sum of exponentials.
///
/// # Errors
/// [`Error::EmptyInput`] if `input` is empty.
pub fn transform_reduce<Tx: Element, Ty: Element, F: Transformer<Tx, Ty>>(
    input: &[Tx],
    transform: F,
) -> Result<Ty> {
    if input.is_empty() {
        return Err(Error::empty_input("transform_reduce"));
    }
    Ok(sum_with(input.iter().copied(), &transform))
}

/// `max + log(sum(exp(x - max)))` for each row
///
/// The softmax normalizer used by margin cross-entropy. Rows whose maximum is
/// not finite return that maximum (`-inf` for an all `-inf` row).
///
/// # Errors
/// Same as [`reduce_rows`].
#[tracing::instrument(skip(input, config), fields(
    len = input.len(),
    dtype = T::DTYPE.short_name()
))]
pub fn log_sum_exp_rows<T: DeviceMath>(
    input: &[T],
    row_len: usize,
    config: &ReduceConfig,
) -> Result<Vec<T>> {
    let rows = validate_rows("log_sum_exp", input.len(), row_len)?;
    let n = element_count(row_len)?;
    let acc = config.precision().resolve(T::DTYPE);
    tracing::debug!(rows, accumulate = acc.short_name(), "log-sum-exp rows");

    Ok(map_rows(input, row_len, config, |row| match acc {
        DType::F64 => log_sum_exp_in::<f64, T>(row, n),
        DType::F32 => log_sum_exp_in::<f32, T>(row, n),
        DType::F16 | DType::BF16 => log_sum_exp_in::<T, T>(row, n),
    }))
}

// ============================================================================
// Kernels
// ============================================================================

fn element_count(len: usize) -> Result<i32> {
    i32::try_from(len)
        .map_err(|_| Error::invalid_argument("len", format!("{len} exceeds i32::MAX elements")))
}

fn validate_rows(op: &'static str, len: usize, row_len: usize) -> Result<usize> {
    if row_len == 0 {
        return Err(Error::invalid_argument("row_len", "must be non-zero"));
    }
    if len == 0 {
        return Err(Error::empty_input(op));
    }
    if len % row_len != 0 {
        return Err(Error::invalid_argument(
            "row_len",
            format!("input length {len} is not a multiple of {row_len}"),
        ));
    }
    Ok(len / row_len)
}

fn map_rows<Tx, Ty, F>(input: &[Tx], row_len: usize, config: &ReduceConfig, f: F) -> Vec<Ty>
where
    Tx: Sync,
    Ty: Send,
    F: Fn(&[Tx]) -> Ty + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        if input.len() / row_len > 1 {
            return input
                .par_chunks(row_len)
                .with_min_len(config.min_len())
                .map(&f)
                .collect();
        }
    }

    #[cfg(not(feature = "rayon"))]
    let _ = config;

    input.chunks(row_len).map(f).collect()
}

/// Dispatch on the accumulation dtype. `input` must be non-empty.
#[inline]
fn reduce_slice<Tx: DeviceMath, Ty: Element>(op: ReduceOp, input: &[Tx], n: i32, acc: DType) -> Ty {
    match acc {
        DType::F64 => reduce_in::<f64, Tx, Ty>(op, input, n),
        DType::F32 => reduce_in::<f32, Tx, Ty>(op, input, n),
        DType::F16 | DType::BF16 => reduce_in::<Tx, Tx, Ty>(op, input, n),
    }
}

/// Accumulate in `A`, post-process in `A`, then cast once to `Ty`
#[inline]
fn reduce_in<A: DeviceMath, Tx: Element, Ty: Element>(op: ReduceOp, input: &[Tx], n: i32) -> Ty {
    let acc: A = accumulate(op, input);
    cast(op.finalizer::<A, A>(n).apply(acc))
}

#[inline]
fn accumulate<A: Element, Tx: Element>(op: ReduceOp, input: &[Tx]) -> A {
    let mut values = input.iter().map(|&x| cast::<Tx, A>(x));
    match op {
        ReduceOp::Sum | ReduceOp::Mean => values.fold(A::zero(), |acc, v| acc + v),
        ReduceOp::Prod => values.fold(A::one(), |acc, v| acc * v),
        // NaN wins wherever it sits in the input
        ReduceOp::Max => {
            let first = values.next().unwrap_or_else(A::zero);
            values.fold(first, |acc, v| if v > acc || is_nan(v) { v } else { acc })
        }
        ReduceOp::Min => {
            let first = values.next().unwrap_or_else(A::zero);
            values.fold(first, |acc, v| if v < acc || is_nan(v) { v } else { acc })
        }
        ReduceOp::Any => {
            if input.iter().any(|x| x.to_f64() != 0.0) {
                A::one()
            } else {
                A::zero()
            }
        }
    }
}

#[inline]
fn is_nan<A: Element>(v: A) -> bool {
    v.to_f64().is_nan()
}

#[inline]
fn sum_with<Tx: Element, Ty: Element, F: Transformer<Tx, Ty>>(
    values: impl Iterator<Item = Tx>,
    transform: &F,
) -> Ty {
    values.fold(Ty::zero(), |acc, x| acc + transform.apply(x))
}

fn log_sum_exp_in<A: DeviceMath, T: Element>(row: &[T], n: i32) -> T {
    let max: A = accumulate(ReduceOp::Max, row);
    if !max.to_f64().is_finite() {
        return cast(max);
    }

    let neg_max = A::from_f64(-max.to_f64());
    let shifted = row.iter().map(|&x| cast::<T, A>(x) + neg_max);
    let sum: A = sum_with(shifted, &ExpLogitTransformer::<A>::new(n));

    cast(math::log(sum) + max)
}
