//! Integration tests for the elementwise functors
//!
//! Tests verify:
//! - Scalar and first-of-slice forms agree
//! - Output type casts
//! - Divide-by-N reciprocal semantics, including n = 0
//! - The sum-then-mean pipeline

mod common;

use common::{assert_allclose_f64, sample_points};
use kprim::ops::{
    DivideFunctor, ExpLogitTransformer, Finalizer, IdentityFunctor, PostOp, Transformer,
};

// ============================================================================
// Exponential
// ============================================================================

#[test]
fn test_exp_f64_matches_std() {
    let f = ExpLogitTransformer::<f64>::new(0);
    let xs = sample_points();
    let got: Vec<f64> = xs.iter().map(|&x| f.apply(x)).collect();
    let expected: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
    assert_allclose_f64(&got, &expected, 0.0, 0.0, "exp f64");
}

#[test]
fn test_exp_f32_within_ulp() {
    let f = ExpLogitTransformer::<f32>::new(0);
    let xs = sample_points();
    let got: Vec<f64> = xs.iter().map(|&x| f.apply(x as f32) as f64).collect();
    let expected: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
    assert_allclose_f64(&got, &expected, 1e-6, 0.0, "exp f32");
}

#[test]
fn test_exp_slice_reads_first_only() {
    let f = ExpLogitTransformer::<f32, f64>::new(3);
    assert_eq!(f.apply_first(&[0.0, 50.0, -50.0]), 1.0);
    assert_eq!(f.apply_first(&[2.0]), f.apply(2.0));
}

#[test]
fn test_exp_count_is_ignored() {
    let a = ExpLogitTransformer::<f64>::new(1);
    let b = ExpLogitTransformer::<f64>::new(i32::MAX);
    assert_eq!(a.apply(1.5), b.apply(1.5));
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_identity_same_type_exact() {
    let f = IdentityFunctor::<f32>::new(10);
    for x in [0.0f32, -0.0, 1.0e-40, 3.25, f32::MIN, f32::INFINITY] {
        assert_eq!(f.apply(x).to_bits(), x.to_bits());
    }
    assert!(f.apply(f32::NAN).is_nan());
}

#[test]
fn test_identity_widen_is_lossless() {
    let f = IdentityFunctor::<f32, f64>::new(0);
    for x in [0.1f32, 1.0e-30, 123456.78] {
        assert_eq!(f.apply(x), x as f64);
    }
}

#[test]
fn test_identity_narrow_rounds() {
    let f = IdentityFunctor::<f64, f32>::new(0);
    assert_eq!(f.apply(0.1), 0.1f32);
    assert_eq!(f.apply_first(&[1.0e300, 0.0]), f32::INFINITY);
}

// ============================================================================
// Divide by N
// ============================================================================

#[test]
fn test_divide_matches_division() {
    let xs = sample_points();
    for n in [1, 2, 3, 7, 1000, -5] {
        let f = DivideFunctor::<f64>::new(n);
        let got: Vec<f64> = xs.iter().map(|&x| f.apply(x)).collect();
        let expected: Vec<f64> = xs.iter().map(|&x| x / n as f64).collect();
        assert_allclose_f64(&got, &expected, 1e-15, 0.0, "divide f64");
    }
}

#[test]
fn test_divide_scalar_equals_slice() {
    let f = DivideFunctor::<f32>::new(3);
    for x in [1.0f32, -2.5, 1.0e20] {
        assert_eq!(
            f.apply(x).to_bits(),
            f.apply_first(&[x, 99.0, -99.0]).to_bits()
        );
    }
}

#[test]
fn test_divide_construction_is_deterministic() {
    let a = DivideFunctor::<f32>::new(7);
    let b = DivideFunctor::<f32>::new(7);
    for x in [1.0f32, 3.3, -8.125] {
        assert_eq!(a.apply(x).to_bits(), b.apply(x).to_bits());
    }
    // Repeated use does not change the result
    assert_eq!(a.apply(3.3).to_bits(), a.apply(3.3).to_bits());
}

#[test]
fn test_divide_by_zero() {
    let f = DivideFunctor::<f32>::new(0);
    assert_eq!(f.apply(1.0), f32::INFINITY);
    assert_eq!(f.apply(-1.0), f32::NEG_INFINITY);
    assert!(f.apply(0.0).is_nan());
}

#[test]
fn test_divide_output_type() {
    let f = DivideFunctor::<f32, f64>::new(3);
    assert_eq!(f.reciprocal(), 1.0 / 3.0);
    assert_eq!(f.apply(3.0), 3.0 * (1.0 / 3.0));
}

#[test]
fn test_sum_then_mean_pipeline() {
    let data = [2.0f32, 4.0, 6.0, 8.0];
    let n = data.len() as i32;
    let sum: f32 = data.iter().sum();
    assert_eq!(sum, 20.0);
    assert_eq!(DivideFunctor::<f32>::new(n).apply(sum), 5.0);
}

// ============================================================================
// Uniform construction
// ============================================================================

fn build_and_apply<F: Transformer<f64>>(n: i32, x: f64) -> f64 {
    F::new(n).apply(x)
}

#[test]
fn test_uniform_construction() {
    let n = 4;
    assert_eq!(build_and_apply::<ExpLogitTransformer<f64>>(n, 0.0), 1.0);
    assert_eq!(build_and_apply::<IdentityFunctor<f64>>(n, 8.0), 8.0);
    assert_eq!(build_and_apply::<DivideFunctor<f64>>(n, 8.0), 2.0);
}

#[test]
fn test_finalizer_agrees_with_functors() {
    let n = 6;
    let xs = sample_points();
    for &x in &xs {
        assert_eq!(
            Finalizer::<f64>::new(PostOp::Exp, n).apply(x),
            ExpLogitTransformer::<f64>::new(n).apply(x)
        );
        assert_eq!(
            Finalizer::<f64>::new(PostOp::Identity, n).apply(x),
            IdentityFunctor::<f64>::new(n).apply(x)
        );
        assert_eq!(
            Finalizer::<f64>::new(PostOp::Divide, n).apply(x),
            DivideFunctor::<f64>::new(n).apply(x)
        );
    }
}

#[test]
fn test_functors_shared_across_threads() {
    let f = DivideFunctor::<f64>::new(8);
    let handles: Vec<_> = (0..4)
        .map(|t| std::thread::spawn(move || f.apply(t as f64 * 8.0)))
        .collect();
    let got: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(got, vec![0.0, 1.0, 2.0, 3.0]);
}
