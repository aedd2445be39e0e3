//! Transcendental dispatch
//!
//! Each supported element type picks its own exponential and logarithm at
//! monomorphization time:
//!
//! | Type          | exp / log                                       |
//! |---------------|-------------------------------------------------|
//! | `f16`, `bf16` | widen to f32, `f32::exp` / `f32::ln`, round back |
//! | `f32`         | `f32::exp` / `f32::ln`                          |
//! | `f64`         | `f64::exp` / `f64::ln`                          |
//!
//! Domain errors are not reported: `log(0)` is `-inf`, `log(-1)` is NaN and an
//! overflowing `exp` is `+inf`, exactly as the underlying routine produces them.

use crate::dtype::Element;

/// Element types with a dedicated exponential and logarithm
///
/// Implemented once per concrete type; there is no runtime type switch.
pub trait DeviceMath: Element {
    /// `e^self`
    fn device_exp(self) -> Self;

    /// Natural logarithm of `self`
    fn device_log(self) -> Self;
}

/// Exponential using the implementation selected for `T`
#[inline]
pub fn exp<T: DeviceMath>(x: T) -> T {
    x.device_exp()
}

/// Natural logarithm using the implementation selected for `T`
#[inline]
pub fn log<T: DeviceMath>(x: T) -> T {
    x.device_log()
}

impl DeviceMath for f32 {
    #[inline]
    fn device_exp(self) -> Self {
        self.exp()
    }

    #[inline]
    fn device_log(self) -> Self {
        self.ln()
    }
}

impl DeviceMath for f64 {
    #[inline]
    fn device_exp(self) -> Self {
        self.exp()
    }

    #[inline]
    fn device_log(self) -> Self {
        self.ln()
    }
}

// Reduced precision types have no native math; compute in f32 and round once.
macro_rules! impl_reduced_precision_math {
    ($t:ty) => {
        impl DeviceMath for $t {
            #[inline]
            fn device_exp(self) -> Self {
                <$t>::from_f32(self.to_f32().exp())
            }

            #[inline]
            fn device_log(self) -> Self {
                <$t>::from_f32(self.to_f32().ln())
            }
        }
    };
}

#[cfg(feature = "f16")]
impl_reduced_precision_math!(half::f16);
#[cfg(feature = "f16")]
impl_reduced_precision_math!(half::bf16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_log_f32() {
        assert_eq!(exp(0.0f32), 1.0);
        assert_eq!(exp(1.0f32), 1.0f32.exp());
        assert_eq!(log(1.0f32), 0.0);
        assert_eq!(log(std::f32::consts::E), std::f32::consts::E.ln());
    }

    #[test]
    fn test_exp_log_f64() {
        assert_eq!(exp(2.5f64), 2.5f64.exp());
        assert_eq!(log(10.0f64), 10.0f64.ln());
    }

    #[test]
    fn test_domain_edges() {
        assert_eq!(log(0.0f32), f32::NEG_INFINITY);
        assert!(log(-1.0f64).is_nan());
        assert_eq!(exp(f64::NEG_INFINITY), 0.0);
        assert_eq!(exp(1000.0f64), f64::INFINITY);
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_exp_log_half() {
        use half::{bf16, f16};

        let x = f16::from_f32(1.0);
        assert_eq!(exp(x), f16::from_f32(1.0f32.exp()));
        assert_eq!(log(f16::ONE), f16::ZERO);

        let y = bf16::from_f32(2.0);
        assert_eq!(exp(y), bf16::from_f32(2.0f32.exp()));
        assert!(log(bf16::from_f32(-1.0)).is_nan());
    }
}
