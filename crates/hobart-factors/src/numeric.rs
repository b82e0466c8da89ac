//! Scalar helpers for per-stock factor arithmetic.

/// Absolute bound applied to capped z-scores.
pub const ZSCORE_CAP: f64 = 3.0;

/// `numerator / denominator`, `None` when either side is missing or the
/// result is not finite.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    Some(n / d).filter(|v| v.is_finite())
}

/// Square root, `None` for missing or negative inputs.
pub fn sqrt(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v >= 0.0).map(f64::sqrt).filter(|v| v.is_finite())
}
