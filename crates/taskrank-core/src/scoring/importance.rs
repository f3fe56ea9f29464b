//! Importance from the 1-10 user rating.

use super::CurveParams;

/// `100 * (importance / 10)^p`, clamped to 0-100.
///
/// The convex curve lets one top-rated task outrank several mid-rated ones.
pub fn importance_score(importance: u8, params: &CurveParams) -> f64 {
    let ratio = f64::from(importance) / 10.0;
    (100.0 * ratio.powf(params.importance_exponent)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_bounds() {
        let params = CurveParams::default();
        assert!((importance_score(10, &params) - 100.0).abs() < 1e-9);
        assert!((importance_score(1, &params) - 3.162_277).abs() < 1e-5);
    }

    #[test]
    fn test_importance_is_convex() {
        let params = CurveParams::default();
        assert!(importance_score(8, &params) > 2.0 * importance_score(4, &params));
        assert!((importance_score(8, &params) - 71.554).abs() < 1e-3);
    }
}
