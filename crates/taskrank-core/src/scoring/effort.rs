//! Effort from estimated hours. Shorter tasks score higher.

use super::CurveParams;

/// `100 / (1 + hours / H)`; 50 at `H` hours, tends to 0 but never reaches it.
pub fn effort_score(estimated_hours: f64, params: &CurveParams) -> f64 {
    100.0 / (1.0 + estimated_hours / params.effort_half_hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_half_point() {
        let params = CurveParams::default();
        assert!((effort_score(4.0, &params) - 50.0).abs() < 1e-9);
        assert!((effort_score(3.0, &params) - 57.142_857).abs() < 1e-5);
    }

    #[test]
    fn test_effort_stays_positive() {
        let params = CurveParams::default();
        let huge = effort_score(10_000.0, &params);
        assert!(huge > 0.0);
        assert!(effort_score(0.01, &params) <= 100.0);
    }
}
