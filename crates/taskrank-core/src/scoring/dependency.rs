//! Dependency factor from the number of tasks a task blocks.

use super::CurveParams;

/// `100 * (1 - e^(-k * blocked))`: 0 for no dependents, ~70 for three.
pub fn dependency_score(blocked: usize, params: &CurveParams) -> f64 {
    100.0 * (1.0 - (-params.blocking_rate * blocked as f64).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_curve() {
        let params = CurveParams::default();
        assert_eq!(dependency_score(0, &params), 0.0);
        assert!((dependency_score(3, &params) - 69.88).abs() < 0.01);
        assert!(dependency_score(50, &params) < 100.0);
        assert!(dependency_score(4, &params) > dependency_score(3, &params));
    }
}
