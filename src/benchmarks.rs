//! Benchmark objective functions.
//!
//! These are caller-side collaborators: pass them to
//! [`GaEngine`](crate::ga::GaEngine) like any other objective. The engine
//! itself never refers to them.

/// Martin and Gaddy function.
///
/// `f(x1, x2) = (x1 − x2)² + ((x1 + x2 − 10) / 3)²`, global minimum
/// `f(5, 5) = 0`.
pub fn martin_gaddy(x1: f64, x2: f64) -> f64 {
    let term1 = (x1 - x2).powi(2);
    let term2 = ((x1 + x2 - 10.0) / 3.0).powi(2);
    term1 + term2
}

/// [`martin_gaddy`] over a phenotype. Uses the first two genes; missing
/// genes count as 0.
pub fn martin_gaddy_objective(phenotype: &[f64]) -> f64 {
    let x1 = phenotype.first().copied().unwrap_or(0.0);
    let x2 = phenotype.get(1).copied().unwrap_or(0.0);
    martin_gaddy(x1, x2)
}
