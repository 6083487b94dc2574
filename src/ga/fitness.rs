//! Objective functions and the fitness transform.
//!
//! The engine minimizes an externally supplied [`Objective`]. Selection
//! works on a maximization-oriented fitness:
//!
//! ```text
//! fitness = 1 / (objective + ε),  ε = 1e-10
//! ```
//!
//! The transform is monotonically decreasing and never divides by zero
//! for non-negative objectives. The upper bound is not clamped.

use super::encoding::{ChromosomeEncoder, EncodingContext};
use super::error::GaError;
use super::types::{Evaluation, Genotype, Individual};

/// Offset added to the objective before inversion.
pub const FITNESS_EPSILON: f64 = 1e-10;

/// A function to minimize, mapping a phenotype to a real value.
///
/// Values must be finite and non-negative: the fitness transform is only
/// positive for objectives above `-FITNESS_EPSILON`, and an individual
/// with non-positive or non-finite fitness aborts the run. Shift
/// objectives with a known lower bound before handing them to the engine.
///
/// Implemented for every `Fn(&[f64]) -> f64`, so closures and plain
/// functions can be passed directly.
pub trait Objective {
    fn evaluate(&self, phenotype: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, phenotype: &[f64]) -> f64 {
        self(phenotype)
    }
}

/// Scores genotypes against an objective under a fixed encoding.
pub struct FitnessEvaluator<O> {
    objective: O,
    context: EncodingContext,
}

impl<O: Objective> FitnessEvaluator<O> {
    pub fn new(objective: O, context: EncodingContext) -> Self {
        Self { objective, context }
    }

    pub fn context(&self) -> &EncodingContext {
        &self.context
    }

    /// Raw objective value of a phenotype.
    pub fn objective(&self, phenotype: &[f64]) -> f64 {
        self.objective.evaluate(phenotype)
    }

    /// Converts an objective value to fitness (higher is better).
    pub fn fitness(objective_value: f64) -> f64 {
        1.0 / (objective_value + FITNESS_EPSILON)
    }

    /// Recovers the objective value from a fitness score.
    pub fn objective_from_fitness(fitness: f64) -> f64 {
        1.0 / fitness - FITNESS_EPSILON
    }

    /// Decodes and scores one genotype.
    ///
    /// # Errors
    /// - [`GaError::InvalidGenotype`] if the genotype does not match the encoding
    /// - [`GaError::OperatorFailure`] if the objective is not finite or the
    ///   resulting fitness is not finite and positive
    pub fn evaluate(&self, genotype: &Genotype) -> Result<Evaluation, GaError> {
        let phenotype = ChromosomeEncoder::decode(genotype, &self.context)?;
        let objective = self.objective(&phenotype);
        if !objective.is_finite() {
            return Err(GaError::operator(
                "objective",
                format!("non-finite objective value {objective} at {phenotype:?}"),
            ));
        }
        let fitness = Self::fitness(objective);
        if !(fitness.is_finite() && fitness > 0.0) {
            return Err(GaError::operator(
                "objective",
                format!("objective value {objective} yields invalid fitness {fitness}"),
            ));
        }
        Ok(Evaluation { objective, fitness })
    }

    /// Scores every individual in the slice, overwriting cached evaluations.
    pub fn evaluate_all(&self, individuals: &mut [Individual]) -> Result<(), GaError> {
        for ind in individuals.iter_mut() {
            ind.evaluation = Some(self.evaluate(&ind.genotype)?);
        }
        Ok(())
    }
}
