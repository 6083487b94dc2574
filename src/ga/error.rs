//! Error types for the GA engine.
//!
//! Configuration problems are reported by [`GaConfig::validate`](super::GaConfig::validate)
//! before any generation runs. Failures inside the generation loop are
//! wrapped in a [`RunFailure`] that records where the run stopped and keeps
//! the best-solution log accumulated up to that point.

use super::types::BestSolutionRecord;
use std::fmt;

/// Errors raised by the encoder, the evaluator and the operators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// The configuration is invalid. Raised at setup, never defaulted.
    #[error("ConfigurationError: {0}")]
    Configuration(String),

    /// A genotype does not have the length its encoding requires.
    #[error("InvalidGenotypeError: expected {expected} genes, found {found}")]
    InvalidGenotype { expected: usize, found: usize },

    /// An operator (or the objective function) produced a malformed result.
    #[error("OperatorFailure: {operator}: {reason}")]
    OperatorFailure { operator: String, reason: String },

    /// The engine was driven out of order (e.g. `run` before `setup`).
    #[error("InvalidState: expected {expected}, found {found}")]
    InvalidState {
        expected: &'static str,
        found: &'static str,
    },
}

impl GaError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        GaError::Configuration(msg.into())
    }

    pub(crate) fn operator(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        GaError::OperatorFailure {
            operator: operator.into(),
            reason: reason.into(),
        }
    }
}

/// Pipeline stage at which a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Setup,
    Selection,
    Crossover,
    Mutation,
    Evaluation,
    Elitism,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "setup",
            Stage::Selection => "selection",
            Stage::Crossover => "crossover",
            Stage::Mutation => "mutation",
            Stage::Evaluation => "evaluation",
            Stage::Elitism => "elitism",
            Stage::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// A run aborted by an error at a given stage and generation.
///
/// Operators are never retried. The best-solution records written before
/// the failure stay available through [`records`](RunFailure::records).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("RunFailure at {stage} (generation {generation}): {source}")]
pub struct RunFailure {
    pub stage: Stage,
    /// 1-based index of the generation being built; 0 for setup.
    pub generation: usize,
    #[source]
    pub source: GaError,
    pub records: Vec<BestSolutionRecord>,
}

impl RunFailure {
    pub(crate) fn new(
        stage: Stage,
        generation: usize,
        source: GaError,
        records: Vec<BestSolutionRecord>,
    ) -> Self {
        Self {
            stage,
            generation,
            source,
            records,
        }
    }

    /// Best-solution log accumulated before the failure.
    pub fn records(&self) -> &[BestSolutionRecord] {
        &self.records
    }

    /// Most recent best-solution record, if any generation completed.
    pub fn last_best(&self) -> Option<&BestSolutionRecord> {
        self.records.last()
    }
}
