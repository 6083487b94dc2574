//! Batches of named GA runs and best-configuration selection.
//!
//! An [`Experiment`] pairs a label with a [`GaConfig`]. [`run_experiments`]
//! executes each one against the same objective and keeps every outcome,
//! failed or not; [`select_best`] then picks the lowest objective value.

use super::config::GaConfig;
use super::crossover::CrossoverKind;
use super::encoding::GeneKind;
use super::error::RunFailure;
use super::fitness::Objective;
use super::mutation::MutationKind;
use super::runner::{GaEngine, GaSummary};
use super::selection::SelectionKind;

/// A named configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    pub name: String,
    pub config: GaConfig,
}

impl Experiment {
    pub fn new(name: impl Into<String>, config: GaConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Outcome of one experiment.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub name: String,
    pub result: Result<GaSummary, RunFailure>,
}

/// The six operator combinations compared by default, over real and
/// binary encodings.
///
/// All use 50 generations, 50 individuals, 25 parents and the gene range
/// `[-20, 20]`; binary ones use 20 bits per gene.
pub fn default_experiments() -> Vec<Experiment> {
    let combos = [
        (
            "Tournament + Single-Point + Random",
            SelectionKind::Tournament,
            CrossoverKind::SinglePoint,
            MutationKind::Random,
        ),
        (
            "RWS + Two-Points + Swap",
            SelectionKind::Roulette,
            CrossoverKind::TwoPoints,
            MutationKind::Swap,
        ),
        (
            "Random + Uniform + Gaussian",
            SelectionKind::Random,
            CrossoverKind::Uniform,
            MutationKind::Gaussian,
        ),
    ];

    let real = combos.iter().map(|&(label, sel, cx, mu)| {
        Experiment::new(
            format!("Real repr. + {label}"),
            GaConfig::real_search()
                .with_gene_kind(GeneKind::Real)
                .with_selection(sel)
                .with_crossover(cx)
                .with_mutation(mu),
        )
    });
    let binary = combos.iter().map(|&(label, sel, cx, mu)| {
        Experiment::new(
            format!("Binary repr. + {label}"),
            GaConfig::binary_search()
                .with_selection(sel)
                .with_crossover(cx)
                .with_mutation(mu),
        )
    });
    real.chain(binary).collect()
}

/// Runs every experiment in order against `objective`.
///
/// A failing experiment is logged and kept as an `Err` outcome; the batch
/// continues.
pub fn run_experiments<O>(experiments: &[Experiment], objective: O) -> Vec<ExperimentOutcome>
where
    O: Objective + Clone,
{
    experiments
        .iter()
        .map(|exp| {
            tracing::info!(name = %exp.name, "testing configuration");
            let result = GaEngine::optimize(exp.config.clone(), objective.clone());
            match &result {
                Ok(summary) => tracing::info!(
                    name = %exp.name,
                    solution = ?summary.solution(),
                    function_value = summary.objective_value,
                    generations = summary.generations_completed,
                    "configuration finished"
                ),
                Err(failure) => tracing::warn!(
                    name = %exp.name,
                    error = %failure,
                    "configuration failed"
                ),
            }
            ExperimentOutcome {
                name: exp.name.clone(),
                result,
            }
        })
        .collect()
}

/// Successful outcome with the lowest objective value (first on ties).
pub fn select_best(outcomes: &[ExperimentOutcome]) -> Option<(&str, &GaSummary)> {
    let mut best: Option<(&str, &GaSummary)> = None;
    for outcome in outcomes {
        if let Ok(summary) = &outcome.result {
            match best {
                Some((_, b)) if summary.objective_value >= b.objective_value => {}
                _ => best = Some((outcome.name.as_str(), summary)),
            }
        }
    }
    best
}
