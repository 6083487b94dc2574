//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. All strategies **maximize fitness** and draw with
//! replacement.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::error::GaError;
use super::types::{Genotype, Population};
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Selection operator identifier, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionKind {
    #[default]
    Tournament,
    /// Roulette wheel selection (RWS).
    Roulette,
    Random,
}

impl SelectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SelectionKind::Tournament => "tournament",
            SelectionKind::Roulette => "rws",
            SelectionKind::Random => "random",
        }
    }

    /// Resolves the identifier into an operator.
    pub fn build(self, tournament_size: usize) -> Selection {
        match self {
            SelectionKind::Tournament => Selection::Tournament(tournament_size),
            SelectionKind::Roulette => Selection::Roulette,
            SelectionKind::Random => Selection::Random,
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionKind {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tournament" => Ok(SelectionKind::Tournament),
            "rws" | "roulette" => Ok(SelectionKind::Roulette),
            "random" => Ok(SelectionKind::Random),
            other => Err(GaError::config(format!(
                "unknown parent selection type '{other}'"
            ))),
        }
    }
}

/// Chooses parent genotypes from a scored population.
pub trait SelectionStrategy {
    /// Operator name used in run summaries.
    fn name(&self) -> &'static str;

    /// Returns `count` parents drawn from `population`.
    ///
    /// Fails if the population is empty or not fully evaluated.
    fn select_parents(
        &self,
        population: &Population,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Genotype>, GaError>;
}

/// Selection operator.
///
/// # Examples
///
/// ```
/// use u_genetic::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: draw `k` individuals with replacement, keep
    /// the fittest. Ties go to the earliest population index.
    ///
    /// k=1 degenerates to uniform random selection.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// P(i) = fitness_i / Σ fitness. A zero or non-finite total falls back
    /// to uniform selection.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Uniform draw with replacement.
    Random,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index given the population's fitness values.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select(&self, fitness: &[f64], rng: &mut dyn RngCore) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(fitness, *k, rng),
            Selection::Roulette => {
                let total: f64 = fitness.iter().sum();
                roulette(fitness, total, rng)
            }
            Selection::Random => rng.random_range(0..fitness.len()),
        }
    }
}

impl SelectionStrategy for Selection {
    fn name(&self) -> &'static str {
        match self {
            Selection::Tournament(_) => SelectionKind::Tournament.name(),
            Selection::Roulette => SelectionKind::Roulette.name(),
            Selection::Random => SelectionKind::Random.name(),
        }
    }

    fn select_parents(
        &self,
        population: &Population,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Genotype>, GaError> {
        if population.is_empty() {
            return Err(GaError::operator(self.name(), "empty population"));
        }
        let fitness = population.fitness_values()?;
        let individuals = population.individuals();

        let indices: Vec<usize> = match self {
            Selection::Roulette => {
                let total: f64 = fitness.iter().sum();
                if !(total > 0.0 && total.is_finite()) {
                    tracing::warn!(total, "degenerate fitness sum, using uniform selection");
                }
                (0..count).map(|_| roulette(&fitness, total, rng)).collect()
            }
            _ => (0..count).map(|_| self.select(&fitness, rng)).collect(),
        };

        Ok(indices
            .into_iter()
            .map(|i| individuals[i].genotype.clone())
            .collect())
    }
}

/// Tournament selection: draw k indices with replacement, return the fittest.
fn tournament(fitness: &[f64], k: usize, rng: &mut dyn RngCore) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let better = fitness[idx] > fitness[best_idx]
            || (fitness[idx] == fitness[best_idx] && idx < best_idx);
        if better {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection over positive fitness values.
fn roulette(fitness: &[f64], total: f64, rng: &mut dyn RngCore) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in fitness.iter().enumerate() {
        cumulative += w.max(0.0);
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
