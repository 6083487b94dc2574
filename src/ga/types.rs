//! Core data types for the GA engine.
//!
//! A [`Genotype`] is either a real-valued gene vector or a bit string.
//! The [`Population`] pairs every genotype with its cached [`Evaluation`]
//! and answers the ranking questions the engine asks each generation
//! (best individual, elites). Ranking is by **fitness, higher is better**;
//! ties always go to the earliest population index.

use super::error::GaError;
use std::cmp::Ordering;

/// Encoded representation of a candidate solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Genotype {
    /// One value per gene (floating point or integral values).
    Real(Vec<f64>),
    /// `num_genes × bits_per_gene` bits, each 0 or 1.
    Binary(Vec<u8>),
}

impl Genotype {
    /// Number of gene positions (bits in binary mode).
    pub fn len(&self) -> usize {
        match self {
            Genotype::Real(g) => g.len(),
            Genotype::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Genotype::Binary(_))
    }

    /// Real-valued genes, or `None` for a bit string.
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Genotype::Real(g) => Some(g),
            Genotype::Binary(_) => None,
        }
    }

    /// Bits, or `None` for a real-valued genotype.
    pub fn as_bits(&self) -> Option<&[u8]> {
        match self {
            Genotype::Binary(b) => Some(b),
            Genotype::Real(_) => None,
        }
    }

    /// Builds a child from `self`, taking position `i` from `donor`
    /// whenever `take_donor(i)` is true.
    ///
    /// Both genotypes must share the same encoding and length.
    pub fn blend<F>(&self, donor: &Genotype, mut take_donor: F) -> Result<Genotype, GaError>
    where
        F: FnMut(usize) -> bool,
    {
        if self.len() != donor.len() {
            return Err(GaError::InvalidGenotype {
                expected: self.len(),
                found: donor.len(),
            });
        }
        match (self, donor) {
            (Genotype::Real(base), Genotype::Real(other)) => {
                Ok(Genotype::Real(pick_genes(base, other, &mut take_donor)))
            }
            (Genotype::Binary(base), Genotype::Binary(other)) => {
                Ok(Genotype::Binary(pick_genes(base, other, &mut take_donor)))
            }
            _ => Err(GaError::operator("crossover", "parents use different encodings")),
        }
    }

    /// Exchanges the genes at positions `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn swap_genes(&mut self, i: usize, j: usize) {
        match self {
            Genotype::Real(g) => g.swap(i, j),
            Genotype::Binary(b) => b.swap(i, j),
        }
    }
}

fn pick_genes<T, F>(base: &[T], donor: &[T], take_donor: &mut F) -> Vec<T>
where
    T: Copy,
    F: FnMut(usize) -> bool,
{
    base.iter()
        .zip(donor)
        .enumerate()
        .map(|(i, (&b, &d))| if take_donor(i) { d } else { b })
        .collect()
}

/// Cached result of scoring one individual.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Raw objective value (minimized).
    pub objective: f64,
    /// Maximization-oriented fitness derived from `objective`.
    pub fitness: f64,
}

/// A genotype paired with its evaluation (absent until scored).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub genotype: Genotype,
    pub evaluation: Option<Evaluation>,
}

impl Individual {
    pub fn new(genotype: Genotype) -> Self {
        Self {
            genotype,
            evaluation: None,
        }
    }

    pub fn fitness(&self) -> Option<f64> {
        self.evaluation.map(|e| e.fitness)
    }

    pub fn objective(&self) -> Option<f64> {
        self.evaluation.map(|e| e.objective)
    }
}

/// Fixed-size collection of individuals owned by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps unevaluated genotypes.
    pub fn from_genotypes(genotypes: Vec<Genotype>) -> Self {
        Self {
            individuals: genotypes.into_iter().map(Individual::new).collect(),
        }
    }

    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn genotypes(&self) -> impl Iterator<Item = &Genotype> {
        self.individuals.iter().map(|ind| &ind.genotype)
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    /// Fitness of every individual, in population order.
    ///
    /// Fails if any individual has not been evaluated yet.
    pub fn fitness_values(&self) -> Result<Vec<f64>, GaError> {
        self.individuals
            .iter()
            .enumerate()
            .map(|(i, ind)| {
                ind.fitness().ok_or_else(|| {
                    GaError::operator("population", format!("individual {i} is not evaluated"))
                })
            })
            .collect()
    }

    /// Index of the highest-fitness individual; ties go to the earliest.
    ///
    /// Unevaluated individuals are ignored. Returns `None` when nothing
    /// has been evaluated.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, ind) in self.individuals.iter().enumerate() {
            if let Some(f) = ind.fitness() {
                match best {
                    Some((_, bf)) if f <= bf => {}
                    _ => best = Some((i, f)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Highest-fitness individual (ties → earliest index).
    pub fn best(&self) -> Option<&Individual> {
        self.best_index().map(|i| &self.individuals[i])
    }

    /// Indices of the `count` highest-fitness individuals, best first.
    ///
    /// Equal fitness keeps population order. `count` is capped at the
    /// population size.
    pub fn elite_indices(&self, count: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        // Stable sort: equal keys keep ascending index order.
        order.sort_by(|&a, &b| {
            let fa = self.individuals[a].fitness().unwrap_or(f64::NEG_INFINITY);
            let fb = self.individuals[b].fitness().unwrap_or(f64::NEG_INFINITY);
            fb.partial_cmp(&fa).unwrap_or(Ordering::Equal)
        });
        order.truncate(count.min(self.individuals.len()));
        order
    }
}

/// One entry of the per-generation best-solution log. Never mutated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolutionRecord {
    /// 1-based generation index.
    pub generation: usize,
    pub genotype: Genotype,
    /// Decoded values (identical to the genes in real mode).
    pub phenotype: Vec<f64>,
    pub fitness: f64,
    pub objective: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(fitnesses: &[f64]) -> Population {
        Population::from_individuals(
            fitnesses
                .iter()
                .enumerate()
                .map(|(i, &f)| Individual {
                    genotype: Genotype::Real(vec![i as f64]),
                    evaluation: Some(Evaluation {
                        objective: 1.0 / f,
                        fitness: f,
                    }),
                })
                .collect(),
        )
    }

    #[test]
    fn test_blend_takes_donor_positions() {
        let a = Genotype::Binary(vec![0, 0, 0, 0]);
        let b = Genotype::Binary(vec![1, 1, 1, 1]);
        let child = a.blend(&b, |i| i % 2 == 1).unwrap();
        assert_eq!(child, Genotype::Binary(vec![0, 1, 0, 1]));
    }

    #[test]
    fn test_blend_rejects_mismatch() {
        let a = Genotype::Real(vec![1.0, 2.0]);
        let b = Genotype::Real(vec![1.0]);
        assert!(matches!(
            a.blend(&b, |_| true),
            Err(GaError::InvalidGenotype { expected: 2, found: 1 })
        ));
        let c = Genotype::Binary(vec![0, 1]);
        assert!(matches!(
            a.blend(&c, |_| true),
            Err(GaError::OperatorFailure { .. })
        ));
    }

    #[test]
    fn test_best_index_ties_earliest() {
        let pop = scored(&[1.0, 3.0, 2.0, 3.0]);
        assert_eq!(pop.best_index(), Some(1));
    }

    #[test]
    fn test_best_index_unevaluated() {
        let pop = Population::from_genotypes(vec![Genotype::Real(vec![0.0])]);
        assert_eq!(pop.best_index(), None);
        assert!(pop.fitness_values().is_err());
    }

    #[test]
    fn test_elite_indices_stable() {
        let pop = scored(&[2.0, 5.0, 2.0, 5.0, 1.0]);
        assert_eq!(pop.elite_indices(3), vec![1, 3, 0]);
        assert_eq!(pop.elite_indices(10).len(), 5);
        assert!(pop.elite_indices(0).is_empty());
    }
}
