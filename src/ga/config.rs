//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of a run. It is built once by the
//! caller and never mutated by the engine; [`GaConfig::validate`] rejects
//! invalid combinations before the first generation.

use super::crossover::CrossoverKind;
use super::encoding::GeneKind;
use super::error::GaError;
use super::mutation::MutationKind;
use super::selection::SelectionKind;

/// Largest supported bits-per-gene; keeps every decoded integer exact in `f64`.
pub const MAX_BITS_PER_GENE: usize = 52;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_genetic::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.num_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::ga::{CrossoverKind, GaConfig, MutationKind};
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_init_range(-20.0, 20.0)
///     .with_tournament_size(4)
///     .with_crossover(CrossoverKind::Uniform)
///     .with_mutation(MutationKind::AdaptiveGaussian)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of generations executed by `run`.
    pub num_generations: usize,

    /// Number of individuals in the population (`sol_per_pop`).
    pub population_size: usize,

    /// Number of parents selected each generation.
    pub num_parents_mating: usize,

    /// Number of decision variables (decoded genes).
    pub num_genes: usize,

    /// Lower bound of the gene range (inclusive).
    pub init_range_low: f64,

    /// Upper bound of the gene range. Exclusive for real sampling,
    /// reached exactly by an all-ones binary gene.
    pub init_range_high: f64,

    /// Numeric kind of real-mode genes.
    pub gene_kind: GeneKind,

    /// Parent selection operator.
    pub selection: SelectionKind,

    /// Crossover operator.
    pub crossover: CrossoverKind,

    /// Mutation operator.
    pub mutation: MutationKind,

    /// Tournament size `K` (used by tournament selection only).
    pub tournament_size: usize,

    /// Bits used to encode one gene in binary mode.
    pub bits_per_gene: usize,

    /// Binary (bit string) encoding instead of real-valued genes.
    pub is_binary: bool,

    /// Fraction of gene positions resampled by the random mutation (0, 1].
    pub mutation_rate: f64,

    /// Number of best individuals carried unchanged into the next generation.
    pub elitism_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 50,
            num_parents_mating: 25,
            num_genes: 2,
            init_range_low: 0.0,
            init_range_high: 2.0,
            gene_kind: GeneKind::Integer,
            selection: SelectionKind::Tournament,
            crossover: CrossoverKind::SinglePoint,
            mutation: MutationKind::Random,
            tournament_size: 3,
            bits_per_gene: 20,
            is_binary: false,
            mutation_rate: 0.1,
            elitism_count: 5,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Preset for a real-valued search over `[-20, 20)` per gene.
    ///
    /// - Generations: 50, Population: 50, Parents: 25, floating-point genes
    pub fn real_search() -> Self {
        Self {
            num_generations: 50,
            init_range_low: -20.0,
            init_range_high: 20.0,
            gene_kind: GeneKind::Real,
            ..Self::default()
        }
    }

    /// Preset for a binary search over `[-20, 20]` with 20 bits per gene.
    ///
    /// - Generations: 50, Population: 50, Parents: 25
    pub fn binary_search() -> Self {
        Self {
            num_generations: 50,
            init_range_low: -20.0,
            init_range_high: 20.0,
            bits_per_gene: 20,
            is_binary: true,
            ..Self::default()
        }
    }

    /// Sets the number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of parents selected per generation.
    pub fn with_num_parents_mating(mut self, n: usize) -> Self {
        self.num_parents_mating = n;
        self
    }

    /// Sets the number of decision variables.
    pub fn with_num_genes(mut self, n: usize) -> Self {
        self.num_genes = n;
        self
    }

    /// Sets the gene range.
    pub fn with_init_range(mut self, low: f64, high: f64) -> Self {
        self.init_range_low = low;
        self.init_range_high = high;
        self
    }

    /// Sets the numeric kind of real-mode genes.
    pub fn with_gene_kind(mut self, kind: GeneKind) -> Self {
        self.gene_kind = kind;
        self
    }

    /// Sets the selection operator.
    pub fn with_selection(mut self, kind: SelectionKind) -> Self {
        self.selection = kind;
        self
    }

    /// Convenience builder for tournament selection with size `k`.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self.with_selection(SelectionKind::Tournament)
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, kind: CrossoverKind) -> Self {
        self.crossover = kind;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, kind: MutationKind) -> Self {
        self.mutation = kind;
        self
    }

    /// Switches to binary encoding with `bits` bits per gene.
    pub fn with_binary(mut self, bits: usize) -> Self {
        self.is_binary = true;
        self.bits_per_gene = bits;
        self
    }

    /// Sets the random mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Length of one genotype: `num_genes`, or `num_genes × bits_per_gene`
    /// in binary mode.
    pub fn genome_length(&self) -> usize {
        if self.is_binary {
            self.num_genes.saturating_mul(self.bits_per_gene)
        } else {
            self.num_genes
        }
    }

    /// Number of offspring produced per generation.
    pub fn offspring_count(&self) -> usize {
        self.population_size.saturating_sub(self.elitism_count)
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::Configuration`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::config("population_size must be at least 1"));
        }
        if self.num_generations == 0 {
            return Err(GaError::config("num_generations must be at least 1"));
        }
        if self.num_genes == 0 {
            return Err(GaError::config("num_genes must be at least 1"));
        }
        if self.num_parents_mating == 0 || self.num_parents_mating > self.population_size {
            return Err(GaError::config(format!(
                "num_parents_mating must be in 1..={}, got {}",
                self.population_size, self.num_parents_mating
            )));
        }
        if self.selection == SelectionKind::Tournament
            && (self.tournament_size == 0 || self.tournament_size > self.population_size)
        {
            return Err(GaError::config(format!(
                "tournament size must be in 1..={}, got {}",
                self.population_size, self.tournament_size
            )));
        }
        if self.elitism_count > self.population_size {
            return Err(GaError::config(format!(
                "elitism_count {} exceeds population_size {}",
                self.elitism_count, self.population_size
            )));
        }
        if !self.init_range_low.is_finite() || !self.init_range_high.is_finite() {
            return Err(GaError::config("gene range bounds must be finite"));
        }
        if self.init_range_low >= self.init_range_high {
            return Err(GaError::config(format!(
                "init_range_low ({}) must be below init_range_high ({})",
                self.init_range_low, self.init_range_high
            )));
        }
        if self.is_binary && (self.bits_per_gene == 0 || self.bits_per_gene > MAX_BITS_PER_GENE) {
            return Err(GaError::config(format!(
                "bits_per_gene must be in 1..={MAX_BITS_PER_GENE}, got {}",
                self.bits_per_gene
            )));
        }
        if !(self.mutation_rate > 0.0 && self.mutation_rate <= 1.0) {
            return Err(GaError::config(format!(
                "mutation_rate must be in (0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.crossover == CrossoverKind::TwoPoints && self.genome_length() < 2 {
            return Err(GaError::config(
                "two_points crossover needs a genome length of at least 2",
            ));
        }
        Ok(())
    }
}
