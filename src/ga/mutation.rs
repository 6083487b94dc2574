//! Mutation operators.
//!
//! Every operator perturbs a slice of offspring genotypes in place.
//!
//! - [`GaussianMutation`]: per gene, with probability 0.1 add N(0, 1)
//! - [`AdaptiveGaussianMutation`]: per gene, with probability 0.2 add
//!   N(0, σ) with σ = max(0.1, 1 − generation / max_generations)
//! - [`SwapMutation`]: per chromosome, with probability 0.1 exchange two
//!   distinct genes
//! - [`RandomMutation`]: per chromosome, reset a fixed fraction of
//!   positions (bit flip or uniform resample)
//!
//! Binary genes stay in {0, 1}: a gaussian step on a bit is thresholded at
//! 0.5. Integer genes are truncated toward zero after every change.

use super::encoding::{EncodingContext, GeneKind};
use super::error::GaError;
use super::types::Genotype;
use rand::seq::index;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::str::FromStr;

/// Mutation operator identifier, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationKind {
    Gaussian,
    AdaptiveGaussian,
    Swap,
    #[default]
    Random,
}

impl MutationKind {
    pub fn name(self) -> &'static str {
        match self {
            MutationKind::Gaussian => "gaussian",
            MutationKind::AdaptiveGaussian => "adaptive_gaussian",
            MutationKind::Swap => "swap",
            MutationKind::Random => "random",
        }
    }

    /// Resolves the identifier into an operator.
    ///
    /// `mutation_rate` only affects [`MutationKind::Random`].
    pub fn build(self, mutation_rate: f64) -> Box<dyn MutationStrategy> {
        match self {
            MutationKind::Gaussian => Box::new(GaussianMutation::default()),
            MutationKind::AdaptiveGaussian => Box::new(AdaptiveGaussianMutation::default()),
            MutationKind::Swap => Box::new(SwapMutation::default()),
            MutationKind::Random => Box::new(RandomMutation::new(mutation_rate)),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationKind {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian" => Ok(MutationKind::Gaussian),
            "adaptive_gaussian" => Ok(MutationKind::AdaptiveGaussian),
            "swap" => Ok(MutationKind::Swap),
            "random" => Ok(MutationKind::Random),
            other => Err(GaError::config(format!("unknown mutation type '{other}'"))),
        }
    }
}

/// Run state and encoding handed to mutation operators.
#[derive(Debug, Clone, Copy)]
pub struct MutationContext<'a> {
    /// Generations completed before the current one (0-based).
    pub generation: usize,
    pub max_generations: usize,
    pub encoding: &'a EncodingContext,
    pub gene_kind: GeneKind,
}

/// Perturbs offspring genotypes in place.
pub trait MutationStrategy {
    /// Operator name used in run summaries.
    fn name(&self) -> &'static str;

    fn mutate(
        &self,
        offspring: &mut [Genotype],
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), GaError>;
}

/// Adds normal noise to every gene with probability `probability`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMutation {
    pub probability: f64,
    pub std_dev: f64,
}

impl Default for GaussianMutation {
    fn default() -> Self {
        Self {
            probability: 0.1,
            std_dev: 1.0,
        }
    }
}

impl MutationStrategy for GaussianMutation {
    fn name(&self) -> &'static str {
        MutationKind::Gaussian.name()
    }

    fn mutate(
        &self,
        offspring: &mut [Genotype],
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), GaError> {
        check_probability(self.name(), self.probability)?;
        let normal = Normal::new(0.0, self.std_dev)
            .map_err(|e| GaError::operator(self.name(), e.to_string()))?;
        perturb(offspring, self.probability, &normal, ctx.gene_kind, rng);
        Ok(())
    }
}

/// Gaussian noise whose scale shrinks linearly over the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveGaussianMutation {
    pub probability: f64,
    /// Lower bound of the noise scale.
    pub min_scale: f64,
}

impl Default for AdaptiveGaussianMutation {
    fn default() -> Self {
        Self {
            probability: 0.2,
            min_scale: 0.1,
        }
    }
}

impl AdaptiveGaussianMutation {
    /// `max(min_scale, 1 − generation / max_generations)`.
    pub fn scale(&self, generation: usize, max_generations: usize) -> f64 {
        let progress = if max_generations == 0 {
            1.0
        } else {
            generation as f64 / max_generations as f64
        };
        (1.0 - progress).max(self.min_scale)
    }
}

impl MutationStrategy for AdaptiveGaussianMutation {
    fn name(&self) -> &'static str {
        MutationKind::AdaptiveGaussian.name()
    }

    fn mutate(
        &self,
        offspring: &mut [Genotype],
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), GaError> {
        check_probability(self.name(), self.probability)?;
        let scale = self.scale(ctx.generation, ctx.max_generations);
        let normal = Normal::new(0.0, scale)
            .map_err(|e| GaError::operator(self.name(), e.to_string()))?;
        perturb(offspring, self.probability, &normal, ctx.gene_kind, rng);
        Ok(())
    }
}

fn check_probability(operator: &str, probability: f64) -> Result<(), GaError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GaError::operator(
            operator,
            format!("probability {probability} is outside [0, 1]"),
        ))
    }
}

fn perturb(
    offspring: &mut [Genotype],
    probability: f64,
    normal: &Normal<f64>,
    kind: GeneKind,
    rng: &mut dyn RngCore,
) {
    for genotype in offspring.iter_mut() {
        match genotype {
            Genotype::Real(genes) => {
                for gene in genes.iter_mut() {
                    if rng.random_bool(probability) {
                        *gene = kind.apply(*gene + normal.sample(rng));
                    }
                }
            }
            Genotype::Binary(bits) => {
                for bit in bits.iter_mut() {
                    if rng.random_bool(probability) {
                        let noisy = f64::from(*bit) + normal.sample(rng);
                        *bit = u8::from(noisy >= 0.5);
                    }
                }
            }
        }
    }
}

/// Exchanges two distinct genes of a chromosome with probability `probability`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutation {
    pub probability: f64,
}

impl Default for SwapMutation {
    fn default() -> Self {
        Self { probability: 0.1 }
    }
}

impl MutationStrategy for SwapMutation {
    fn name(&self) -> &'static str {
        MutationKind::Swap.name()
    }

    fn mutate(
        &self,
        offspring: &mut [Genotype],
        _ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), GaError> {
        check_probability(self.name(), self.probability)?;
        for genotype in offspring.iter_mut() {
            if rng.random_bool(self.probability) && genotype.len() >= 2 {
                let picked = index::sample(rng, genotype.len(), 2);
                genotype.swap_genes(picked.index(0), picked.index(1));
            }
        }
        Ok(())
    }
}

/// Resets `max(1, round(len × rate))` distinct positions per chromosome.
///
/// Bits are flipped; real genes are redrawn uniformly from the gene range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomMutation {
    pub rate: f64,
}

impl Default for RandomMutation {
    fn default() -> Self {
        Self { rate: 0.1 }
    }
}

impl RandomMutation {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Number of positions reset in a chromosome of length `len`.
    pub fn genes_to_mutate(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((len as f64 * self.rate).round() as usize).clamp(1, len)
    }
}

impl MutationStrategy for RandomMutation {
    fn name(&self) -> &'static str {
        MutationKind::Random.name()
    }

    fn mutate(
        &self,
        offspring: &mut [Genotype],
        ctx: &MutationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<(), GaError> {
        let (low, high) = (ctx.encoding.gene_range_low, ctx.encoding.gene_range_high);
        if !(low < high) {
            return Err(GaError::operator(
                self.name(),
                format!("empty gene range [{low}, {high})"),
            ));
        }
        for genotype in offspring.iter_mut() {
            let amount = self.genes_to_mutate(genotype.len());
            let positions = index::sample(rng, genotype.len(), amount);
            match genotype {
                Genotype::Binary(bits) => {
                    for i in positions.iter() {
                        bits[i] ^= 1;
                    }
                }
                Genotype::Real(genes) => {
                    for i in positions.iter() {
                        genes[i] = ctx.gene_kind.apply(rng.random_range(low..high));
                    }
                }
            }
        }
        Ok(())
    }
}
