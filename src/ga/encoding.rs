//! Chromosome encoding: initial populations and binary decoding.
//!
//! Real mode stores one value per gene. Binary mode stores
//! `bits_per_gene` bits per gene, most significant bit first, mapped
//! linearly onto `[gene_range_low, gene_range_high]`:
//!
//! ```text
//! value = low + (high - low) * n / (2^bits - 1)
//! ```
//!
//! so an all-zero chunk decodes to `low` and an all-one chunk to `high`.

use super::config::{GaConfig, MAX_BITS_PER_GENE};
use super::error::GaError;
use super::types::{Genotype, Population};
use rand::{Rng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Numeric kind of real-mode genes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneKind {
    /// Floating-point genes.
    #[default]
    Real,
    /// Integral genes (values truncated toward zero).
    Integer,
}

impl GeneKind {
    /// Casts a raw value to this kind.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            GeneKind::Real => value,
            GeneKind::Integer => value.trunc(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GeneKind::Real => "float",
            GeneKind::Integer => "int",
        }
    }
}

impl fmt::Display for GeneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneKind {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" | "real" => Ok(GeneKind::Real),
            "int" | "integer" => Ok(GeneKind::Integer),
            other => Err(GaError::config(format!("unknown gene type '{other}'"))),
        }
    }
}

/// Everything needed to turn a genotype into a phenotype.
///
/// Built once at setup and passed by reference to the components that
/// decode (evaluator, mutation, result reporting).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingContext {
    pub is_binary: bool,
    pub bits_per_gene: usize,
    pub gene_range_low: f64,
    pub gene_range_high: f64,
    /// Number of decoded genes.
    pub num_genes_original: usize,
}

impl EncodingContext {
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            is_binary: config.is_binary,
            bits_per_gene: config.bits_per_gene,
            gene_range_low: config.init_range_low,
            gene_range_high: config.init_range_high,
            num_genes_original: config.num_genes,
        }
    }

    /// Expected genotype length under this encoding.
    pub fn genome_length(&self) -> usize {
        if self.is_binary {
            self.num_genes_original * self.bits_per_gene
        } else {
            self.num_genes_original
        }
    }
}

/// Builds initial populations and decodes genotypes.
pub struct ChromosomeEncoder;

impl ChromosomeEncoder {
    /// Samples `population_size` random genotypes.
    ///
    /// Real mode draws each gene uniformly from `[low, high)` and casts it
    /// to the configured [`GeneKind`]; binary mode draws each bit uniformly.
    ///
    /// # Errors
    /// [`GaError::Configuration`] if `config` fails [`GaConfig::validate`].
    pub fn build_initial_population(
        config: &GaConfig,
        rng: &mut dyn RngCore,
    ) -> Result<Population, GaError> {
        config.validate()?;
        let genotypes = (0..config.population_size)
            .map(|_| Self::random_genotype(config, rng))
            .collect();
        Ok(Population::from_genotypes(genotypes))
    }

    fn random_genotype(config: &GaConfig, rng: &mut dyn RngCore) -> Genotype {
        if config.is_binary {
            let bits = (0..config.genome_length())
                .map(|_| u8::from(rng.random_bool(0.5)))
                .collect();
            Genotype::Binary(bits)
        } else {
            let genes = (0..config.num_genes)
                .map(|_| {
                    let v = rng.random_range(config.init_range_low..config.init_range_high);
                    config.gene_kind.apply(v)
                })
                .collect();
            Genotype::Real(genes)
        }
    }

    /// Decodes a genotype to its phenotype.
    ///
    /// Real genotypes decode to themselves. Binary genotypes are split into
    /// `num_genes_original` chunks of `bits_per_gene` bits.
    ///
    /// # Errors
    /// [`GaError::InvalidGenotype`] when the length does not match the
    /// encoding, [`GaError::Configuration`] when a binary context has an
    /// unusable bit width or range.
    pub fn decode(genotype: &Genotype, ctx: &EncodingContext) -> Result<Vec<f64>, GaError> {
        let expected = ctx.genome_length();
        if genotype.len() != expected {
            return Err(GaError::InvalidGenotype {
                expected,
                found: genotype.len(),
            });
        }
        match genotype {
            Genotype::Real(genes) => {
                if ctx.is_binary {
                    return Err(GaError::operator(
                        "decode",
                        "real genotype under a binary encoding",
                    ));
                }
                Ok(genes.clone())
            }
            Genotype::Binary(bits) => {
                if !ctx.is_binary {
                    return Err(GaError::operator(
                        "decode",
                        "binary genotype under a real encoding",
                    ));
                }
                decode_bits(
                    bits,
                    ctx.bits_per_gene,
                    ctx.gene_range_low,
                    ctx.gene_range_high,
                )
            }
        }
    }
}

/// Decodes a bit string into `bits.len() / bits_per_gene` values.
///
/// Any non-zero byte counts as a set bit.
///
/// # Errors
/// [`GaError::Configuration`] unless `bits_per_gene` is in
/// `1..=MAX_BITS_PER_GENE` and `low <= high`.
pub fn decode_bits(
    bits: &[u8],
    bits_per_gene: usize,
    low: f64,
    high: f64,
) -> Result<Vec<f64>, GaError> {
    if !(1..=MAX_BITS_PER_GENE).contains(&bits_per_gene) {
        return Err(GaError::config(format!(
            "bits_per_gene must be in 1..={MAX_BITS_PER_GENE}, got {bits_per_gene}"
        )));
    }
    if low.is_nan() || high.is_nan() || low > high {
        return Err(GaError::config(format!("gene range [{low}, {high}] is empty")));
    }
    let max_decimal = ((1u64 << bits_per_gene) - 1) as f64;
    let values = bits
        .chunks_exact(bits_per_gene)
        .map(|chunk| {
            let n = chunk
                .iter()
                .fold(0u64, |acc, &b| (acc << 1) | u64::from(b != 0));
            let t = n as f64 / max_decimal;
            // Interpolation form hits both endpoints exactly.
            (low * (1.0 - t) + high * t).clamp(low, high)
        })
        .collect();
    Ok(values)
}
