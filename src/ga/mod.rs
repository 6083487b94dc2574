//! Genetic Algorithm engine.
//!
//! Minimizes an externally supplied objective over real-valued or
//! binary-encoded chromosomes. The caller provides a [`GaConfig`] and an
//! [`Objective`]; [`GaEngine`] runs the generation loop:
//!
//! selection → crossover → mutation → evaluation → elitism merge → record
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters and operator identifiers
//! - [`GaEngine`]: Executes the evolutionary loop
//! - [`GaSummary`]: Final result with the per-generation best-solution log
//! - [`ChromosomeEncoder`] / [`EncodingContext`]: Initial populations and
//!   binary decoding
//! - [`FitnessEvaluator`]: Objective to fitness transform
//!
//! # Operator families
//!
//! - [`SelectionStrategy`]: tournament, roulette (RWS), random
//! - [`CrossoverStrategy`]: single-point, two-point, uniform
//! - [`MutationStrategy`]: gaussian, adaptive gaussian, swap, random
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod crossover;
mod encoding;
mod error;
pub mod experiment;
mod fitness;
mod mutation;
pub mod random;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, MAX_BITS_PER_GENE};
pub use crossover::{CrossoverKind, CrossoverStrategy, SinglePoint, TwoPoints, UniformCrossover};
pub use encoding::{decode_bits, ChromosomeEncoder, EncodingContext, GeneKind};
pub use error::{GaError, RunFailure, Stage};
pub use fitness::{FitnessEvaluator, Objective, FITNESS_EPSILON};
pub use mutation::{
    AdaptiveGaussianMutation, GaussianMutation, MutationContext, MutationKind, MutationStrategy,
    RandomMutation, SwapMutation,
};
pub use runner::{
    EngineState, GaEngine, GaSummary, GenerationObserver, ProgressSnapshot, PROGRESS_INTERVAL,
};
pub use selection::{Selection, SelectionKind, SelectionStrategy};
pub use types::{BestSolutionRecord, Evaluation, Genotype, Individual, Population};
