//! Seedable genetic algorithm engine.
//!
//! Searches for the minimizer of an objective function with a
//! population-based genetic algorithm. Two chromosome encodings are
//! supported:
//!
//! - **Real**: one floating-point (or integral) value per gene
//! - **Binary**: fixed-width bit strings decoded linearly onto a gene range
//!
//! Selection, crossover and mutation are pluggable operator families
//! resolved from configuration. Every random draw comes from one explicit,
//! seedable generator, so identical seeds reproduce identical runs.
//!
//! # Modules
//!
//! - [`ga`]: the engine, its operators and configuration
//! - [`benchmarks`]: ready-made objective functions (Martin and Gaddy)
//!
//! # Example
//!
//! ```
//! use u_genetic::benchmarks::martin_gaddy_objective;
//! use u_genetic::ga::{GaConfig, GaEngine};
//!
//! let config = GaConfig::binary_search().with_seed(42);
//! let summary = GaEngine::optimize(config, martin_gaddy_objective).unwrap();
//! assert!(summary.decoded_phenotype.is_some());
//! ```

pub mod benchmarks;
pub mod ga;
