//! GA evolutionary loop execution.
//!
//! [`GaEngine`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! evaluation → elitism merge → bookkeeping → repeat.
//!
//! The engine moves through `Uninitialized → Initialized → Running →
//! Completed` (or `Failed`). All randomness comes from the one generator
//! owned by the engine, so a fixed seed reproduces a run exactly.

use super::config::GaConfig;
use super::crossover::CrossoverStrategy;
use super::encoding::{ChromosomeEncoder, EncodingContext};
use super::error::{GaError, RunFailure, Stage};
use super::fitness::{FitnessEvaluator, Objective};
use super::mutation::{MutationContext, MutationStrategy};
use super::random::{rng_from_seed, GaRng};
use super::selection::SelectionStrategy;
use super::types::{BestSolutionRecord, Genotype, Individual, Population};
use std::fmt;

/// Observer notifications are sent every this many generations.
pub const PROGRESS_INTERVAL: usize = 10;

/// Lifecycle state of a [`GaEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Completed,
    Failed,
}

impl EngineState {
    fn name(self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initialized => "initialized",
            EngineState::Running => "running",
            EngineState::Completed => "completed",
            EngineState::Failed => "failed",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot handed to a [`GenerationObserver`].
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot<'a> {
    /// 1-based generation index.
    pub generation: usize,
    pub best_genotype: &'a Genotype,
    pub best_fitness: f64,
    /// Decoded best solution in binary mode, `None` in real mode.
    pub decoded: Option<&'a [f64]>,
}

/// Receives progress snapshots every [`PROGRESS_INTERVAL`] generations.
///
/// Implemented for every `FnMut(&ProgressSnapshot)`.
pub trait GenerationObserver {
    fn on_generation(&mut self, snapshot: &ProgressSnapshot<'_>);
}

impl<F> GenerationObserver for F
where
    F: FnMut(&ProgressSnapshot<'_>),
{
    fn on_generation(&mut self, snapshot: &ProgressSnapshot<'_>) {
        self(snapshot)
    }
}

/// Result of a completed GA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaSummary {
    /// Best genotype of the final population.
    pub best_genotype: Genotype,

    /// Decoded best solution (binary mode only).
    pub decoded_phenotype: Option<Vec<f64>>,

    /// Objective value of the best solution.
    pub objective_value: f64,

    /// Fitness of the best solution.
    pub fitness: f64,

    /// Total number of generations executed.
    pub generations_completed: usize,

    pub selection: String,
    pub crossover: String,
    pub mutation: String,

    /// One best-solution record per generation.
    pub records: Vec<BestSolutionRecord>,
}

impl GaSummary {
    /// Best solution in decision-variable space.
    pub fn solution(&self) -> &[f64] {
        match (&self.decoded_phenotype, &self.best_genotype) {
            (Some(decoded), _) => decoded.as_slice(),
            (None, Genotype::Real(genes)) => genes.as_slice(),
            (None, Genotype::Binary(_)) => &[],
        }
    }

    /// Best fitness per generation.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.fitness).collect()
    }

    /// Best objective value per generation.
    pub fn objective_history(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.objective).collect()
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_genetic::ga::{GaConfig, GaEngine, MutationKind};
///
/// let config = GaConfig::real_search()
///     .with_mutation(MutationKind::AdaptiveGaussian)
///     .with_seed(42);
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
///
/// let mut engine = GaEngine::new(config, sphere);
/// engine.setup().unwrap();
/// let summary = engine.run().unwrap();
/// assert_eq!(summary.generations_completed, 50);
/// ```
pub struct GaEngine<O> {
    config: GaConfig,
    encoding: EncodingContext,
    evaluator: FitnessEvaluator<O>,
    selection: Option<Box<dyn SelectionStrategy>>,
    crossover: Option<Box<dyn CrossoverStrategy>>,
    mutation: Option<Box<dyn MutationStrategy>>,
    observer: Option<Box<dyn GenerationObserver>>,
    rng: GaRng,
    population: Population,
    records: Vec<BestSolutionRecord>,
    state: EngineState,
    generations_completed: usize,
}

impl<O: Objective> GaEngine<O> {
    /// Creates an engine for `config` minimizing `objective`.
    ///
    /// The generator is seeded from `config.seed` (fresh entropy if `None`).
    pub fn new(config: GaConfig, objective: O) -> Self {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(config, objective, rng)
    }

    /// Creates an engine drawing from an explicit generator.
    pub fn with_rng(config: GaConfig, objective: O, rng: GaRng) -> Self {
        let encoding = EncodingContext::from_config(&config);
        Self {
            evaluator: FitnessEvaluator::new(objective, encoding),
            encoding,
            config,
            selection: None,
            crossover: None,
            mutation: None,
            observer: None,
            rng,
            population: Population::default(),
            records: Vec::new(),
            state: EngineState::Uninitialized,
            generations_completed: 0,
        }
    }

    /// Runs setup and the full loop in one call.
    pub fn optimize(config: GaConfig, objective: O) -> Result<GaSummary, RunFailure> {
        let mut engine = Self::new(config, objective);
        engine
            .setup()
            .map_err(|e| RunFailure::new(Stage::Setup, 0, e, Vec::new()))?;
        engine.run()
    }

    /// Installs a progress observer.
    pub fn with_observer(mut self, observer: impl GenerationObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Replaces the configured selection operator.
    pub fn with_selection_strategy(mut self, op: Box<dyn SelectionStrategy>) -> Self {
        self.selection = Some(op);
        self
    }

    /// Replaces the configured crossover operator.
    pub fn with_crossover_strategy(mut self, op: Box<dyn CrossoverStrategy>) -> Self {
        self.crossover = Some(op);
        self
    }

    /// Replaces the configured mutation operator.
    pub fn with_mutation_strategy(mut self, op: Box<dyn MutationStrategy>) -> Self {
        self.mutation = Some(op);
        self
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn encoding(&self) -> &EncodingContext {
        &self.encoding
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best-solution log accumulated so far.
    pub fn records(&self) -> &[BestSolutionRecord] {
        &self.records
    }

    pub fn generations_completed(&self) -> usize {
        self.generations_completed
    }

    /// Validates the configuration, resolves operators, and builds and
    /// scores the initial population.
    pub fn setup(&mut self) -> Result<(), GaError> {
        if self.state != EngineState::Uninitialized {
            return Err(GaError::InvalidState {
                expected: EngineState::Uninitialized.name(),
                found: self.state.name(),
            });
        }
        if let Err(e) = self.config.validate() {
            tracing::error!(error = %e, "invalid GA configuration");
            return Err(e);
        }

        let config = &self.config;
        if self.selection.is_none() {
            self.selection = Some(Box::new(config.selection.build(config.tournament_size)));
        }
        if self.crossover.is_none() {
            self.crossover = Some(config.crossover.build());
        }
        if self.mutation.is_none() {
            self.mutation = Some(config.mutation.build(config.mutation_rate));
        }

        let mut population = ChromosomeEncoder::build_initial_population(config, &mut self.rng)?;
        self.evaluator.evaluate_all(population.individuals_mut())?;
        self.population = population;
        self.state = EngineState::Initialized;

        tracing::info!(
            population = self.config.population_size,
            genome_length = self.config.genome_length(),
            binary = self.config.is_binary,
            selection = self.config.selection.name(),
            crossover = self.config.crossover.name(),
            mutation = self.config.mutation.name(),
            "GA initialized"
        );
        Ok(())
    }

    /// Executes `num_generations` generations and returns the summary.
    ///
    /// # Errors
    /// Any operator error aborts the run immediately (no retries). The
    /// returned [`RunFailure`] carries the stage, the generation, and the
    /// records written so far.
    pub fn run(&mut self) -> Result<GaSummary, RunFailure> {
        if self.state != EngineState::Initialized {
            let err = GaError::InvalidState {
                expected: EngineState::Initialized.name(),
                found: self.state.name(),
            };
            return Err(RunFailure::new(Stage::Setup, 0, err, self.records.clone()));
        }
        self.state = EngineState::Running;

        for gen in 0..self.config.num_generations {
            if let Err((stage, source)) = self.advance(gen) {
                return Err(self.fail(stage, gen + 1, source));
            }
        }

        match self.summarize() {
            Ok(summary) => {
                self.state = EngineState::Completed;
                tracing::info!(
                    generations = summary.generations_completed,
                    objective = summary.objective_value,
                    solution = ?summary.solution(),
                    "GA completed"
                );
                Ok(summary)
            }
            Err(e) => Err(self.fail(Stage::Decode, self.generations_completed, e)),
        }
    }

    fn fail(&mut self, stage: Stage, generation: usize, source: GaError) -> RunFailure {
        self.state = EngineState::Failed;
        tracing::error!(%stage, generation, error = %source, "GA run aborted");
        RunFailure::new(stage, generation, source, self.records.clone())
    }

    /// Builds the next generation. `gen` is the 0-based count of
    /// generations completed so far.
    fn advance(&mut self, gen: usize) -> Result<(), (Stage, GaError)> {
        let (Some(selection), Some(crossover), Some(mutation)) =
            (&self.selection, &self.crossover, &self.mutation)
        else {
            let err = GaError::InvalidState {
                expected: EngineState::Initialized.name(),
                found: self.state.name(),
            };
            return Err((Stage::Setup, err));
        };
        let config = &self.config;
        let genome_length = config.genome_length();
        let offspring_count = config.offspring_count();

        // 1. Selection
        let parents = selection
            .select_parents(&self.population, config.num_parents_mating, &mut self.rng)
            .map_err(|e| (Stage::Selection, e))?;
        if parents.len() != config.num_parents_mating {
            let err = GaError::operator(
                selection.name(),
                format!(
                    "returned {} parents, expected {}",
                    parents.len(),
                    config.num_parents_mating
                ),
            );
            return Err((Stage::Selection, err));
        }

        // 2. Crossover
        let mut offspring = crossover
            .combine(&parents, offspring_count, genome_length, &mut self.rng)
            .map_err(|e| (Stage::Crossover, e))?;
        check_offspring(crossover.name(), &offspring, offspring_count, genome_length)
            .map_err(|e| (Stage::Crossover, e))?;

        // 3. Mutation
        let ctx = MutationContext {
            generation: gen,
            max_generations: config.num_generations,
            encoding: &self.encoding,
            gene_kind: config.gene_kind,
        };
        mutation
            .mutate(&mut offspring, &ctx, &mut self.rng)
            .map_err(|e| (Stage::Mutation, e))?;
        check_offspring(mutation.name(), &offspring, offspring_count, genome_length)
            .map_err(|e| (Stage::Mutation, e))?;

        // 4. Evaluation
        let mut children: Vec<Individual> = offspring.into_iter().map(Individual::new).collect();
        self.evaluator
            .evaluate_all(&mut children)
            .map_err(|e| (Stage::Evaluation, e))?;

        // 5. Elitism: best of the previous population first, then offspring
        let mut next: Vec<Individual> = self
            .population
            .elite_indices(config.elitism_count)
            .into_iter()
            .map(|i| self.population.individuals()[i].clone())
            .collect();
        next.extend(children);
        if next.len() != config.population_size {
            let err = GaError::operator(
                "elitism",
                format!(
                    "merged population has {} individuals, expected {}",
                    next.len(),
                    config.population_size
                ),
            );
            return Err((Stage::Elitism, err));
        }
        self.population = Population::from_individuals(next);
        self.generations_completed = gen + 1;

        // 6. Bookkeeping
        let record = self.best_record().map_err(|e| (Stage::Decode, e))?;
        tracing::debug!(
            generation = record.generation,
            objective = record.objective,
            "generation complete"
        );
        self.records.push(record);

        // 7. Progress
        if self.generations_completed % PROGRESS_INTERVAL == 0 {
            self.report_progress();
        }
        Ok(())
    }

    fn best_record(&self) -> Result<BestSolutionRecord, GaError> {
        let best = self
            .population
            .best()
            .ok_or_else(|| GaError::operator("population", "no evaluated individual"))?;
        let evaluation = best
            .evaluation
            .ok_or_else(|| GaError::operator("population", "best individual is not evaluated"))?;
        Ok(BestSolutionRecord {
            generation: self.generations_completed,
            genotype: best.genotype.clone(),
            phenotype: ChromosomeEncoder::decode(&best.genotype, &self.encoding)?,
            fitness: evaluation.fitness,
            objective: evaluation.objective,
        })
    }

    fn report_progress(&mut self) {
        let Some(record) = self.records.last() else {
            return;
        };
        let decoded = self.encoding.is_binary.then_some(record.phenotype.as_slice());
        tracing::info!(
            generation = record.generation,
            solution = ?record.phenotype,
            function_value = FitnessEvaluator::<O>::objective_from_fitness(record.fitness),
            "GA progress"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.on_generation(&ProgressSnapshot {
                generation: record.generation,
                best_genotype: &record.genotype,
                best_fitness: record.fitness,
                decoded,
            });
        }
    }

    fn summarize(&self) -> Result<GaSummary, GaError> {
        let best = self
            .population
            .best()
            .ok_or_else(|| GaError::operator("population", "no evaluated individual"))?;
        let evaluation = best
            .evaluation
            .ok_or_else(|| GaError::operator("population", "best individual is not evaluated"))?;
        let decoded_phenotype = if self.encoding.is_binary {
            Some(ChromosomeEncoder::decode(&best.genotype, &self.encoding)?)
        } else {
            None
        };
        let name = |op: Option<&str>| op.unwrap_or_default().to_string();
        Ok(GaSummary {
            best_genotype: best.genotype.clone(),
            decoded_phenotype,
            objective_value: evaluation.objective,
            fitness: evaluation.fitness,
            generations_completed: self.generations_completed,
            selection: name(self.selection.as_ref().map(|op| op.name())),
            crossover: name(self.crossover.as_ref().map(|op| op.name())),
            mutation: name(self.mutation.as_ref().map(|op| op.name())),
            records: self.records.clone(),
        })
    }
}

/// Checks offspring count, lengths, and bit values after an operator.
fn check_offspring(
    operator: &str,
    offspring: &[Genotype],
    expected_count: usize,
    genome_length: usize,
) -> Result<(), GaError> {
    if offspring.len() != expected_count {
        return Err(GaError::operator(
            operator,
            format!(
                "returned {} offspring, expected {expected_count}",
                offspring.len()
            ),
        ));
    }
    if let Some(bad) = offspring.iter().find(|g| g.len() != genome_length) {
        return Err(GaError::operator(
            operator,
            format!(
                "returned a genotype of length {}, expected {genome_length}",
                bad.len()
            ),
        ));
    }
    let bits_ok = offspring
        .iter()
        .filter_map(Genotype::as_bits)
        .all(|bits| bits.iter().all(|&b| b <= 1));
    if !bits_ok {
        return Err(GaError::operator(operator, "produced a non-binary bit value"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::{martin_gaddy, martin_gaddy_objective};
    use crate::ga::{CrossoverKind, MutationKind, SelectionKind};
    use rand::RngCore;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Mg = fn(&[f64]) -> f64;

    fn mg() -> Mg {
        martin_gaddy_objective
    }

    fn small_real() -> GaConfig {
        GaConfig::real_search()
            .with_population_size(20)
            .with_num_parents_mating(10)
            .with_elitism_count(3)
            .with_num_generations(25)
            .with_seed(42)
    }

    #[test]
    fn test_martin_gaddy_minimum() {
        assert_eq!(martin_gaddy(5.0, 5.0), 0.0);
        assert!(martin_gaddy(4.0, 6.0) > 0.0);
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = GaEngine::new(small_real(), mg());
        assert_eq!(engine.state(), EngineState::Uninitialized);

        let early = engine.run().unwrap_err();
        assert_eq!(early.stage, Stage::Setup);
        assert!(matches!(early.source, GaError::InvalidState { .. }));

        engine.setup().unwrap();
        assert_eq!(engine.state(), EngineState::Initialized);
        assert_eq!(engine.population().len(), 20);
        assert!(engine.population().fitness_values().is_ok());
        assert!(engine.setup().is_err());

        let summary = engine.run().unwrap();
        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(summary.generations_completed, 25);
        assert_eq!(summary.records.len(), 25);
        assert!(engine.run().is_err());
    }

    #[test]
    fn test_setup_rejects_invalid_config() {
        let config = small_real().with_tournament_size(21);
        let mut engine = GaEngine::new(config, mg());
        assert!(matches!(engine.setup(), Err(GaError::Configuration(_))));
        assert_eq!(engine.state(), EngineState::Uninitialized);

        let failure = GaEngine::optimize(small_real().with_population_size(0), mg()).unwrap_err();
        assert_eq!(failure.stage, Stage::Setup);
        assert_eq!(failure.generation, 0);
    }

    #[test]
    fn test_population_size_constant() {
        let config = small_real().with_crossover(CrossoverKind::Uniform);
        let mut engine = GaEngine::new(config, mg());
        engine.setup().unwrap();
        for gen in 0..25 {
            engine.advance(gen).unwrap();
            assert_eq!(engine.population().len(), 20);
        }
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let config = small_real().with_mutation(MutationKind::Gaussian);
        let mut engine = GaEngine::new(config, mg());
        engine.setup().unwrap();
        for gen in 0..10 {
            let before = engine.population().clone();
            let elites: Vec<Individual> = before
                .elite_indices(3)
                .into_iter()
                .map(|i| before.individuals()[i].clone())
                .collect();
            engine.advance(gen).unwrap();
            let after = engine.population().individuals();
            assert_eq!(&after[..3], elites.as_slice());
        }
    }

    #[test]
    fn test_best_objective_never_worsens() {
        let config = GaConfig::binary_search()
            .with_num_generations(40)
            .with_seed(3);
        let summary = GaEngine::optimize(config, mg()).unwrap();
        for w in summary.objective_history().windows(2) {
            assert!(w[1] <= w[0], "elitism should keep the best: {w:?}");
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        for config in [
            small_real().with_num_generations(10),
            GaConfig::binary_search()
                .with_num_generations(10)
                .with_selection(SelectionKind::Roulette)
                .with_crossover(CrossoverKind::TwoPoints)
                .with_mutation(MutationKind::Swap)
                .with_seed(9),
        ] {
            let a = GaEngine::optimize(config.clone(), mg()).unwrap();
            let b = GaEngine::optimize(config, mg()).unwrap();
            assert_eq!(a.records, b.records);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_converges_on_martin_gaddy() {
        let threshold = 0.1;
        let hits = (0..5)
            .filter(|&seed| {
                let config = GaConfig::real_search()
                    .with_num_generations(200)
                    .with_mutation(MutationKind::AdaptiveGaussian)
                    .with_crossover(CrossoverKind::Uniform)
                    .with_seed(seed);
                let summary = GaEngine::optimize(config, mg()).unwrap();
                summary.objective_value < threshold
            })
            .count();
        assert!(hits >= 4, "only {hits}/5 seeded runs reached {threshold}");
    }

    #[test]
    fn test_binary_summary_is_decoded() {
        let summary = GaEngine::optimize(GaConfig::binary_search().with_seed(1), mg()).unwrap();
        let decoded = summary.decoded_phenotype.as_ref().unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(decoded.iter().all(|&v| (-20.0..=20.0).contains(&v)));
        assert_eq!(summary.solution(), decoded.as_slice());
        assert!((martin_gaddy(decoded[0], decoded[1]) - summary.objective_value).abs() < 1e-12);
        assert_eq!(summary.selection, "tournament");
        assert_eq!(summary.crossover, "single_point");
        assert_eq!(summary.mutation, "random");
    }

    #[test]
    fn test_real_summary_has_no_decoding() {
        let summary = GaEngine::optimize(small_real(), mg()).unwrap();
        assert!(summary.decoded_phenotype.is_none());
        assert_eq!(summary.solution().len(), 2);
        assert_eq!(summary.fitness_history().len(), 25);
    }

    #[test]
    fn test_observer_every_ten_generations() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let config = GaConfig::binary_search().with_num_generations(35).with_seed(5);
        let mut engine = GaEngine::new(config, mg()).with_observer(move |s: &ProgressSnapshot<'_>| {
            sink.borrow_mut()
                .push((s.generation, s.decoded.map(<[f64]>::len)));
        });
        engine.setup().unwrap();
        engine.run().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![(10, Some(2)), (20, Some(2)), (30, Some(2))]
        );
    }

    #[test]
    fn test_observer_real_mode_has_no_decoding() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let mut engine = GaEngine::new(small_real().with_num_generations(10), mg())
            .with_observer(move |s: &ProgressSnapshot<'_>| {
                assert!(s.decoded.is_none());
                sink.set(sink.get() + 1);
            });
        engine.setup().unwrap();
        engine.run().unwrap();
        assert_eq!(seen.get(), 1);
    }

    // ---- Failure handling ----

    /// Crossover that misbehaves from a given call onward.
    struct FlakyCrossover {
        calls: Cell<usize>,
        fail_from: usize,
    }

    impl CrossoverStrategy for FlakyCrossover {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn cross(
            &self,
            parent1: &Genotype,
            _parent2: &Genotype,
            _rng: &mut dyn RngCore,
        ) -> Result<Genotype, GaError> {
            Ok(parent1.clone())
        }

        fn combine(
            &self,
            parents: &[Genotype],
            offspring_count: usize,
            _genome_length: usize,
            _rng: &mut dyn RngCore,
        ) -> Result<Vec<Genotype>, GaError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            let count = if call >= self.fail_from {
                offspring_count - 1
            } else {
                offspring_count
            };
            Ok((0..count).map(|i| parents[i % parents.len()].clone()).collect())
        }
    }

    #[test]
    fn test_malformed_crossover_aborts_run() {
        let flaky = FlakyCrossover {
            calls: Cell::new(0),
            fail_from: 3,
        };
        let mut engine =
            GaEngine::new(small_real(), mg()).with_crossover_strategy(Box::new(flaky));
        engine.setup().unwrap();
        let failure = engine.run().unwrap_err();
        assert_eq!(failure.stage, Stage::Crossover);
        assert_eq!(failure.generation, 3);
        assert_eq!(failure.records().len(), 2);
        assert_eq!(failure.last_best().unwrap().generation, 2);
        assert!(matches!(failure.source, GaError::OperatorFailure { .. }));
        assert_eq!(engine.state(), EngineState::Failed);
        assert_eq!(engine.records().len(), 2);
    }

    #[test]
    fn test_negative_objective_is_rejected() {
        // Always below zero: the initial population already fails scoring.
        let negated = |x: &[f64]| -(x[0] * x[0] + x[1] * x[1]) - 1.0;
        let failure = GaEngine::optimize(small_real(), negated).unwrap_err();
        assert_eq!(failure.stage, Stage::Setup);
        assert!(matches!(failure.source, GaError::OperatorFailure { .. }));

        let shifted = |x: &[f64]| x[0] * x[0] + x[1] * x[1];
        assert!(GaEngine::optimize(small_real(), shifted).is_ok());
    }

    #[test]
    fn test_objective_failure_reported_as_evaluation() {
        // 20 initial evaluations, then 17 offspring per generation; the
        // objective breaks partway through generation 5.
        let calls = Cell::new(0usize);
        let objective = move |x: &[f64]| {
            calls.set(calls.get() + 1);
            if calls.get() == 20 + 17 * 4 + 5 {
                f64::NAN
            } else {
                martin_gaddy_objective(x)
            }
        };
        let mut engine = GaEngine::new(small_real(), objective);
        engine.setup().unwrap();
        let failure = engine.run().unwrap_err();
        assert_eq!(failure.stage, Stage::Evaluation);
        assert_eq!(failure.generation, 5);
        assert_eq!(failure.records().len(), 4);
    }
}
