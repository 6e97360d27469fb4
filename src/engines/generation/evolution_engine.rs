use crate::engines::dynamics::VehicleParams;
use crate::engines::evaluation::{sanitize_lap_time, FitnessEvaluator, FitnessFunction};
use crate::engines::generation::{
    genome::GeneBounds,
    hall_of_fame::HallOfFame,
    individual::Individual,
    operators::{
        CrossoverStrategy, GaussianMutation, MutationStrategy, SelectionStrategy,
        TournamentSelection, TwoPointCrossover,
    },
    population::Population,
    progress::{GenerationStats, ProgressCallback},
};
use crate::error::{LapOptError, Result};
use crate::types::{LapResult, TrackGeometry};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable run configuration handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GAConfig {
    pub population_size: usize,
    pub hall_of_fame_size: usize,
    /// Variation cycles run after the initial generation 0.
    pub generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub gene_count: usize,
    pub gene_bounds: GeneBounds,
    pub tournament_size: usize,
    pub mutation_sigma: f64,
    /// Per-gene probability once an individual is picked for mutation.
    pub gene_mutation_probability: f64,
    pub clamp_mutations: bool,
    pub parallel_evaluation: bool,
    pub seed: Option<u64>,
    pub vehicle: VehicleParams,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            hall_of_fame_size: 5,
            generations: 100,
            crossover_probability: 0.7,
            mutation_probability: 0.2,
            gene_count: 10,
            gene_bounds: GeneBounds::new(-2.0, 2.0),
            tournament_size: 3,
            mutation_sigma: 0.5,
            gene_mutation_probability: 0.2,
            clamp_mutations: false,
            parallel_evaluation: true,
            seed: None,
            vehicle: VehicleParams::default(),
        }
    }
}

impl GAConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(LapOptError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.gene_count == 0 {
            return Err(LapOptError::Configuration(
                "Gene count must be at least 1".to_string(),
            ));
        }
        if !self.gene_bounds.is_valid() {
            return Err(LapOptError::Configuration(format!(
                "Gene bounds must be finite with min <= max, got [{}, {}]",
                self.gene_bounds.min, self.gene_bounds.max
            )));
        }
        if self.tournament_size == 0 {
            return Err(LapOptError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        for (name, p) in [
            ("Crossover probability", self.crossover_probability),
            ("Mutation probability", self.mutation_probability),
            ("Gene mutation probability", self.gene_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(LapOptError::Configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }
        if !self.mutation_sigma.is_finite() || self.mutation_sigma < 0.0 {
            return Err(LapOptError::Configuration(format!(
                "Mutation sigma must be finite and non-negative, got {}",
                self.mutation_sigma
            )));
        }
        let v = &self.vehicle;
        if !(v.friction_coefficient > 0.0 && v.gravity > 0.0 && v.max_acceleration > 0.0)
            || v.max_deceleration == 0.0
            || !v.max_deceleration.is_finite()
        {
            return Err(LapOptError::Configuration(format!(
                "Vehicle constants must be positive (braking non-zero), got {:?}",
                v
            )));
        }
        Ok(())
    }
}

/// Generational genetic search over racing-line genomes.
///
/// Generation 0 is sampled and evaluated, then each call to [`step`] runs one
/// select → recombine → mutate → re-evaluate → replace → archive cycle. Only
/// the hall of fame carries individuals across generations; the working
/// population is replaced wholesale.
///
/// Every random draw comes from one `StdRng` owned by the engine, so a fixed
/// seed reproduces a run exactly. Fitness evaluation uses no randomness and may
/// run on the rayon pool.
///
/// [`step`]: EvolutionEngine::step
pub struct EvolutionEngine {
    config: GAConfig,
    fitness: Box<dyn FitnessFunction>,
    selection: Box<dyn SelectionStrategy>,
    crossover: Box<dyn CrossoverStrategy>,
    mutation: Box<dyn MutationStrategy>,
    hall_of_fame: HallOfFame,
    population: Option<Population>,
    generation: usize,
    evaluations: usize,
    history: Vec<GenerationStats>,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Engine with tournament selection, two-point crossover and Gaussian
    /// mutation configured from `config`.
    pub fn new<F: FitnessFunction + 'static>(config: GAConfig, fitness: F) -> Result<Self> {
        config.validate()?;
        let bounds = config.clamp_mutations.then_some(config.gene_bounds);
        let mutation = GaussianMutation::new(
            config.mutation_sigma,
            config.gene_mutation_probability,
            bounds,
        )?;
        let selection = TournamentSelection::new(config.tournament_size);

        Self::with_strategies(
            config,
            fitness,
            Box::new(selection),
            Box::new(TwoPointCrossover),
            Box::new(mutation),
        )
    }

    /// Engine evaluating genomes as offsets around `centerline`.
    pub fn for_track(config: GAConfig, centerline: TrackGeometry) -> Result<Self> {
        let evaluator = FitnessEvaluator::new(centerline, config.vehicle);
        Self::new(config, evaluator)
    }

    pub fn with_strategies<F: FitnessFunction + 'static>(
        config: GAConfig,
        fitness: F,
        selection: Box<dyn SelectionStrategy>,
        crossover: Box<dyn CrossoverStrategy>,
        mutation: Box<dyn MutationStrategy>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            fitness: Box::new(fitness),
            selection,
            crossover,
            mutation,
            hall_of_fame,
            population: None,
            generation: 0,
            evaluations: 0,
            history: Vec::new(),
            rng,
        })
    }

    /// Run the evolution process to completion and return the ranked hall of
    /// fame.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Vec<LapResult> {
        log::info!(
            "Starting genetic search: population {}, generations {}, crossover {}, mutation {}",
            self.config.population_size,
            self.config.generations,
            self.config.crossover_probability,
            self.config.mutation_probability
        );

        if self.population.is_none() {
            self.initialize(&mut callback);
        }
        while !self.is_done() {
            self.step(&mut callback);
        }

        if let Some(best) = self.hall_of_fame.best_lap_time() {
            log::info!(
                "Search finished after {} evaluations, best lap {:.3}s",
                self.evaluations,
                best
            );
        }
        self.hall_of_fame.ranked_results()
    }

    /// Sample and evaluate generation 0. Calling it again restarts the run
    /// from a fresh population, keeping the RNG stream and the hall of fame.
    pub fn initialize<C: ProgressCallback>(&mut self, callback: &mut C) {
        callback.on_generation_start(0);

        let mut population = Population::random(
            self.config.population_size,
            self.config.gene_count,
            self.config.gene_bounds,
            &mut self.rng,
        );
        let evaluations = self.evaluate_population(&mut population, 0, callback);

        self.generation = 0;
        self.finish_generation(population, evaluations, callback);
    }

    /// Advance by one generation. Initializes first if needed; does nothing
    /// once the configured generation count is reached.
    pub fn step<C: ProgressCallback>(&mut self, callback: &mut C) {
        let population = match self.population.take() {
            Some(population) => population,
            None => {
                self.initialize(callback);
                return;
            }
        };
        if self.generation >= self.config.generations {
            self.population = Some(population);
            return;
        }

        let generation = self.generation + 1;
        callback.on_generation_start(generation);

        // Selection
        let mut offspring = self.selection.select(
            population.individuals(),
            self.config.population_size,
            &mut self.rng,
        );

        // Crossover
        for pair in offspring.chunks_exact_mut(2) {
            if self.rng.gen::<f64>() < self.config.crossover_probability {
                let (first, second) = pair.split_at_mut(1);
                self.crossover
                    .mate(&mut first[0], &mut second[0], &mut self.rng);
            }
        }

        // Mutation
        for mutant in offspring.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_probability {
                self.mutation.mutate(mutant, &mut self.rng);
            }
        }

        // Replacement
        let mut next = Population::from_individuals(offspring, self.config.gene_count);
        let evaluations = self.evaluate_population(&mut next, generation, callback);

        self.generation = generation;
        self.finish_generation(next, evaluations, callback);
    }

    fn finish_generation<C: ProgressCallback>(
        &mut self,
        population: Population,
        evaluations: usize,
        callback: &mut C,
    ) {
        population.assert_invariants(self.config.population_size);
        self.hall_of_fame.update(population.individuals());

        let (best, mean, worst) = population
            .fitness_summary()
            .unwrap_or((f64::NAN, f64::NAN, f64::NAN));
        let stats = GenerationStats {
            generation: self.generation,
            best,
            mean,
            worst,
            evaluations,
            hall_of_fame_best: self.hall_of_fame.best_lap_time(),
            hall_of_fame_size: self.hall_of_fame.len(),
        };
        log::debug!(
            "Generation {} complete: best {:.3}, mean {:.3}, {} evaluations",
            stats.generation,
            stats.best,
            stats.mean,
            stats.evaluations
        );
        callback.on_generation_complete(&stats);
        self.history.push(stats);
        self.population = Some(population);
    }

    /// Evaluates every unevaluated individual and tags it with `generation`.
    /// Returns the number of evaluations.
    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        population: &mut Population,
        generation: usize,
        callback: &mut C,
    ) -> usize {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.is_evaluated())
            .map(|(i, _)| i)
            .collect();

        let fitness = &self.fitness;
        let individuals = population.individuals();
        let lap_times: Vec<f64> = if self.config.parallel_evaluation {
            pending
                .par_iter()
                .map(|&i| fitness.evaluate(individuals[i].genome()))
                .collect()
        } else {
            pending
                .iter()
                .map(|&i| fitness.evaluate(individuals[i].genome()))
                .collect()
        };

        let total = pending.len();
        let individuals = population.individuals_mut();
        for (n, (&i, lap_time)) in pending.iter().zip(lap_times).enumerate() {
            individuals[i].set_fitness(sanitize_lap_time(lap_time), generation);
            callback.on_individual_evaluated(n + 1, total);
        }

        self.evaluations += total;
        total
    }

    pub fn is_done(&self) -> bool {
        self.population.is_some() && self.generation >= self.config.generations
    }

    pub fn config(&self) -> &GAConfig {
        &self.config
    }

    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    pub fn current_generation(&self) -> usize {
        self.generation
    }

    /// Total fitness evaluations since construction.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn best(&self) -> Option<&Individual> {
        self.hall_of_fame.best()
    }
}
