use racingline::engines::dynamics::VehicleParams;
use racingline::engines::evaluation::{FitnessEvaluator, PENALTY_LAP_TIME};
use racingline::engines::generation::{
    ChannelProgressCallback, EvolutionEngine, GAConfig, GeneBounds, GenerationStats,
    NoopProgress, ProgressCallback, ProgressMessage,
};
use racingline::types::{Point, TrackGeometry};
use racingline::LapOptError;
use std::f64::consts::PI;

/// Smooth bowl with its minimum of 10 at the origin.
fn bowl(genome: &[f64]) -> f64 {
    10.0 + genome.iter().map(|g| g * g).sum::<f64>()
}

fn small_config(seed: u64) -> GAConfig {
    GAConfig {
        population_size: 30,
        generations: 15,
        gene_count: 6,
        seed: Some(seed),
        ..GAConfig::default()
    }
}

/// Records generation summaries for later inspection
#[derive(Default)]
struct RecordingCallback {
    started: Vec<usize>,
    completed: Vec<GenerationStats>,
    evaluated: usize,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        self.completed.push(stats.clone());
    }

    fn on_individual_evaluated(&mut self, _current: usize, _total: usize) {
        self.evaluated += 1;
    }
}

#[test]
fn test_same_seed_same_run() {
    let mut first = EvolutionEngine::new(small_config(42), bowl).unwrap();
    let mut second = EvolutionEngine::new(small_config(42), bowl).unwrap();

    let a = first.run(NoopProgress);
    let b = second.run(NoopProgress);

    assert_eq!(a, b);
    assert_eq!(first.history(), second.history());
    assert_eq!(first.evaluations(), second.evaluations());
}

#[test]
fn test_parallel_and_serial_evaluation_agree() {
    let serial_config = GAConfig {
        parallel_evaluation: false,
        ..small_config(7)
    };
    let mut parallel = EvolutionEngine::new(small_config(7), bowl).unwrap();
    let mut serial = EvolutionEngine::new(serial_config, bowl).unwrap();

    assert_eq!(parallel.run(NoopProgress), serial.run(NoopProgress));
}

#[test]
fn test_population_shape_is_preserved() {
    for size in [1, 2, 7, 30] {
        let config = GAConfig {
            population_size: size,
            ..small_config(3)
        };
        let mut engine = EvolutionEngine::new(config, bowl).unwrap();
        let mut callback = RecordingCallback::default();
        engine.run(&mut callback);

        let population = engine.population().unwrap();
        assert_eq!(population.len(), size);
        assert!(population.iter().all(|ind| ind.genome().len() == 6));
        assert!(population.iter().all(|ind| ind.is_evaluated()));
        assert_eq!(callback.completed.len(), 16);
        assert_eq!(callback.started, (0..=15).collect::<Vec<_>>());
        assert_eq!(callback.evaluated, engine.evaluations());
    }
}

#[test]
fn test_hall_of_fame_only_improves() {
    let mut engine = EvolutionEngine::new(small_config(11), bowl).unwrap();
    let results = engine.run(NoopProgress);

    let bests: Vec<f64> = engine
        .history()
        .iter()
        .map(|s| s.hall_of_fame_best.unwrap())
        .collect();
    assert!(bests.windows(2).all(|w| w[1] <= w[0]));

    assert!(!results.is_empty() && results.len() <= 5);
    assert!(results.windows(2).all(|w| w[0].lap_time <= w[1].lap_time));
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.rank, i + 1);
        assert_eq!(result.genome.len(), 6);
        assert_eq!(result.lap_time, bowl(&result.genome));
        assert!(result.generation <= 15);
    }

    // Nothing ever evaluated beats the archived best.
    let overall = engine
        .history()
        .iter()
        .map(|s| s.best)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(results[0].lap_time, overall);
}

#[test]
fn test_search_improves_on_random_start() {
    let config = GAConfig {
        population_size: 60,
        generations: 40,
        ..small_config(5)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    let results = engine.run(NoopProgress);

    let initial = engine.history()[0].best;
    assert!(results[0].lap_time < initial);
}

#[test]
fn test_no_variation_means_no_reevaluation() {
    let config = GAConfig {
        crossover_probability: 0.0,
        mutation_probability: 0.0,
        ..small_config(9)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    let results = engine.run(NoopProgress);

    assert_eq!(engine.evaluations(), 30);
    assert!(engine.history()[1..].iter().all(|s| s.evaluations == 0));
    assert!(engine
        .population()
        .unwrap()
        .iter()
        .all(|ind| ind.generation() == 0));
    assert!(results.iter().all(|r| r.generation == 0));
}

#[test]
fn test_single_slot_hall_of_fame() {
    let config = GAConfig {
        hall_of_fame_size: 1,
        ..small_config(13)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    let results = engine.run(NoopProgress);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rank, 1);
    assert_eq!(Some(results[0].lap_time), engine.get_hall_of_fame().best_lap_time());
}

#[test]
fn test_zero_generations_stops_after_initial_population() {
    let config = GAConfig {
        generations: 0,
        ..small_config(17)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    let results = engine.run(NoopProgress);

    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.evaluations(), 30);
    assert!(engine.is_done());
    assert!(results.iter().all(|r| r.generation == 0));
}

#[test]
fn test_non_finite_fitness_is_penalized() {
    let fitness = |genome: &[f64]| if genome[0] > 0.0 { f64::NAN } else { bowl(genome) };
    let mut engine = EvolutionEngine::new(small_config(19), fitness).unwrap();
    let results = engine.run(NoopProgress);

    let population = engine.population().unwrap();
    for ind in population.iter() {
        let lap = ind.lap_time().unwrap();
        assert!(lap.is_finite());
        if ind.genome()[0] > 0.0 {
            assert_eq!(lap, PENALTY_LAP_TIME);
        }
    }
    assert!(results[0].lap_time < PENALTY_LAP_TIME);
    assert!(results[0].genome[0] <= 0.0);
}

#[test]
fn test_clamped_mutation_stays_in_bounds() {
    let config = GAConfig {
        mutation_probability: 1.0,
        gene_mutation_probability: 1.0,
        mutation_sigma: 5.0,
        clamp_mutations: true,
        gene_bounds: GeneBounds::new(-1.0, 1.0),
        ..small_config(23)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    engine.run(NoopProgress);

    assert!(engine
        .population()
        .unwrap()
        .iter()
        .all(|ind| ind.genome().iter().all(|g| (-1.0..=1.0).contains(g))));
}

#[test]
fn test_channel_progress_reports_every_generation() {
    let (tx, rx) = std::sync::mpsc::channel();
    let config = GAConfig {
        generations: 4,
        ..small_config(29)
    };
    let mut engine = EvolutionEngine::new(config, bowl).unwrap();
    engine.run(ChannelProgressCallback::new(tx));

    let messages: Vec<ProgressMessage> = rx.try_iter().collect();
    let completed: Vec<usize> = messages
        .iter()
        .filter_map(|m| match m {
            ProgressMessage::GenerationComplete(stats) => Some(stats.generation),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![0, 1, 2, 3, 4]);

    let evaluated = messages
        .iter()
        .filter(|m| matches!(m, ProgressMessage::IndividualEvaluated { .. }))
        .count();
    assert_eq!(evaluated, engine.evaluations());
}

#[test]
fn test_step_by_step_matches_run() {
    let mut stepped = EvolutionEngine::new(small_config(31), bowl).unwrap();
    let mut callback = NoopProgress;
    while !stepped.is_done() {
        stepped.step(&mut callback);
    }
    assert_eq!(stepped.current_generation(), 15);

    let mut ran = EvolutionEngine::new(small_config(31), bowl).unwrap();
    let results = ran.run(NoopProgress);
    assert_eq!(stepped.get_hall_of_fame().ranked_results(), results);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let cases = [
        GAConfig {
            population_size: 0,
            ..GAConfig::default()
        },
        GAConfig {
            crossover_probability: 1.5,
            ..GAConfig::default()
        },
        GAConfig {
            gene_count: 0,
            ..GAConfig::default()
        },
        GAConfig {
            gene_bounds: GeneBounds::new(2.0, -2.0),
            ..GAConfig::default()
        },
        GAConfig {
            tournament_size: 0,
            ..GAConfig::default()
        },
    ];
    for config in cases {
        assert!(matches!(
            EvolutionEngine::new(config, bowl),
            Err(LapOptError::Configuration(_))
        ));
    }
}

fn oval(n: usize) -> TrackGeometry {
    let points = (0..n)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / n as f64;
            Point::new(120.0 * theta.cos(), 60.0 * theta.sin())
        })
        .collect();
    TrackGeometry::new(points).unwrap()
}

#[test]
fn test_track_search_reports_consistent_lap_times() {
    let centerline = oval(200);
    let config = GAConfig {
        population_size: 20,
        generations: 5,
        gene_count: 8,
        seed: Some(37),
        ..GAConfig::default()
    };
    let evaluator = FitnessEvaluator::new(centerline.clone(), VehicleParams::default());
    let mut engine = EvolutionEngine::for_track(config, centerline).unwrap();
    let results = engine.run(NoopProgress);

    assert!(!results.is_empty());
    for result in &results {
        assert!(result.lap_time.is_finite() && result.lap_time > 0.0);
        assert_eq!(result.lap_time, evaluator.lap_time(&result.genome));
    }
}
