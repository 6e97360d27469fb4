use racingline::config::{AppConfig, ConfigManager};
use racingline::engines::generation::GeneBounds;
use racingline::LapOptError;
use std::fs;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("racingline_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const MINIMAL_TOML: &str = r#"
[population]
size = 40
hall_of_fame_size = 3

[evolution]
generations = 25
crossover_probability = 0.6
mutation_probability = 0.3
tournament_size = 4
mutation_sigma = 0.25

[individual]
gene_count = 12

[individual.gene_bounds]
min = -3.0
max = 3.0

[vehicle]
friction_coefficient = 1.2
gravity = 9.81
max_acceleration = 3.0
max_deceleration = -6.0
"#;

#[test]
fn test_load_minimal_toml() {
    let path = scratch_file("minimal.toml", MINIMAL_TOML);
    let config = AppConfig::from_file(&path).unwrap();

    assert_eq!(config.population.size, 40);
    assert_eq!(config.evolution.tournament_size, 4);
    assert_eq!(config.individual.gene_bounds, GeneBounds::new(-3.0, 3.0));
    // Optional keys fall back to defaults.
    assert_eq!(config.evolution.gene_mutation_probability, 0.2);
    assert!(!config.evolution.clamp_mutations);
    assert!(config.evolution.seed.is_none());
    assert_eq!(config.track.spline_points, 500);
    assert!(config.reporting.show_hall_of_fame);

    let engine = config.to_engine_config();
    assert_eq!(engine.population_size, 40);
    assert_eq!(engine.hall_of_fame_size, 3);
    assert_eq!(engine.generations, 25);
    assert_eq!(engine.gene_count, 12);
    assert_eq!(engine.mutation_sigma, 0.25);
    assert_eq!(engine.vehicle.friction_coefficient, 1.2);
    assert_eq!(engine.vehicle.max_deceleration, -6.0);
    assert_eq!(engine.vehicle, config.vehicle.to_params());
}

#[test]
fn test_load_json_with_optional_sections() {
    let json = r#"{
        "population": { "size": 10, "hall_of_fame_size": 2 },
        "evolution": {
            "generations": 5,
            "crossover_probability": 0.7,
            "mutation_probability": 0.2,
            "tournament_size": 3,
            "mutation_sigma": 0.5,
            "seed": 1234
        },
        "individual": { "gene_count": 8, "gene_bounds": { "min": -1.5, "max": 1.5 } },
        "vehicle": {
            "friction_coefficient": 1.4,
            "gravity": 9.81,
            "max_acceleration": 4.0,
            "max_deceleration": -8.0
        },
        "reporting": { "show_progress": false },
        "track": { "spline_points": 300 }
    }"#;
    let path = scratch_file("full.json", json);
    let config = AppConfig::from_file(&path).unwrap();

    assert_eq!(config.evolution.seed, Some(1234));
    assert_eq!(config.vehicle.friction_coefficient, 1.4);
    assert!(!config.reporting.show_progress);
    assert!(config.reporting.show_statistics);
    assert_eq!(config.track.spline_points, 300);
    assert_eq!(config.track.max_gap_factor, 5.0);
    assert_eq!(config.to_engine_config().seed, Some(1234));
}

#[test]
fn test_missing_required_key_is_rejected() {
    let without_sigma = MINIMAL_TOML.replace("mutation_sigma = 0.25\n", "");
    let path = scratch_file("no_sigma.toml", &without_sigma);
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(LapOptError::Configuration(_))
    ));
}

#[test]
fn test_vehicle_constants_are_required() {
    let start = MINIMAL_TOML.find("[vehicle]").unwrap();
    let path = scratch_file("no_vehicle.toml", &MINIMAL_TOML[..start]);
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(LapOptError::Configuration(_))
    ));

    for key in [
        "friction_coefficient = 1.2\n",
        "gravity = 9.81\n",
        "max_acceleration = 3.0\n",
        "max_deceleration = -6.0\n",
    ] {
        let without_key = MINIMAL_TOML.replace(key, "");
        let path = scratch_file("partial_vehicle.toml", &without_key);
        assert!(
            matches!(
                AppConfig::from_file(&path),
                Err(LapOptError::Configuration(_))
            ),
            "accepted config without {}",
            key.trim()
        );
    }
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let bad = MINIMAL_TOML.replace("crossover_probability = 0.6", "crossover_probability = 1.2");
    let path = scratch_file("bad_probability.toml", &bad);
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(LapOptError::Configuration(_))
    ));

    let empty = MINIMAL_TOML.replace("size = 40", "size = 0");
    let path = scratch_file("empty_population.toml", &empty);
    assert!(AppConfig::from_file(&path).is_err());
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let path = std::env::temp_dir().join("racingline_does_not_exist.toml");
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(LapOptError::Configuration(_))
    ));
}

#[test]
fn test_manager_save_and_reload() {
    let manager = ConfigManager::new();
    manager
        .update(|c| {
            c.population.size = 64;
            c.evolution.clamp_mutations = true;
            c.individual.gene_count = 16;
        })
        .unwrap();

    let dir = std::env::temp_dir().join(format!("racingline_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("saved.toml");
    manager.save_to_file(&path).unwrap();

    let reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.get().unwrap(), manager.get().unwrap());
}
