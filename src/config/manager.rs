use super::{
    evolution::{EvolutionConfig, IndividualConfig, PopulationConfig},
    reporting::{ReportingConfig, TrackConfig},
    traits::ConfigSection,
    vehicle::VehicleConfig,
};
use crate::engines::generation::GAConfig;
use crate::error::LapOptError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variables such as `LAPOPT__EVOLUTION__GENERATIONS=50` override
/// file values.
pub const ENV_PREFIX: &str = "LAPOPT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub population: PopulationConfig,
    pub evolution: EvolutionConfig,
    pub individual: IndividualConfig,
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub track: TrackConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), LapOptError> {
        self.population.validate()?;
        self.evolution.validate()?;
        self.individual.validate()?;
        self.vehicle.validate()?;
        self.reporting.validate()?;
        self.track.validate()?;
        Ok(())
    }

    /// Flatten the file layout into the engine's run configuration.
    pub fn to_engine_config(&self) -> GAConfig {
        GAConfig {
            population_size: self.population.size,
            hall_of_fame_size: self.population.hall_of_fame_size,
            generations: self.evolution.generations,
            crossover_probability: self.evolution.crossover_probability,
            mutation_probability: self.evolution.mutation_probability,
            gene_count: self.individual.gene_count,
            gene_bounds: self.individual.gene_bounds,
            tournament_size: self.evolution.tournament_size,
            mutation_sigma: self.evolution.mutation_sigma,
            gene_mutation_probability: self.evolution.gene_mutation_probability,
            clamp_mutations: self.evolution.clamp_mutations,
            parallel_evaluation: self.evolution.parallel_evaluation,
            seed: self.evolution.seed,
            vehicle: self.vehicle.to_params(),
        }
    }

    /// Read a TOML or JSON file (format picked by extension) with
    /// environment overrides applied on top.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LapOptError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LapOptError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| LapOptError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| LapOptError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LapOptError> {
        let config = AppConfig::from_file(path)?;
        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LapOptError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| LapOptError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| LapOptError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, LapOptError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| LapOptError::Configuration("Config lock poisoned".to_string()))
    }

    /// Apply `f` to a copy and commit it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), LapOptError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.write_lock()?;
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, LapOptError> {
        self.config
            .write()
            .map_err(|_| LapOptError::Configuration("Config lock poisoned".to_string()))
    }
}
