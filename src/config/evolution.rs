use super::traits::{check_positive, check_probability, ConfigSection};
use crate::engines::generation::GeneBounds;
use crate::error::LapOptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub size: usize,
    pub hall_of_fame_size: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            hall_of_fame_size: 5,
        }
    }
}

impl ConfigSection for PopulationConfig {
    fn section_name() -> &'static str {
        "population"
    }

    fn validate(&self) -> Result<(), LapOptError> {
        if self.size == 0 {
            return Err(LapOptError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub tournament_size: usize,
    pub mutation_sigma: f64,
    #[serde(default = "default_gene_mutation_probability")]
    pub gene_mutation_probability: f64,
    #[serde(default)]
    pub clamp_mutations: bool,
    #[serde(default = "default_parallel_evaluation")]
    pub parallel_evaluation: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_gene_mutation_probability() -> f64 {
    0.2
}

fn default_parallel_evaluation() -> bool {
    true
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            crossover_probability: 0.7,
            mutation_probability: 0.2,
            tournament_size: 3,
            mutation_sigma: 0.5,
            gene_mutation_probability: default_gene_mutation_probability(),
            clamp_mutations: false,
            parallel_evaluation: default_parallel_evaluation(),
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), LapOptError> {
        check_probability("Crossover probability", self.crossover_probability)?;
        check_probability("Mutation probability", self.mutation_probability)?;
        check_probability("Gene mutation probability", self.gene_mutation_probability)?;
        if self.tournament_size == 0 {
            return Err(LapOptError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        // Zero sigma is allowed: mutation then only invalidates.
        if self.mutation_sigma != 0.0 {
            check_positive("Mutation sigma", self.mutation_sigma)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualConfig {
    pub gene_count: usize,
    pub gene_bounds: GeneBounds,
}

impl Default for IndividualConfig {
    fn default() -> Self {
        Self {
            gene_count: 10,
            gene_bounds: GeneBounds::new(-2.0, 2.0),
        }
    }
}

impl ConfigSection for IndividualConfig {
    fn section_name() -> &'static str {
        "individual"
    }

    fn validate(&self) -> Result<(), LapOptError> {
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
        Ok(())
    }
}
