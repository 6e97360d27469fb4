use super::genome::GeneBounds;
use super::individual::{compare_fitness, Individual};
use crate::error::{LapOptError, Result};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

/// Chooses the parents of the next generation.
pub trait SelectionStrategy: Send + Sync {
    /// Returns `count` independent copies drawn from `population`.
    fn select(&self, population: &[Individual], count: usize, rng: &mut dyn RngCore)
        -> Vec<Individual>;
}

/// Recombines two individuals in place.
pub trait CrossoverStrategy: Send + Sync {
    fn mate(&self, first: &mut Individual, second: &mut Individual, rng: &mut dyn RngCore);
}

/// Perturbs one individual in place.
pub trait MutationStrategy: Send + Sync {
    fn mutate(&self, individual: &mut Individual, rng: &mut dyn RngCore);
}

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<R: Rng + ?Sized>(
    population: &[Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Individual {
    let mut best_idx = rng.gen_range(0..population.len());

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if compare_fitness(&population[idx], &population[best_idx]) == Ordering::Less {
            best_idx = idx;
        }
    }

    population[best_idx].clone()
}

/// Two-point crossover: swap the genes in `[a, b)` between the parents.
///
/// Cut points are drawn so that `1 <= a < b <= len`. Genomes shorter than two
/// genes are left untouched.
pub fn two_point_crossover<R: Rng + ?Sized>(first: &mut [f64], second: &mut [f64], rng: &mut R) {
    let len = first.len().min(second.len());
    if len < 2 {
        return;
    }

    let mut a = rng.gen_range(1..=len);
    let mut b = rng.gen_range(1..len);
    if b >= a {
        b += 1;
    } else {
        std::mem::swap(&mut a, &mut b);
    }

    first[a..b].swap_with_slice(&mut second[a..b]);
}

/// Gaussian mutation: each gene, with `gene_probability`, receives additive
/// noise drawn from `noise`; clamped to `bounds` when given.
pub fn gaussian_mutation<R: Rng + ?Sized>(
    genome: &mut [f64],
    noise: &Normal<f64>,
    gene_probability: f64,
    bounds: Option<GeneBounds>,
    rng: &mut R,
) {
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < gene_probability {
            *gene += noise.sample(rng);
            if let Some(bounds) = bounds {
                *gene = bounds.clamp(*gene);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    pub fn new(tournament_size: usize) -> Self {
        Self {
            tournament_size: tournament_size.max(1),
        }
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        population: &[Individual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<Individual> {
        if population.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| tournament_selection(population, self.tournament_size, &mut *rng))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl CrossoverStrategy for TwoPointCrossover {
    fn mate(&self, first: &mut Individual, second: &mut Individual, rng: &mut dyn RngCore) {
        two_point_crossover(first.genome_mut(), second.genome_mut(), rng);
    }
}

#[derive(Debug, Clone)]
pub struct GaussianMutation {
    noise: Normal<f64>,
    gene_probability: f64,
    bounds: Option<GeneBounds>,
}

impl GaussianMutation {
    pub fn new(sigma: f64, gene_probability: f64, bounds: Option<GeneBounds>) -> Result<Self> {
        let noise = Normal::new(0.0, sigma).map_err(|e| {
            LapOptError::Configuration(format!("Invalid mutation sigma {}: {}", sigma, e))
        })?;
        Ok(Self {
            noise,
            gene_probability,
            bounds,
        })
    }
}

impl MutationStrategy for GaussianMutation {
    fn mutate(&self, individual: &mut Individual, rng: &mut dyn RngCore) {
        gaussian_mutation(
            individual.genome_mut(),
            &self.noise,
            self.gene_probability,
            self.bounds,
            rng,
        );
    }
}
