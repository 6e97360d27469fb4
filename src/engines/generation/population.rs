use super::genome::{random_genome, GeneBounds};
use super::individual::{compare_fitness, Individual};
use rand::Rng;

/// Fixed-size, ordered set of individuals for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
    gene_count: usize,
}

impl Population {
    /// Independent uniform sampling of every gene.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        gene_count: usize,
        bounds: GeneBounds,
        rng: &mut R,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::new(random_genome(gene_count, bounds, rng)))
            .collect();
        Self::from_individuals(individuals, gene_count)
    }

    /// Panics if any genome has the wrong length.
    pub fn from_individuals(individuals: Vec<Individual>, gene_count: usize) -> Self {
        let population = Self {
            individuals,
            gene_count,
        };
        population.assert_gene_count();
        population
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn gene_count(&self) -> usize {
        self.gene_count
    }

    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter(|ind| ind.is_evaluated())
            .min_by(|a, b| compare_fitness(a, b))
    }

    pub fn unevaluated_count(&self) -> usize {
        self.individuals.iter().filter(|ind| !ind.is_evaluated()).count()
    }

    /// Lap times of the evaluated individuals, in population order.
    pub fn lap_times(&self) -> Vec<f64> {
        self.individuals.iter().filter_map(|ind| ind.lap_time()).collect()
    }

    /// `(best, mean, worst)` over evaluated individuals.
    pub fn fitness_summary(&self) -> Option<(f64, f64, f64)> {
        let times = self.lap_times();
        if times.is_empty() {
            return None;
        }
        let best = times.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = times.iter().sum::<f64>() / times.len() as f64;
        Some((best, mean, worst))
    }

    fn assert_gene_count(&self) {
        for (i, ind) in self.individuals.iter().enumerate() {
            assert_eq!(
                ind.genome().len(),
                self.gene_count,
                "individual {} has a genome of the wrong length",
                i
            );
        }
    }

    /// Invariant check run by the engine at every generation boundary.
    pub fn assert_invariants(&self, expected_size: usize) {
        assert_eq!(
            self.individuals.len(),
            expected_size,
            "population size drifted"
        );
        self.assert_gene_count();
    }
}
