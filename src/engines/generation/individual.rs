use super::genome::Genome;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lap time of an individual, or the absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fitness {
    Unevaluated,
    /// Lap time in seconds, lower is better.
    Evaluated(f64),
}

impl Fitness {
    pub fn is_valid(&self) -> bool {
        matches!(self, Fitness::Evaluated(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Fitness::Evaluated(lap_time) => Some(*lap_time),
            Fitness::Unevaluated => None,
        }
    }
}

/// One candidate racing line.
///
/// The genome length is fixed at construction. Any write access to the genome
/// goes through [`Individual::genome_mut`], which drops the fitness back to
/// [`Fitness::Unevaluated`], so a stale lap time can never outlive a change to
/// the genes it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    genome: Genome,
    fitness: Fitness,
    generation: usize,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: Fitness::Unevaluated,
            generation: 0,
        }
    }

    pub fn genome(&self) -> &[f64] {
        &self.genome
    }

    /// Mutable view of the genes. Invalidates the fitness.
    pub fn genome_mut(&mut self) -> &mut [f64] {
        self.fitness = Fitness::Unevaluated;
        &mut self.genome
    }

    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    pub fn lap_time(&self) -> Option<f64> {
        self.fitness.value()
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_valid()
    }

    /// Generation in which this individual was last evaluated.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn set_fitness(&mut self, lap_time: f64, generation: usize) {
        self.fitness = Fitness::Evaluated(lap_time);
        self.generation = generation;
    }

    /// Bitwise genome equality, used for hall-of-fame deduplication.
    pub fn same_genome(&self, other: &Individual) -> bool {
        self.genome.len() == other.genome.len()
            && self
                .genome
                .iter()
                .zip(&other.genome)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

/// Orders by lap time, best first. Unevaluated individuals sort last.
pub fn compare_fitness(a: &Individual, b: &Individual) -> Ordering {
    match (a.lap_time(), b.lap_time()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_write_invalidates_fitness() {
        let mut ind = Individual::new(vec![0.0, 1.0, 2.0]);
        ind.set_fitness(20.5, 3);
        assert_eq!(ind.lap_time(), Some(20.5));

        ind.genome_mut()[1] = -1.0;
        assert_eq!(ind.fitness(), Fitness::Unevaluated);
        assert_eq!(ind.genome(), &[0.0, -1.0, 2.0]);
        // Generation tag stays until the next evaluation.
        assert_eq!(ind.generation(), 3);
    }

    #[test]
    fn test_compare_fitness_puts_unevaluated_last() {
        let mut fast = Individual::new(vec![0.0]);
        fast.set_fitness(18.0, 0);
        let mut slow = Individual::new(vec![0.0]);
        slow.set_fitness(21.0, 0);
        let pending = Individual::new(vec![0.0]);

        let mut all = vec![pending, slow, fast];
        all.sort_by(compare_fitness);
        assert_eq!(all[0].lap_time(), Some(18.0));
        assert_eq!(all[1].lap_time(), Some(21.0));
        assert!(!all[2].is_evaluated());
    }

    #[test]
    fn test_same_genome_is_bitwise() {
        let a = Individual::new(vec![0.0, 1.0]);
        let b = Individual::new(vec![-0.0, 1.0]);
        let c = Individual::new(vec![0.0, 1.0]);
        assert!(!a.same_genome(&b));
        assert!(a.same_genome(&c));
    }
}
