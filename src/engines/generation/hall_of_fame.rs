use super::individual::Individual;
use crate::types::LapResult;

/// Bounded archive of the fastest individuals seen across every generation.
///
/// Entries stay sorted by ascending lap time. A new individual only gets in
/// while there is room or when it is strictly faster than the current worst
/// entry; ties keep the older entry ahead. Genomes already archived
/// (bitwise-equal) are not stored twice.
#[derive(Debug, Clone)]
pub struct HallOfFame {
    entries: Vec<Individual>,
    max_size: usize,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Merge the evaluated members of a population. Returns how many were
    /// archived.
    pub fn update(&mut self, population: &[Individual]) -> usize {
        population
            .iter()
            .filter(|ind| self.try_add(ind))
            .count()
    }

    /// Attempt to archive one individual
    pub fn try_add(&mut self, individual: &Individual) -> bool {
        let lap_time = match individual.lap_time() {
            Some(t) => t,
            None => return false,
        };

        if self.max_size == 0 {
            return false;
        }

        if self.entries.len() >= self.max_size {
            let worst = self.entries[self.entries.len() - 1]
                .lap_time()
                .unwrap_or(f64::INFINITY);
            if lap_time >= worst {
                return false;
            }
        }

        // Deduplication check
        if self.entries.iter().any(|e| e.same_genome(individual)) {
            return false;
        }

        let pos = self
            .entries
            .partition_point(|e| e.lap_time().map_or(false, |t| t <= lap_time));
        self.entries.insert(pos, individual.clone());
        self.entries.truncate(self.max_size);

        true
    }

    pub fn best(&self) -> Option<&Individual> {
        self.entries.first()
    }

    pub fn best_lap_time(&self) -> Option<f64> {
        self.best().and_then(|b| b.lap_time())
    }

    /// Get all archived individuals, best first
    pub fn get_all(&self) -> &[Individual] {
        &self.entries
    }

    /// Ranked output, rank 1 being the fastest.
    pub fn ranked_results(&self) -> Vec<LapResult> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, ind)| {
                ind.lap_time().map(|lap_time| LapResult {
                    rank: i + 1,
                    genome: ind.genome().to_vec(),
                    lap_time,
                    generation: ind.generation(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
