pub mod genome;
pub mod individual;
pub mod population;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::{GeneBounds, Genome};
pub use individual::{Fitness, Individual};
pub use population::Population;
pub use hall_of_fame::HallOfFame;
pub use evolution_engine::{EvolutionEngine, GAConfig};
pub use operators::{
    CrossoverStrategy, GaussianMutation, MutationStrategy, SelectionStrategy,
    TournamentSelection, TwoPointCrossover,
};
pub use progress::{
    ChannelProgressCallback, GenerationStats, LogProgressCallback, NoopProgress,
    ProgressCallback, ProgressMessage,
};
