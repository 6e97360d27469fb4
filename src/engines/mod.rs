pub mod dynamics;
pub mod evaluation;
pub mod generation;
pub mod metrics;
