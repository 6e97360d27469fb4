pub mod fitness;

pub use fitness::{
    evaluate, interpolate_offsets, sanitize_lap_time, FitnessEvaluator, FitnessFunction,
    PENALTY_LAP_TIME,
};
