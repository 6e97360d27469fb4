pub mod traits;
pub mod evolution;
pub mod vehicle;
pub mod reporting;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{EvolutionConfig, IndividualConfig, PopulationConfig};
pub use vehicle::VehicleConfig;
pub use reporting::{ReportingConfig, TrackConfig};
pub use traits::ConfigSection;
