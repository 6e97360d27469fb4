pub mod analysis;
pub mod engine;
pub mod report;

pub use analysis::LapAnalysis;
pub use engine::LapMetrics;
pub use report::RunReport;
