use super::engine::LapMetrics;
use crate::engines::generation::GAConfig;
use crate::error::Result;
use crate::types::LapResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything worth keeping from one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub track: Option<String>,
    pub config: GAConfig,
    pub baseline_lap_time: f64,
    pub results: Vec<LapResult>,
    pub best_metrics: Option<LapMetrics>,
    pub evaluations: usize,
}

impl RunReport {
    pub fn new(
        track: Option<String>,
        config: GAConfig,
        baseline_lap_time: f64,
        results: Vec<LapResult>,
        evaluations: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            track,
            config,
            baseline_lap_time,
            results,
            best_metrics: None,
            evaluations,
        }
    }

    pub fn with_best_metrics(mut self, metrics: LapMetrics) -> Self {
        self.best_metrics = Some(metrics);
        self
    }

    pub fn best(&self) -> Option<&LapResult> {
        self.results.first()
    }

    /// Seconds gained by the best line over the centerline; negative if the
    /// search never beat it.
    pub fn improvement(&self) -> Option<f64> {
        self.best().map(|b| self.baseline_lap_time - b.lap_time)
    }

    pub fn render_text(&self, show_hall_of_fame: bool) -> String {
        let mut lines = Vec::new();
        lines.push("=".repeat(50));
        lines.push(format!(
            "Centerline lap time: {:.3}s",
            self.baseline_lap_time
        ));

        match self.best() {
            Some(best) => {
                lines.push(format!(
                    "Best lap time: {:.3}s (Gen {})",
                    best.lap_time, best.generation
                ));
                if let Some(gain) = self.improvement() {
                    lines.push(format!("Improvement: {:.3}s", gain));
                }
            }
            None => lines.push("No evaluated racing line".to_string()),
        }
        lines.push(format!("Fitness evaluations: {}", self.evaluations));

        if show_hall_of_fame && !self.results.is_empty() {
            lines.push(String::new());
            lines.push(format!("HALL OF FAME - TOP {} RESULTS", self.results.len()));
            lines.push("=".repeat(50));
            for result in &self.results {
                let preview: Vec<String> = result
                    .genome
                    .iter()
                    .take(5)
                    .map(|g| format!("{:.2}", g))
                    .collect();
                let ellipsis = if result.genome.len() > 5 { ", ..." } else { "" };
                lines.push(format!(
                    "#{}: {:.3}s (Gen {})",
                    result.rank, result.lap_time, result.generation
                ));
                lines.push(format!("    Offsets: [{}{}]", preview.join(", "), ellipsis));
            }
        }

        if let Some(metrics) = &self.best_metrics {
            lines.push(String::new());
            lines.push(metrics.render_text());
        }

        lines.join("\n")
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
