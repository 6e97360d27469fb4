use serde::{Deserialize, Serialize};

/// Summary of one completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
    /// Fitness evaluations performed during this generation.
    pub evaluations: usize,
    pub hall_of_fame_best: Option<f64>,
    pub hall_of_fame_size: usize,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_individual_evaluated(&mut self, current: usize, total: usize);
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation)
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        (**self).on_generation_complete(stats)
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        (**self).on_individual_evaluated(current, total)
    }
}

pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}
    fn on_individual_evaluated(&mut self, _current: usize, _total: usize) {}
}

/// Reports through the `log` facade.
pub struct LogProgressCallback {
    show_statistics: bool,
}

impl LogProgressCallback {
    pub fn new(show_statistics: bool) -> Self {
        Self { show_statistics }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        if self.show_statistics {
            log::info!(
                "Gen {:3}: Best={:.2}, Avg={:.2}, Worst={:.2}, evaluated {}, hall of fame best {}",
                stats.generation,
                stats.best,
                stats.mean,
                stats.worst,
                stats.evaluations,
                stats
                    .hall_of_fame_best
                    .map(|t| format!("{:.3}s", t))
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        if current % 50 == 0 || current == total {
            log::trace!("  Evaluated {}/{} individuals", current, total);
        }
    }
}

/// For consumers on another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationStats),
    IndividualEvaluated { current: usize, total: usize },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(stats.clone()));
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::IndividualEvaluated { current, total });
    }
}
