use anyhow::Context;
use clap::Parser;
use racingline::config::{AppConfig, ConfigManager};
use racingline::data::load_track;
use racingline::engines::evaluation::FitnessEvaluator;
use racingline::engines::generation::{EvolutionEngine, LogProgressCallback, NoopProgress};
use racingline::engines::metrics::{LapAnalysis, LapMetrics, RunReport};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "racingline")]
#[command(about = "Search for the fastest racing line around a closed circuit")]
struct Args {
    /// CSV of centerline waypoints with x and y columns
    #[arg(long)]
    track: PathBuf,

    /// TOML or JSON run configuration
    #[arg(long)]
    config: PathBuf,

    /// Override the number of spline points
    #[arg(long)]
    points: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the run report as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Only simulate the centerline
    #[arg(long)]
    baseline_only: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let manager = ConfigManager::new();
    manager
        .load_from_file(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    manager.update(|c| {
        if let Some(points) = args.points {
            c.track.spline_points = points;
        }
        if let Some(seed) = args.seed {
            c.evolution.seed = Some(seed);
        }
    })?;
    let app: AppConfig = manager.get()?;
    let ga_config = app.to_engine_config();

    let centerline = load_track(&args.track, app.track.spline_points, app.track.max_gap_factor)
        .with_context(|| format!("loading track {}", args.track.display()))?;
    let evaluator = FitnessEvaluator::new(centerline.clone(), ga_config.vehicle);

    let baseline = evaluator.baseline_lap_time();
    println!("Centerline lap time: {:.3}s", baseline);

    if args.baseline_only {
        let analysis = LapAnalysis::analyze(centerline.points(), &ga_config.vehicle);
        println!("{}", LapMetrics::calculate(&analysis).render_text());
        return Ok(());
    }

    let started = Instant::now();
    let mut engine = EvolutionEngine::for_track(ga_config.clone(), centerline)?;
    let results = if app.reporting.show_progress {
        engine.run(LogProgressCallback::new(app.reporting.show_statistics))
    } else {
        engine.run(NoopProgress)
    };
    log::info!("Search took {:.1}s", started.elapsed().as_secs_f64());

    let track_name = args
        .track
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    let mut report = RunReport::new(
        track_name,
        ga_config,
        baseline,
        results,
        engine.evaluations(),
    );
    let best_metrics = report.best().map(|best| {
        let trajectory = evaluator.trajectory(&best.genome);
        LapMetrics::calculate(&LapAnalysis::analyze(&trajectory, evaluator.vehicle()))
    });
    if let Some(metrics) = best_metrics {
        report = report.with_best_metrics(metrics);
    }

    println!("{}", report.render_text(app.reporting.show_hall_of_fame));

    if let Some(path) = &args.output {
        report
            .save_json(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
