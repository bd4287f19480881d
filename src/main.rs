//! Nexis Collector CLI
//!
//! Continuous biometric telemetry collection for model training.

use clap::Parser;
use nexis_collector::{
    config::Config,
    pipeline::Pipeline,
    sampler::SyntheticSampler,
    store::{SessionManifest, TrainingDataWriter},
    telemetry::create_shared_stats_with_persistence,
    VERSION,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nexis-collector")]
#[command(version = VERSION)]
#[command(about = "Continuous biometric telemetry collection for model training", long_about = None)]
struct Cli {
    /// Start continuous collection
    #[arg(long)]
    continuous: bool,

    /// Stop collecting after this many seconds
    #[arg(long)]
    duration: Option<u64>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if !cli.continuous {
        println!("Nexis Collector v{VERSION}");
        println!();
        println!("Nothing to do. Pass --continuous to start collection.");
        println!("Configuration file: {:?}", Config::config_path());
        return;
    }

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    println!("Nexis Collector v{VERSION}");
    println!();
    println!("Starting collection...");
    println!("  Sample rate: {} Hz", config.sample_rate_hz);
    println!("  Encoding window: {} minutes", config.window_minutes);
    println!("  Data path: {:?}", config.data_path);
    match cli.duration {
        Some(secs) => println!("  Duration: {secs}s"),
        None => println!("  Duration: until interrupted"),
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let stats =
        create_shared_stats_with_persistence(config.data_path.join("collector_stats.json"));

    let manifest = SessionManifest::new();
    println!("Session ID: {}", manifest.session_id);
    println!("Device ID: {}", manifest.device_id);
    println!();

    let writer = match TrainingDataWriter::open(&config.data_path, &manifest) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("Error opening training-data store: {e}");
            std::process::exit(1);
        }
    };

    let mut pipeline = Pipeline::new(
        SyntheticSampler::new(),
        writer,
        stats.clone(),
        config.sample_interval(),
        config.window_minutes,
    );

    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(running.clone());

    let deadline = cli
        .duration
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    if let Err(e) = pipeline.run(running, deadline).await {
        eprintln!("Collection aborted: {e}");
        if let Err(e) = stats.save() {
            eprintln!("Warning: Could not save collection stats: {e}");
        }
        std::process::exit(1);
    }

    if let Err(e) = stats.save() {
        eprintln!("Warning: Could not save collection stats: {e}");
    }

    println!();
    println!("{}", stats.summary());
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        info!("interrupt received, stopping collection");
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
