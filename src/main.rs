//! Gray-Scott CLI - Run simulations from JSON configuration.

use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use gray_scott::{
    Engine, ResumeState, RunStatus, SimulationConfig, SimulationEvent, Snapshot, StartCommand,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [iterations] [--continue]", args[0]);
        eprintln!();
        eprintln!("Run a Gray-Scott reaction-diffusion simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to simulation configuration file");
        eprintln!("  iterations   Override the configured iteration budget");
        eprintln!("  --continue   Resume from <config>.state.json if it exists");
        eprintln!();
        eprintln!("The terminal snapshot is written to <config>.state.json after");
        eprintln!("every run, so a later `--continue` picks up where it stopped.");
        eprintln!();
        eprintln!("An example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let iterations_override: Option<u64> = args.get(2).and_then(|s| s.parse().ok());
    let continue_run = args.iter().any(|a| a == "--continue");

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: SimulationConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(iterations) = iterations_override {
        config.iterations = iterations;
    }

    // Persisted continuation state lives next to the config.
    let state_path = config_path.with_extension("state.json");
    let resume: Option<ResumeState> = if continue_run && state_path.exists() {
        let state_str = fs::read_to_string(&state_path).unwrap_or_else(|e| {
            eprintln!("Error reading state file: {}", e);
            std::process::exit(1);
        });
        let state: ResumeState = serde_json::from_str(&state_str).unwrap_or_else(|e| {
            eprintln!("Error parsing state file: {}", e);
            std::process::exit(1);
        });
        info!(
            "resuming from {} at iteration {}",
            state_path.display(),
            state.progress.iterations
        );
        Some(state)
    } else {
        None
    };

    println!("Gray-Scott Simulation");
    println!("=====================");
    println!("Grid: {}x{} ({})", config.size, config.size, config.shape);
    println!(
        "Rates: Da={} Db={} F={} K={}",
        config.diffusion_rate_a, config.diffusion_rate_b, config.feed_rate, config.kill_rate
    );
    println!("dt: {}", config.dt);
    println!("Iterations: {}", config.iterations);
    println!();

    let mut engine = Engine::new();
    let events = engine
        .start(StartCommand { config, resume })
        .unwrap_or_else(|e| {
            eprintln!("Error starting simulation: {}", e);
            std::process::exit(1);
        });

    let mut last_snapshot: Option<Snapshot> = None;
    let mut final_status = RunStatus::Complete;

    for event in events {
        match event {
            SimulationEvent::Progress(state) => info!("{}", state),
            SimulationEvent::Diagnostic(text) => debug!("{}", text),
            SimulationEvent::Snapshot(snapshot) => {
                debug!(
                    "snapshot at itn {} ({:?})",
                    snapshot.progress.iterations, snapshot.status
                );
                last_snapshot = Some(snapshot);
            }
            SimulationEvent::Complete { status } => {
                final_status = status;
            }
        }
    }

    let Some(snapshot) = last_snapshot else {
        eprintln!("Run produced no snapshots");
        std::process::exit(1);
    };

    println!("Run ended: {:?}", final_status);
    println!("  {}", snapshot.progress);

    let (min_a, max_a) = snapshot
        .grid
        .cells()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.a), hi.max(c.a))
        });
    println!("  a range: [{:.4}, {:.4}]", min_a, max_a);

    let state = ResumeState {
        progress: snapshot.progress,
        grid: snapshot.grid,
    };
    let state_json = serde_json::to_string(&state).unwrap_or_else(|e| {
        eprintln!("Error serializing state: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = fs::write(&state_path, state_json) {
        eprintln!("Error writing state file '{}': {}", state_path.display(), e);
        std::process::exit(1);
    }
    println!("State saved to {}", state_path.display());
}

fn print_example_config() {
    let config = SimulationConfig::default();
    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
