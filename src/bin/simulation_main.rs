// simulation_main.rs
use clap::Parser;
use scenario_dashboard::config::ConfigArgs;
use scenario_dashboard::dashboard::cli::{print_report, run_simulation};
use scenario_dashboard::models::RecordId;
use scenario_dashboard::simulation_engine::{BitmapRenderer, TrajectoryLog};
use scenario_dashboard::store::RestStore;
use scenario_dashboard::{Config, Dashboard, Result};
use std::path::PathBuf;

/// Runs the animation for one scenario straight from the store.
#[derive(Parser)]
#[command(name = "simulation_main")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    /// Scenario to simulate; defaults to the first one
    scenario: Option<String>,

    /// Also write every vehicle position per tick to this CSV file
    #[arg(long)]
    trajectory: Option<PathBuf>,
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from(args.config);
    let dashboard = Dashboard::new(RestStore::new(&config)?);
    let scenario_id = args.scenario.as_deref().map(RecordId::from);
    let simulation = dashboard
        .prepare_simulation(scenario_id.as_ref(), &config)
        .await?;

    let frames = BitmapRenderer::new(&config.frames_dir)?;
    let trajectory = args.trajectory.map(TrajectoryLog::create).transpose()?;
    let report = run_simulation(simulation, (frames, trajectory)).await?;
    print_report(&report);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()).await {
        log::error!("simulation failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
