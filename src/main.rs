use clap::{Parser, Subcommand, ValueEnum};
use scenario_dashboard::config::ConfigArgs;
use scenario_dashboard::dashboard::cli::{print_report, run_cli, run_simulation};
use scenario_dashboard::forms::{ScenarioForm, VehicleForm};
use scenario_dashboard::models::RecordId;
use scenario_dashboard::report::{
    format_scenario_table, format_vehicle_table, write_scenario_csv, write_vehicle_csv,
};
use scenario_dashboard::simulation_engine::{BitmapRenderer, TrajectoryLog};
use scenario_dashboard::store::RestStore;
use scenario_dashboard::{Config, Dashboard, Result};
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenario_dashboard")]
#[command(about = "Manage traffic scenarios and vehicles, and animate them")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every scenario with its vehicle count
    Scenarios,

    /// Create a scenario
    AddScenario {
        #[arg(long)]
        name: String,
        /// Duration in seconds
        #[arg(long)]
        time: String,
    },

    /// Change a scenario's name or duration
    EditScenario {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },

    /// Delete a scenario and all of its vehicles
    DeleteScenario { id: String },

    /// Delete every vehicle and every scenario
    DeleteAll,

    /// List the vehicles of a scenario (the first one by default)
    Vehicles {
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Add a vehicle to a scenario
    AddVehicle {
        #[arg(long)]
        scenario: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        speed: String,
        /// 0-1300
        #[arg(long, allow_hyphen_values = true)]
        x: String,
        /// 0-600
        #[arg(long, allow_hyphen_values = true)]
        y: String,
        /// towards, backwards, upwards or downwards
        #[arg(long)]
        direction: String,
    },

    /// Change a vehicle's fields
    EditVehicle {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        speed: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        x: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<String>,
        #[arg(long)]
        direction: Option<String>,
    },

    /// Delete a single vehicle
    DeleteVehicle { id: String },

    /// Animate a scenario's vehicles and write the frames as PNG files
    Simulate {
        /// Scenario to simulate; defaults to the first one
        #[arg(long)]
        scenario: Option<String>,
        /// Also write every vehicle position per tick to this CSV file
        #[arg(long)]
        trajectory: Option<PathBuf>,
    },

    /// Export a table as CSV
    Export {
        #[arg(value_enum)]
        table: Table,
        /// Scenario whose vehicles to export (vehicles table only)
        #[arg(long)]
        scenario: Option<String>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive menu
    Menu,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Table {
    Scenarios,
    Vehicles,
}

async fn run(command: Commands, config: Config) -> Result<()> {
    let dashboard = Dashboard::new(RestStore::new(&config)?);

    match command {
        Commands::Scenarios => {
            let rows = dashboard.scenario_summaries().await?;
            print!("{}", format_scenario_table(&rows));
        }
        Commands::AddScenario { name, time } => {
            let mut form = ScenarioForm { name, time };
            let created = dashboard.add_scenario(&mut form).await?;
            println!("Scenario added successfully (id {}).", created.id);
        }
        Commands::EditScenario { id, name, time } => {
            let scenario = dashboard.scenario(&RecordId::from(id.as_str())).await?;
            let mut form = ScenarioForm::from_scenario(&scenario);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(time) = time {
                form.time = time;
            }
            let updated = dashboard.edit_scenario(&form.apply_to(&scenario)?).await?;
            println!("Scenario {} updated.", updated.id);
        }
        Commands::DeleteScenario { id } => {
            let id = RecordId::from(id.as_str());
            let summary = dashboard.delete_scenario(&id).await?;
            println!("Scenario {} and {} vehicles deleted.", id, summary.vehicles);
        }
        Commands::DeleteAll => {
            let summary = dashboard.delete_all().await?;
            println!(
                "Deleted {} scenarios and {} vehicles.",
                summary.scenarios, summary.vehicles
            );
        }
        Commands::Vehicles { scenario } => {
            let view = match scenario {
                Some(id) => dashboard.select_scenario(&RecordId::from(id.as_str())).await?,
                None => dashboard.home().await?,
            };
            match &view.selected {
                Some(selected) => println!("Scenario {} ({}s)", selected.name, selected.time),
                None => println!("No scenarios yet."),
            }
            print!("{}", format_vehicle_table(&view.vehicles));
        }
        Commands::AddVehicle {
            scenario,
            name,
            speed,
            x,
            y,
            direction,
        } => {
            let mut form = VehicleForm {
                scenario,
                name,
                speed,
                position_x: x,
                position_y: y,
                direction,
            };
            let created = dashboard.add_vehicle(&mut form).await?;
            println!("Vehicle added successfully (id {}).", created.id);
        }
        Commands::EditVehicle {
            id,
            name,
            speed,
            x,
            y,
            direction,
        } => {
            let vehicle = dashboard.vehicle(&RecordId::from(id.as_str())).await?;
            let mut form = VehicleForm::from_vehicle(&vehicle);
            let edits = [
                (&mut form.name, name),
                (&mut form.speed, speed),
                (&mut form.position_x, x),
                (&mut form.position_y, y),
                (&mut form.direction, direction),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    *field = value;
                }
            }
            let updated = dashboard.edit_vehicle(&form.apply_to(&vehicle)?).await?;
            println!("Vehicle {} updated.", updated.id);
        }
        Commands::DeleteVehicle { id } => {
            let id = RecordId::from(id.as_str());
            dashboard.delete_vehicle(&id).await?;
            println!("Vehicle {} deleted.", id);
        }
        Commands::Simulate {
            scenario,
            trajectory,
        } => {
            let scenario_id = scenario.as_deref().map(RecordId::from);
            let simulation = dashboard
                .prepare_simulation(scenario_id.as_ref(), &config)
                .await?;
            let frames = BitmapRenderer::new(&config.frames_dir)?;
            let trajectory = trajectory.map(TrajectoryLog::create).transpose()?;
            let report = run_simulation(simulation, (frames, trajectory)).await?;
            print_report(&report);
            println!("Frames written to {}", config.frames_dir.display());
        }
        Commands::Export {
            table,
            scenario,
            output,
        } => match table {
            Table::Scenarios => {
                let rows = dashboard.scenario_summaries().await?;
                match output {
                    Some(path) => write_scenario_csv(File::create(path)?, &rows)?,
                    None => write_scenario_csv(stdout().lock(), &rows)?,
                }
            }
            Table::Vehicles => {
                let view = match scenario {
                    Some(id) => dashboard.select_scenario(&RecordId::from(id.as_str())).await?,
                    None => dashboard.home().await?,
                };
                match output {
                    Some(path) => write_vehicle_csv(File::create(path)?, &view.vehicles)?,
                    None => write_vehicle_csv(stdout().lock(), &view.vehicles)?,
                }
            }
        },
        Commands::Menu => run_cli(&dashboard, &config).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from(cli.config);
    log::debug!("using store at {}", config.api_url);

    if let Err(e) = run(cli.command, config).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
