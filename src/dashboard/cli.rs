use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::{DashboardError, Result};
use crate::forms::{ScenarioForm, VehicleForm};
use crate::models::{Direction, RecordId};
use crate::report::{format_scenario_table, format_vehicle_table};
use crate::simulation_engine::{BitmapRenderer, FrameRenderer, Simulation, SimulationReport};
use crate::store::DataStore;
use std::io::{stdin, stdout, BufRead, BufReader, Write};
use tokio::sync::watch;

/// Runs a simulation until its duration elapses or Ctrl-C is pressed.
pub async fn run_simulation<R: FrameRenderer>(
    simulation: Simulation,
    renderer: R,
) -> Result<SimulationReport> {
    let (stop_tx, stop_rx) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(true);
        }
    });
    println!(
        "Simulating scenario {} for {}s. Press Ctrl-C to stop.",
        simulation.scenario().name,
        simulation.scenario().time
    );
    let report = simulation.run(renderer, stop_rx).await;
    interrupt.abort();
    report
}

pub fn print_report(report: &SimulationReport) {
    println!(
        "Simulation of '{}' finished after {} ticks ({:.1}s): {:?}",
        report.scenario.name,
        report.ticks,
        report.elapsed.as_secs_f64(),
        report.reason
    );
    if !report.vehicles.is_empty() {
        println!("Final positions:");
        print!("{}", format_vehicle_table(&report.vehicles));
    }
}

/// Reads one answer. End of input is `DashboardError::InputClosed`.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<String> {
    print!("{label}: ");
    stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(DashboardError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Prompts with the current value shown; an empty answer keeps it.
fn prompt_with_default<R: BufRead>(input: &mut R, label: &str, current: &str) -> Result<String> {
    let answer = prompt(input, &format!("{label} [{current}]"))?;
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer
    })
}

async fn show_home<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    input: &mut R,
) -> Result<()> {
    let scenarios = dashboard.scenarios().await?;
    if scenarios.is_empty() {
        println!("No scenarios yet.");
        return Ok(());
    }
    println!("Scenarios:");
    for scenario in &scenarios {
        println!("  {} - {}", scenario.id, scenario.name);
    }
    let choice = prompt(input, "Scenario ID (blank for the first)")?;
    let view = if choice.is_empty() {
        dashboard.home().await?
    } else {
        dashboard.select_scenario(&RecordId::from(choice.as_str())).await?
    };
    if let Some(selected) = &view.selected {
        println!("\nScenario {} ({}s)", selected.name, selected.time);
    }
    print!("{}", format_vehicle_table(&view.vehicles));
    Ok(())
}

async fn add_scenario<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    input: &mut R,
) -> Result<()> {
    let mut form = ScenarioForm {
        name: prompt(input, "Scenario Name")?,
        time: prompt(input, "Scenario Time (seconds)")?,
    };
    let created = dashboard.add_scenario(&mut form).await?;
    println!("Scenario added successfully (id {}).", created.id);
    Ok(())
}

async fn show_all_scenarios<S: DataStore>(dashboard: &Dashboard<S>) -> Result<()> {
    let rows = dashboard.scenario_summaries().await?;
    print!("{}", format_scenario_table(&rows));
    Ok(())
}

async fn add_vehicle<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    input: &mut R,
) -> Result<()> {
    for scenario in dashboard.scenarios().await? {
        println!("  {} - {}", scenario.id, scenario.name);
    }
    let directions: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
    let mut form = VehicleForm {
        scenario: prompt(input, "Scenario ID")?,
        name: prompt(input, "Vehicle Name")?,
        speed: prompt(input, "Speed")?,
        position_x: prompt(input, "Position X")?,
        position_y: prompt(input, "Position Y")?,
        direction: prompt(input, &format!("Direction ({})", directions.join("/")))?,
    };
    let created = dashboard.add_vehicle(&mut form).await?;
    println!("Vehicle added successfully (id {}).", created.id);
    Ok(())
}

async fn edit_scenario<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    input: &mut R,
) -> Result<()> {
    let id = RecordId::from(prompt(input, "Scenario ID to edit")?.as_str());
    let scenario = dashboard.scenario(&id).await?;
    let mut form = ScenarioForm::from_scenario(&scenario);
    form.name = prompt_with_default(input, "Scenario Name", &form.name)?;
    form.time = prompt_with_default(input, "Scenario Time", &form.time)?;
    let updated = dashboard.edit_scenario(&form.apply_to(&scenario)?).await?;
    println!("Scenario {} updated.", updated.id);
    Ok(())
}

async fn edit_vehicle<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    input: &mut R,
) -> Result<()> {
    let id = RecordId::from(prompt(input, "Vehicle ID to edit")?.as_str());
    let vehicle = dashboard.vehicle(&id).await?;
    let mut form = VehicleForm::from_vehicle(&vehicle);
    form.name = prompt_with_default(input, "Vehicle Name", &form.name)?;
    form.speed = prompt_with_default(input, "Speed", &form.speed)?;
    form.position_x = prompt_with_default(input, "Position X", &form.position_x)?;
    form.position_y = prompt_with_default(input, "Position Y", &form.position_y)?;
    form.direction = prompt_with_default(input, "Direction", &form.direction)?;
    let updated = dashboard.edit_vehicle(&form.apply_to(&vehicle)?).await?;
    println!("Vehicle {} updated.", updated.id);
    Ok(())
}

async fn start_simulation<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    config: &Config,
    input: &mut R,
) -> Result<()> {
    let choice = prompt(input, "Scenario ID (blank for the first)")?;
    let id = (!choice.is_empty()).then(|| RecordId::from(choice.as_str()));
    let simulation = dashboard.prepare_simulation(id.as_ref(), config).await?;
    let renderer = BitmapRenderer::new(&config.frames_dir)?;
    let report = run_simulation(simulation, renderer).await?;
    print_report(&report);
    println!("Frames written to {}", config.frames_dir.display());
    Ok(())
}

/// Interactive menu over the dashboard pages, reading from stdin.
pub async fn run_cli<S: DataStore>(dashboard: &Dashboard<S>, config: &Config) -> Result<()> {
    run_menu(dashboard, config, &mut BufReader::new(stdin())).await
}

/// Runs the menu until "Exit" is chosen or `input` ends.
pub async fn run_menu<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    config: &Config,
    input: &mut R,
) -> Result<()> {
    loop {
        println!("\nScenario Dashboard");
        println!("1. Home (vehicles of a scenario)");
        println!("2. Add Scenario");
        println!("3. All Scenarios");
        println!("4. Add Vehicle");
        println!("5. Edit Scenario");
        println!("6. Delete Scenario");
        println!("7. Edit Vehicle");
        println!("8. Delete Vehicle");
        println!("9. Start Simulation");
        println!("10. Delete All");
        println!("11. Exit");

        let outcome = match prompt(input, "Enter your choice") {
            Ok(choice) => menu_action(dashboard, config, input, &choice).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(true) => {}
            Ok(false) => {
                println!("Exiting dashboard.");
                return Ok(());
            }
            Err(DashboardError::InputClosed) => {
                println!("\nInput closed. Exiting dashboard.");
                return Ok(());
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

/// Runs one menu entry. `Ok(false)` means the user chose to exit.
async fn menu_action<S: DataStore, R: BufRead>(
    dashboard: &Dashboard<S>,
    config: &Config,
    input: &mut R,
    choice: &str,
) -> Result<bool> {
    match choice.parse::<u32>().unwrap_or(0) {
        1 => show_home(dashboard, input).await?,
        2 => add_scenario(dashboard, input).await?,
        3 => show_all_scenarios(dashboard).await?,
        4 => add_vehicle(dashboard, input).await?,
        5 => edit_scenario(dashboard, input).await?,
        6 => {
            let id = RecordId::from(prompt(input, "Scenario ID to delete")?.as_str());
            let summary = dashboard.delete_scenario(&id).await?;
            println!("Scenario {} and {} vehicles deleted.", id, summary.vehicles);
        }
        7 => edit_vehicle(dashboard, input).await?,
        8 => {
            let id = RecordId::from(prompt(input, "Vehicle ID to delete")?.as_str());
            dashboard.delete_vehicle(&id).await?;
            println!("Vehicle {} deleted.", id);
        }
        9 => start_simulation(dashboard, config, input).await?,
        10 => {
            if prompt(input, "Delete every scenario and vehicle? (y/N)")?.eq_ignore_ascii_case("y") {
                let summary = dashboard.delete_all().await?;
                println!(
                    "Deleted {} scenarios and {} vehicles.",
                    summary.scenarios, summary.vehicles
                );
            }
        }
        11 => return Ok(false),
        _ => println!("Invalid choice. Try again."),
    }
    Ok(true)
}
