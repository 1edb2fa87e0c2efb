// report.rs
use crate::error::Result;
use crate::models::{serialize_seconds, ScenarioSummary, Vehicle};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ScenarioRow<'a> {
    scenario_id: &'a str,
    scenario_name: &'a str,
    #[serde(serialize_with = "serialize_seconds")]
    scenario_time: f64,
    number_of_vehicles: usize,
}

#[derive(Debug, Serialize)]
struct VehicleRow<'a> {
    vehicle_id: &'a str,
    vehicle_name: &'a str,
    speed: f64,
    position_x: f64,
    position_y: f64,
    direction: &'a str,
}

fn direction_label(vehicle: &Vehicle) -> &'static str {
    vehicle.direction.map(|d| d.as_str()).unwrap_or("")
}

/// Writes the "all scenarios" table as CSV.
pub fn write_scenario_csv<W: Write>(writer: W, rows: &[ScenarioSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(ScenarioRow {
            scenario_id: row.scenario.id.as_str(),
            scenario_name: &row.scenario.name,
            scenario_time: row.scenario.time,
            number_of_vehicles: row.vehicle_count,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a scenario's vehicle table as CSV.
pub fn write_vehicle_csv<W: Write>(writer: W, vehicles: &[Vehicle]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for vehicle in vehicles {
        wtr.serialize(VehicleRow {
            vehicle_id: vehicle.id.as_str(),
            vehicle_name: &vehicle.name,
            speed: vehicle.speed,
            position_x: vehicle.position_x,
            position_y: vehicle.position_y,
            direction: direction_label(vehicle),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Plain-text rendering of the "all scenarios" table.
pub fn format_scenario_table(rows: &[ScenarioSummary]) -> String {
    let mut out = format!(
        "{:<12} {:<24} {:>14} {:>18}\n",
        "Scenario ID", "Scenario Name", "Scenario Time", "Number of Vehicles"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:<24} {:>14} {:>18}\n",
            row.scenario.id, row.scenario.name, row.scenario.time, row.vehicle_count
        ));
    }
    out
}

/// Plain-text rendering of a vehicle table.
pub fn format_vehicle_table(vehicles: &[Vehicle]) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:>8} {:>12} {:>12} {:<10}\n",
        "Vehicle ID", "Vehicle Name", "Speed", "Position X", "Position Y", "Direction"
    );
    for v in vehicles {
        out.push_str(&format!(
            "{:<10} {:<20} {:>8} {:>12} {:>12} {:<10}\n",
            v.id,
            v.name,
            v.speed,
            v.position_x,
            v.position_y,
            direction_label(v)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, RecordId, Scenario};

    fn summary() -> ScenarioSummary {
        ScenarioSummary {
            scenario: Scenario {
                id: RecordId::new("1"),
                name: "morning".to_string(),
                time: 20.0,
            },
            vehicle_count: 2,
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: RecordId::new("5"),
            scenario_id: RecordId::new("1"),
            name: "bus".to_string(),
            speed: 3.0,
            position_x: 10.0,
            position_y: 20.0,
            direction: Some(Direction::Downwards),
        }
    }

    #[test]
    fn scenario_csv_has_header_and_counts() {
        let mut buf = Vec::new();
        write_scenario_csv(&mut buf, &[summary()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "scenario_id,scenario_name,scenario_time,number_of_vehicles\n1,morning,20,2\n"
        );
    }

    #[test]
    fn vehicle_csv_lists_direction() {
        let mut buf = Vec::new();
        write_vehicle_csv(&mut buf, &[vehicle()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("5,bus,3.0,10.0,20.0,downwards\n"));
    }

    #[test]
    fn text_tables_include_every_row() {
        let table = format_scenario_table(&[summary()]);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().nth(1).unwrap().starts_with("1 "));

        let table = format_vehicle_table(&[vehicle()]);
        assert!(table.contains("downwards"));
    }
}
