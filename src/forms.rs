//! Form state for adding and editing scenarios and vehicles.
//!
//! Forms hold the raw text the user typed. Nothing is parsed until `submit`,
//! so a half-filled form can be shown, edited and reset freely.

use crate::error::{DashboardError, Result};
use crate::global_variables::{MAX_POSITION_X, MAX_POSITION_Y};
use crate::models::{Direction, NewScenario, NewVehicle, RecordId, Scenario, Vehicle};

pub const POSITION_RANGE_MESSAGE: &str =
    "Position X and Y must be between the range 0-1300 and 0-600 respectively";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioForm {
    pub name: String,
    /// Seconds, as typed.
    pub time: String,
}

impl ScenarioForm {
    /// Pre-fills the form for editing an existing scenario.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            name: scenario.name.clone(),
            time: format_number(scenario.time),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<NewScenario> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DashboardError::Validation(
                "Scenario name is required".to_string(),
            ));
        }
        let time = parse_integer("Scenario time", &self.time)?;
        if time < 0 {
            return Err(DashboardError::Validation(
                "Scenario time must not be negative".to_string(),
            ));
        }
        Ok(NewScenario {
            name: name.to_string(),
            time: time as u64,
        })
    }

    /// Produces the edited record, keeping the scenario's id.
    pub fn apply_to(&self, scenario: &Scenario) -> Result<Scenario> {
        Ok(self.submit()?.with_id(scenario.id.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    /// Id of the selected scenario; empty means nothing selected.
    pub scenario: String,
    pub name: String,
    pub speed: String,
    pub position_x: String,
    pub position_y: String,
    pub direction: String,
}

impl VehicleForm {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            scenario: vehicle.scenario_id.to_string(),
            name: vehicle.name.clone(),
            speed: format_number(vehicle.speed),
            position_x: format_number(vehicle.position_x),
            position_y: format_number(vehicle.position_y),
            direction: vehicle
                .direction
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<NewVehicle> {
        let (x, y) = self.position()?;

        let scenario_id = RecordId::from(self.scenario.as_str());
        if scenario_id.is_empty() {
            return Err(DashboardError::Validation(
                "Select a scenario for the vehicle".to_string(),
            ));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DashboardError::Validation(
                "Vehicle name is required".to_string(),
            ));
        }
        let speed = parse_integer("Speed", &self.speed)?;
        let direction = self
            .direction
            .parse::<Direction>()
            .map_err(|_| DashboardError::Validation("Select a direction".to_string()))?;

        Ok(NewVehicle {
            scenario_id,
            name: name.to_string(),
            speed: speed as f64,
            position_x: x as f64,
            position_y: y as f64,
            direction,
        })
    }

    /// Produces the edited record. The vehicle stays in its scenario.
    pub fn apply_to(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let mut form = self.clone();
        form.scenario = vehicle.scenario_id.to_string();
        Ok(form.submit()?.with_id(vehicle.id.clone()))
    }

    fn position(&self) -> Result<(i64, i64)> {
        let x = self.position_x.trim().parse::<i64>();
        let y = self.position_y.trim().parse::<i64>();
        match (x, y) {
            (Ok(x), Ok(y))
                if (0..=MAX_POSITION_X).contains(&x) && (0..=MAX_POSITION_Y).contains(&y) =>
            {
                Ok((x, y))
            }
            _ => Err(DashboardError::Validation(
                POSITION_RANGE_MESSAGE.to_string(),
            )),
        }
    }
}

fn parse_integer(field: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DashboardError::Validation(format!("{field} must be a whole number")))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
