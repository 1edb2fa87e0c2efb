use crate::error::{DashboardError, Result};
use crate::models::{NewScenario, NewVehicle, RecordId, Scenario, Vehicle};
use crate::store::DataStore;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Records {
    scenarios: Vec<Scenario>,
    vehicles: Vec<Vehicle>,
    next_id: u64,
}

impl Records {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::from(self.next_id)
    }
}

/// In-process `DataStore` with the same semantics as the hosted JSON store:
/// sequential ids, whole-record replacement on update, 404 on unknown ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. New ids continue after the highest numeric id seeded.
    pub fn with_records(scenarios: Vec<Scenario>, vehicles: Vec<Vehicle>) -> Self {
        let next_id = scenarios
            .iter()
            .map(|s| &s.id)
            .chain(vehicles.iter().map(|v| &v.id))
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            records: Mutex::new(Records {
                scenarios,
                vehicles,
                next_id,
            }),
        }
    }

    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_scenarios(&self) -> Result<Vec<Scenario>> {
        Ok(self.records().scenarios.clone())
    }

    async fn create_scenario(&self, scenario: &NewScenario) -> Result<Scenario> {
        let mut records = self.records();
        let created = scenario.clone().with_id(records.allocate_id());
        records.scenarios.push(created.clone());
        Ok(created)
    }

    async fn update_scenario(&self, scenario: &Scenario) -> Result<Scenario> {
        let mut records = self.records();
        let slot = records
            .scenarios
            .iter_mut()
            .find(|s| s.id == scenario.id)
            .ok_or_else(|| DashboardError::scenario_not_found(&scenario.id))?;
        *slot = scenario.clone();
        Ok(scenario.clone())
    }

    async fn delete_scenario(&self, id: &RecordId) -> Result<()> {
        let mut records = self.records();
        let index = records
            .scenarios
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| DashboardError::scenario_not_found(id))?;
        records.scenarios.remove(index);
        Ok(())
    }

    async fn list_vehicles(&self, scenario_id: Option<&RecordId>) -> Result<Vec<Vehicle>> {
        let records = self.records();
        Ok(records
            .vehicles
            .iter()
            .filter(|v| scenario_id.map_or(true, |id| &v.scenario_id == id))
            .cloned()
            .collect())
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle> {
        let mut records = self.records();
        let created = vehicle.clone().with_id(records.allocate_id());
        records.vehicles.push(created.clone());
        Ok(created)
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let mut records = self.records();
        let slot = records
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(|| DashboardError::vehicle_not_found(&vehicle.id))?;
        *slot = vehicle.clone();
        Ok(vehicle.clone())
    }

    async fn delete_vehicle(&self, id: &RecordId) -> Result<()> {
        let mut records = self.records();
        let index = records
            .vehicles
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| DashboardError::vehicle_not_found(id))?;
        records.vehicles.remove(index);
        Ok(())
    }
}
