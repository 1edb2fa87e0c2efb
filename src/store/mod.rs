// store/mod.rs
pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::error::Result;
use crate::models::{NewScenario, NewVehicle, RecordId, Scenario, Vehicle};
use async_trait::async_trait;

/// The remote collection of scenarios and vehicles.
///
/// Mirrors the conventional REST surface of a JSON store: one collection per
/// resource, records addressed by id, vehicles filterable by scenario.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_scenarios(&self) -> Result<Vec<Scenario>>;

    async fn create_scenario(&self, scenario: &NewScenario) -> Result<Scenario>;

    async fn update_scenario(&self, scenario: &Scenario) -> Result<Scenario>;

    async fn delete_scenario(&self, id: &RecordId) -> Result<()>;

    /// All vehicles, or only those of one scenario.
    async fn list_vehicles(&self, scenario_id: Option<&RecordId>) -> Result<Vec<Vehicle>>;

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle>;

    async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle>;

    async fn delete_vehicle(&self, id: &RecordId) -> Result<()>;
}
