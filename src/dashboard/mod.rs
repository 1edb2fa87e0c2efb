// dashboard/mod.rs
pub mod cli;

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::forms::{ScenarioForm, VehicleForm};
use crate::models::{RecordId, Scenario, ScenarioSummary, Vehicle};
use crate::simulation_engine::Simulation;
use crate::store::DataStore;
use futures::future::try_join_all;

/// What the home page shows: every scenario, the selected one and its vehicles.
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub scenarios: Vec<Scenario>,
    pub selected: Option<Scenario>,
    pub vehicles: Vec<Vehicle>,
}

/// How many records a bulk delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub vehicles: usize,
    pub scenarios: usize,
}

/// Page-level operations over a `DataStore`.
pub struct Dashboard<S> {
    store: S,
}

impl<S: DataStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn scenarios(&self) -> Result<Vec<Scenario>> {
        self.store.list_scenarios().await
    }

    pub async fn scenario(&self, id: &RecordId) -> Result<Scenario> {
        self.store
            .list_scenarios()
            .await?
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| DashboardError::scenario_not_found(id))
    }

    pub async fn vehicle(&self, id: &RecordId) -> Result<Vehicle> {
        self.store
            .list_vehicles(None)
            .await?
            .into_iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| DashboardError::vehicle_not_found(id))
    }

    /// Every scenario with its vehicle count. Counts are fetched concurrently.
    pub async fn scenario_summaries(&self) -> Result<Vec<ScenarioSummary>> {
        let scenarios = self.store.list_scenarios().await?;
        let counts = try_join_all(scenarios.iter().map(|s| async move {
            self.store
                .list_vehicles(Some(&s.id))
                .await
                .map(|vehicles| vehicles.len())
        }))
        .await
        .map_err(|e| {
            log::error!("Error fetching vehicles: {}", e);
            e
        })?;

        Ok(scenarios
            .into_iter()
            .zip(counts)
            .map(|(scenario, vehicle_count)| ScenarioSummary {
                scenario,
                vehicle_count,
            })
            .collect())
    }

    /// The home page with the first scenario selected by default.
    pub async fn home(&self) -> Result<HomeView> {
        let scenarios = self.store.list_scenarios().await?;
        let Some(selected) = scenarios.first().cloned() else {
            return Ok(HomeView::default());
        };
        let vehicles = self.store.list_vehicles(Some(&selected.id)).await?;
        Ok(HomeView {
            scenarios,
            selected: Some(selected),
            vehicles,
        })
    }

    /// Switches the home page to another scenario.
    pub async fn select_scenario(&self, id: &RecordId) -> Result<HomeView> {
        let scenarios = self.store.list_scenarios().await?;
        let selected = scenarios
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| DashboardError::scenario_not_found(id))?;
        let vehicles = self.store.list_vehicles(Some(id)).await?;
        Ok(HomeView {
            scenarios,
            selected: Some(selected),
            vehicles,
        })
    }

    /// Submits the form and resets it on success.
    pub async fn add_scenario(&self, form: &mut ScenarioForm) -> Result<Scenario> {
        let new = form.submit()?;
        match self.store.create_scenario(&new).await {
            Ok(created) => {
                log::info!("Scenario added successfully: {:?}", created);
                form.reset();
                Ok(created)
            }
            Err(e) => {
                log::error!("Error adding scenario: {}", e);
                Err(e)
            }
        }
    }

    pub async fn edit_scenario(&self, scenario: &Scenario) -> Result<Scenario> {
        let result = self.store.update_scenario(scenario).await;
        match &result {
            Ok(updated) => log::info!("Scenario {} updated successfully", updated.id),
            Err(e) => log::error!("Error updating scenario: {}", e),
        }
        result
    }

    /// Deletes the scenario and every vehicle in it. Vehicles go first,
    /// concurrently; the scenario is only deleted once all of them are gone.
    pub async fn delete_scenario(&self, id: &RecordId) -> Result<DeleteSummary> {
        log::info!("Deleting scenario with id {}", id);
        let result = async {
            let vehicles = self.store.list_vehicles(Some(id)).await?;
            try_join_all(vehicles.iter().map(|v| self.store.delete_vehicle(&v.id))).await?;
            self.store.delete_scenario(id).await?;
            Ok::<_, DashboardError>(DeleteSummary {
                vehicles: vehicles.len(),
                scenarios: 1,
            })
        }
        .await;

        match &result {
            Ok(summary) => log::info!(
                "Scenario {} and {} associated vehicles deleted successfully",
                id,
                summary.vehicles
            ),
            Err(e) => log::error!("Error deleting scenario {}: {}", id, e),
        }
        result
    }

    /// Deletes every vehicle, then every scenario.
    pub async fn delete_all(&self) -> Result<DeleteSummary> {
        log::info!("Deleting all scenarios");
        let result = async {
            let vehicles = self.store.list_vehicles(None).await?;
            try_join_all(vehicles.iter().map(|v| self.store.delete_vehicle(&v.id))).await?;
            let scenarios = self.store.list_scenarios().await?;
            try_join_all(scenarios.iter().map(|s| self.store.delete_scenario(&s.id))).await?;
            Ok::<_, DashboardError>(DeleteSummary {
                vehicles: vehicles.len(),
                scenarios: scenarios.len(),
            })
        }
        .await;

        match &result {
            Ok(summary) => log::info!(
                "All {} scenarios and {} vehicles deleted successfully",
                summary.scenarios,
                summary.vehicles
            ),
            Err(e) => log::error!("Error deleting all scenarios: {}", e),
        }
        result
    }

    /// Submits the form against an existing scenario and resets it on success.
    pub async fn add_vehicle(&self, form: &mut VehicleForm) -> Result<Vehicle> {
        let new = form.submit()?;
        self.scenario(&new.scenario_id).await?;
        match self.store.create_vehicle(&new).await {
            Ok(created) => {
                log::info!("Vehicle added successfully: {:?}", created);
                form.reset();
                Ok(created)
            }
            Err(e) => {
                log::error!("Error adding vehicle: {}", e);
                Err(e)
            }
        }
    }

    pub async fn edit_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let result = self.store.update_vehicle(vehicle).await;
        match &result {
            Ok(updated) => log::info!("Vehicle {} updated successfully", updated.id),
            Err(e) => log::error!("Error updating vehicle: {}", e),
        }
        result
    }

    pub async fn delete_vehicle(&self, id: &RecordId) -> Result<()> {
        log::info!("Deleting vehicle: {}", id);
        match self.store.delete_vehicle(id).await {
            Ok(()) => {
                log::info!("Vehicle deleted successfully");
                Ok(())
            }
            Err(e) => {
                log::error!("Error deleting vehicle: {}", e);
                Err(e)
            }
        }
    }

    /// Loads a scenario and its vehicles into a ready-to-run simulation.
    /// Without an id the first scenario is used, as on the home page.
    pub async fn prepare_simulation(
        &self,
        scenario_id: Option<&RecordId>,
        config: &Config,
    ) -> Result<Simulation> {
        let view = match scenario_id {
            Some(id) => self.select_scenario(id).await?,
            None => self.home().await?,
        };
        let scenario = view.selected.ok_or_else(|| {
            DashboardError::Validation("There are no scenarios to simulate".to_string())
        })?;
        Ok(Simulation::new(scenario, view.vehicles).with_tick_interval(config.tick_interval))
    }
}
