use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::global_variables::{QUERY_SCENARIO_ID, RESOURCE_SCENARIOS, RESOURCE_VEHICLES};
use crate::models::{NewScenario, NewVehicle, RecordId, Scenario, Vehicle};
use crate::store::DataStore;
use async_trait::async_trait;
use reqwest::{Client, Response};

/// `DataStore` backed by the hosted JSON API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn record_url(&self, resource: &str, id: &RecordId) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    async fn delete(&self, resource: &str, id: &RecordId, context: &str) -> Result<()> {
        let response = self.client.delete(self.record_url(resource, id)).send().await?;
        ensure_success(response, context)?;
        Ok(())
    }
}

fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("{} returned {}", response.url(), status);
        Err(DashboardError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        })
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn list_scenarios(&self) -> Result<Vec<Scenario>> {
        let response = self
            .client
            .get(self.collection_url(RESOURCE_SCENARIOS))
            .send()
            .await?;
        let response = ensure_success(response, "Failed to fetch scenarios")?;
        Ok(response.json().await?)
    }

    async fn create_scenario(&self, scenario: &NewScenario) -> Result<Scenario> {
        let response = self
            .client
            .post(self.collection_url(RESOURCE_SCENARIOS))
            .json(scenario)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to add scenario")?;
        Ok(response.json().await?)
    }

    async fn update_scenario(&self, scenario: &Scenario) -> Result<Scenario> {
        let response = self
            .client
            .put(self.record_url(RESOURCE_SCENARIOS, &scenario.id))
            .json(scenario)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to update scenario")?;
        Ok(response.json().await?)
    }

    async fn delete_scenario(&self, id: &RecordId) -> Result<()> {
        self.delete(RESOURCE_SCENARIOS, id, "Failed to delete scenario")
            .await
    }

    async fn list_vehicles(&self, scenario_id: Option<&RecordId>) -> Result<Vec<Vehicle>> {
        let mut request = self.client.get(self.collection_url(RESOURCE_VEHICLES));
        if let Some(id) = scenario_id {
            request = request.query(&[(QUERY_SCENARIO_ID, id.as_str())]);
        }
        let response = ensure_success(request.send().await?, "Failed to fetch vehicles")?;
        Ok(response.json().await?)
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle> {
        let response = self
            .client
            .post(self.collection_url(RESOURCE_VEHICLES))
            .json(vehicle)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to add vehicle")?;
        Ok(response.json().await?)
    }

    async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let response = self
            .client
            .put(self.record_url(RESOURCE_VEHICLES, &vehicle.id))
            .json(vehicle)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to update vehicle")?;
        Ok(response.json().await?)
    }

    async fn delete_vehicle(&self, id: &RecordId) -> Result<()> {
        self.delete(RESOURCE_VEHICLES, id, "Failed to delete vehicle")
            .await
    }
}
