use crate::models::{deserialize_loose_seconds, serialize_seconds, RecordId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A named simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: RecordId,
    pub name: String,
    /// Duration of the run in seconds.
    #[serde(
        serialize_with = "serialize_seconds",
        deserialize_with = "deserialize_loose_seconds"
    )]
    pub time: f64,
}

impl Scenario {
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.time.max(0.0)).unwrap_or(Duration::ZERO)
    }
}

/// Body of `POST /scenarios`; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    pub time: u64,
}

impl NewScenario {
    pub fn with_id(self, id: RecordId) -> Scenario {
        Scenario {
            id,
            name: self.name,
            time: self.time as f64,
        }
    }
}

/// One row of the "all scenarios" table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub scenario: Scenario,
    pub vehicle_count: usize,
}
