// models/mod.rs
pub mod scenario;
pub mod vehicle;

pub use scenario::{NewScenario, Scenario, ScenarioSummary};
pub use vehicle::{Direction, NewVehicle, Vehicle};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Server-assigned identifier.
///
/// The hosted store hands out numeric ids for some records and string ids for
/// others, so both are accepted and kept in their textual form. Surrounding
/// whitespace is never part of an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.trim() {
            trimmed if trimmed.len() == id.len() => RecordId(id),
            trimmed => RecordId(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::new(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId::new(text),
            Raw::Number(number) => RecordId(number.to_string()),
        })
    }
}

/// A numeric field as the store may hold it: a number, text typed into a
/// form, or `null` when the browser sent `NaN`. Anything that does not read
/// as a finite number counts as 0.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    Missing,
}

impl LooseNumber {
    fn into_f64(self) -> f64 {
        let value = match self {
            LooseNumber::Number(n) => n,
            LooseNumber::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
            LooseNumber::Missing => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

pub(crate) fn deserialize_loose_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<f64, D::Error> {
    Ok(LooseNumber::deserialize(deserializer)?.into_f64())
}

/// Seconds are never negative; fractions are kept.
pub(crate) fn deserialize_loose_seconds<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<f64, D::Error> {
    Ok(LooseNumber::deserialize(deserializer)?.into_f64().max(0.0))
}

/// Whole seconds go out as integers so records keep the shape the forms write.
pub(crate) fn serialize_seconds<S: Serializer>(
    seconds: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if seconds.fract() == 0.0 && *seconds >= 0.0 && *seconds <= u64::MAX as f64 {
        serializer.serialize_u64(*seconds as u64)
    } else {
        serializer.serialize_f64(*seconds)
    }
}
