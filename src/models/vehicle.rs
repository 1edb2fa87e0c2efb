use crate::models::{deserialize_loose_f64, RecordId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four fixed movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// +x
    Towards,
    /// -x
    Backwards,
    /// +y
    Upwards,
    /// -y
    Downwards,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Towards,
        Direction::Backwards,
        Direction::Upwards,
        Direction::Downwards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Towards => "towards",
            Direction::Backwards => "backwards",
            Direction::Upwards => "upwards",
            Direction::Downwards => "downwards",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| format!("unknown direction {s:?}"))
    }
}

/// A vehicle as stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: RecordId,
    pub scenario_id: RecordId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_loose_f64")]
    pub speed: f64,
    #[serde(deserialize_with = "deserialize_loose_f64")]
    pub position_x: f64,
    #[serde(deserialize_with = "deserialize_loose_f64")]
    pub position_y: f64,
    /// `None` when the record carries no recognised direction; such a vehicle stays put.
    #[serde(
        default,
        serialize_with = "serialize_direction",
        deserialize_with = "deserialize_direction"
    )]
    pub direction: Option<Direction>,
}

/// Body of `POST /vehicles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub scenario_id: RecordId,
    pub name: String,
    pub speed: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub direction: Direction,
}

impl NewVehicle {
    pub fn with_id(self, id: RecordId) -> Vehicle {
        Vehicle {
            id,
            scenario_id: self.scenario_id,
            name: self.name,
            speed: self.speed,
            position_x: self.position_x,
            position_y: self.position_y,
            direction: Some(self.direction),
        }
    }
}

fn serialize_direction<S: Serializer>(
    direction: &Option<Direction>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(direction.map(Direction::as_str).unwrap_or(""))
}

fn deserialize_direction<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Direction>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
