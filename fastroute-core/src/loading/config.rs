use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{GasStation, Node, TrafficCondition, Vehicle, WeatherCondition};
use crate::routing::{HeuristicWeights, SpeedProfile};
use crate::{Error, Hour, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
}

/// Either a preset name (`"standard"`, `"emergency"`, `"heavy"`) or a full
/// vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleConfig {
    Preset(String),
    Custom(Vehicle),
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig::Preset("standard".to_string())
    }
}

impl VehicleConfig {
    pub fn resolve(&self) -> Result<Vehicle, Error> {
        let vehicle = match self {
            VehicleConfig::Preset(name) => Vehicle::preset(name).ok_or_else(|| {
                Error::InvalidConfiguration(format!("unknown vehicle preset '{name}'"))
            })?,
            VehicleConfig::Custom(vehicle) => vehicle.clone(),
        };
        vehicle.validate()?;
        Ok(vehicle)
    }
}

/// Everything needed to answer one route query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeConfig>,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    /// Node id to traffic status; unlisted nodes are clear
    #[serde(default)]
    pub traffic: TrafficCondition,
    #[serde(default)]
    pub weather: WeatherCondition,
    #[serde(default)]
    pub gas_stations: Vec<GasStation>,
    #[serde(default)]
    pub current_time: Hour,
    pub start: NodeId,
    pub end: NodeId,
    /// Depth limit for iterative deepening
    #[serde(default)]
    pub max_depth: Option<i32>,
    #[serde(default)]
    pub speed_profile: SpeedProfile,
    #[serde(default)]
    pub heuristic: HeuristicWeights,
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a scenario file
    ///
    /// # Errors
    ///
    /// [`Error::IoError`] when the file cannot be read and
    /// [`Error::ParseError`] when it is not a valid scenario
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrafficStatus, WeatherStatus};

    #[test]
    fn parses_minimal_scenario() {
        let config = ScenarioConfig::from_json_str(
            r#"{
                "nodes": [{"id": 1}, {"id": 2, "road_type": "Highway"}],
                "edges": [{"from": 1, "to": 2, "distance": 4.5}],
                "start": 1,
                "end": 2
            }"#,
        )
        .unwrap();

        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.edges[0].distance, 4.5);
        assert_eq!(config.vehicle, VehicleConfig::default());
        assert_eq!(config.weather.status(), &WeatherStatus::Clear);
        assert_eq!(config.current_time, 0);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.speed_profile, SpeedProfile::default());
    }

    #[test]
    fn parses_conditions_and_custom_vehicle() {
        let config = ScenarioConfig::from_json_str(
            r#"{
                "nodes": [{"id": 1}, {"id": 2}],
                "vehicle": {
                    "vehicle_type": "Van",
                    "max_load": 1500,
                    "fuel_capacity": 70,
                    "current_fuel": 30,
                    "fuel_consumption_per_km": 0.7
                },
                "traffic": {"2": "Accident"},
                "weather": "Stormy",
                "gas_stations": [{"node_id": 1, "fuel_cost_per_litre": 1.9}],
                "current_time": 14,
                "start": 1,
                "end": 2,
                "max_depth": 4
            }"#,
        )
        .unwrap();

        let vehicle = config.vehicle.resolve().unwrap();
        assert_eq!(vehicle.vehicle_type(), "Van");
        assert_eq!(vehicle.min_fuel_at_end(), 0.0);
        assert_eq!(config.traffic.status(2), &TrafficStatus::Accident);
        assert_eq!(config.weather.status(), &WeatherStatus::Stormy);
        assert_eq!(config.gas_stations[0].node_id(), 1);
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn resolves_presets() {
        let heavy = VehicleConfig::Preset("Heavy".into()).resolve().unwrap();
        assert!(heavy.is_heavy());

        let err = VehicleConfig::Preset("tractor".into()).resolve().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn reports_parse_and_io_errors() {
        assert!(matches!(
            ScenarioConfig::from_json_str("{\"nodes\": []"),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            ScenarioConfig::from_path("/definitely/not/here.json"),
            Err(Error::IoError(_))
        ));
    }
}
