use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Traffic status reported for a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrafficStatus {
    #[default]
    Clear,
    Congested,
    Closed,
    Accident,
    /// Unrecognised report, weighted like `Clear`
    Other(String),
}

impl TrafficStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => TrafficStatus::Clear,
            "congested" => TrafficStatus::Congested,
            "closed" => TrafficStatus::Closed,
            "accident" => TrafficStatus::Accident,
            _ => TrafficStatus::Other(value.to_string()),
        }
    }

    /// Weight multiplier; `Closed` maps to the infinite blocking sentinel
    pub fn multiplier(&self) -> f64 {
        match self {
            TrafficStatus::Clear | TrafficStatus::Other(_) => 1.0,
            TrafficStatus::Congested => 2.0,
            TrafficStatus::Accident => 3.0,
            TrafficStatus::Closed => f64::INFINITY,
        }
    }
}

impl fmt::Display for TrafficStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficStatus::Clear => f.write_str("Clear"),
            TrafficStatus::Congested => f.write_str("Congested"),
            TrafficStatus::Closed => f.write_str("Closed"),
            TrafficStatus::Accident => f.write_str("Accident"),
            TrafficStatus::Other(status) => f.write_str(status),
        }
    }
}

impl From<String> for TrafficStatus {
    fn from(value: String) -> Self {
        TrafficStatus::parse(&value)
    }
}

impl From<&str> for TrafficStatus {
    fn from(value: &str) -> Self {
        TrafficStatus::parse(value)
    }
}

impl From<TrafficStatus> for String {
    fn from(value: TrafficStatus) -> Self {
        value.to_string()
    }
}

/// Per-node traffic snapshot. Nodes without a report are `Clear`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrafficCondition {
    traffic_data: HashMap<NodeId, TrafficStatus>,
}

impl TrafficCondition {
    pub fn new(traffic_data: HashMap<NodeId, TrafficStatus>) -> Self {
        Self { traffic_data }
    }

    pub fn status(&self, node_id: NodeId) -> &TrafficStatus {
        static CLEAR: TrafficStatus = TrafficStatus::Clear;
        self.traffic_data.get(&node_id).unwrap_or(&CLEAR)
    }

    pub fn update_status(&mut self, node_id: NodeId, status: impl Into<TrafficStatus>) {
        self.traffic_data.insert(node_id, status.into());
    }

    /// Scales `weight` by the status of `node_id`.
    ///
    /// A closed node yields `f64::INFINITY`: the edge cannot be used, it is not
    /// merely expensive.
    pub fn adjust_weight(&self, weight: f64, node_id: NodeId) -> f64 {
        match self.status(node_id) {
            TrafficStatus::Closed => f64::INFINITY,
            status => weight * status.multiplier(),
        }
    }
}

impl FromIterator<(NodeId, TrafficStatus)> for TrafficCondition {
    fn from_iter<T: IntoIterator<Item = (NodeId, TrafficStatus)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
