//! Road network components - nodes, road categories and edge views

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Hour, NodeId};

/// Road category of a node.
///
/// Categories are free-form in scenario files; the three known ones drive the
/// A* heuristic and the travel-speed model, anything else is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoadType {
    Highway,
    TollRoad,
    #[default]
    RegularRoad,
    Other(String),
}

impl RoadType {
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "highway" => RoadType::Highway,
            "tollroad" => RoadType::TollRoad,
            "regularroad" => RoadType::RegularRoad,
            _ => RoadType::Other(value.to_string()),
        }
    }

    pub fn is_highway(&self) -> bool {
        matches!(self, RoadType::Highway)
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoadType::Highway => f.write_str("Highway"),
            RoadType::TollRoad => f.write_str("Toll Road"),
            RoadType::RegularRoad => f.write_str("Regular Road"),
            RoadType::Other(name) => f.write_str(name),
        }
    }
}

impl From<String> for RoadType {
    fn from(value: String) -> Self {
        RoadType::parse(&value)
    }
}

impl From<&str> for RoadType {
    fn from(value: &str) -> Self {
        RoadType::parse(value)
    }
}

impl From<RoadType> for String {
    fn from(value: RoadType) -> Self {
        value.to_string()
    }
}

fn default_cost_per_km() -> f64 {
    1.0
}

fn default_close_time() -> Hour {
    24
}

/// Road graph node with its static traversal attributes.
///
/// Attributes are fixed once the node is built; the adjacency list lives in
/// the [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    #[serde(default, rename = "obstacle")]
    is_obstacle: bool,
    #[serde(default)]
    road_type: RoadType,
    #[serde(default)]
    toll_road: bool,
    #[serde(default)]
    restricted_for_heavy_vehicles: bool,
    #[serde(default)]
    high_risk_area: bool,
    #[serde(default = "default_cost_per_km")]
    cost_per_km: f64,
    #[serde(default)]
    open_time: Hour,
    #[serde(default = "default_close_time")]
    close_time: Hour,
}

impl Node {
    /// Open, unrestricted node of the given category
    pub fn new(id: NodeId, road_type: impl Into<RoadType>) -> Self {
        Self {
            id,
            is_obstacle: false,
            road_type: road_type.into(),
            toll_road: false,
            restricted_for_heavy_vehicles: false,
            high_risk_area: false,
            cost_per_km: default_cost_per_km(),
            open_time: 0,
            close_time: default_close_time(),
        }
    }

    #[must_use]
    pub fn obstacle(mut self, is_obstacle: bool) -> Self {
        self.is_obstacle = is_obstacle;
        self
    }

    #[must_use]
    pub fn toll_road(mut self, toll_road: bool) -> Self {
        self.toll_road = toll_road;
        self
    }

    #[must_use]
    pub fn restricted_for_heavy_vehicles(mut self, restricted: bool) -> Self {
        self.restricted_for_heavy_vehicles = restricted;
        self
    }

    #[must_use]
    pub fn high_risk_area(mut self, high_risk: bool) -> Self {
        self.high_risk_area = high_risk;
        self
    }

    #[must_use]
    pub fn with_cost_per_km(mut self, cost_per_km: f64) -> Self {
        self.cost_per_km = cost_per_km;
        self
    }

    /// Opening window in hours, both ends inclusive
    #[must_use]
    pub fn open_between(mut self, open_time: Hour, close_time: Hour) -> Self {
        self.open_time = open_time;
        self.close_time = close_time;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_obstacle(&self) -> bool {
        self.is_obstacle
    }

    pub fn road_type(&self) -> &RoadType {
        &self.road_type
    }

    pub fn is_toll_road(&self) -> bool {
        self.toll_road
    }

    pub fn is_restricted_for_heavy_vehicles(&self) -> bool {
        self.restricted_for_heavy_vehicles
    }

    pub fn is_high_risk_area(&self) -> bool {
        self.high_risk_area
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }

    pub fn open_time(&self) -> Hour {
        self.open_time
    }

    pub fn close_time(&self) -> Hour {
        self.close_time
    }

    pub fn is_open_at(&self, current_time: Hour) -> bool {
        current_time >= self.open_time && current_time <= self.close_time
    }

    /// Neighbor-admission rule: nothing may link into an obstacle
    pub fn admits_neighbor(&self, neighbor: &Node) -> bool {
        !neighbor.is_obstacle
    }
}

/// Borrowed view of one outgoing road segment
#[derive(Debug, Clone, Copy)]
pub struct Edge<'g> {
    neighbor: &'g Node,
    distance: f64,
}

impl<'g> Edge<'g> {
    pub(crate) fn new(neighbor: &'g Node, distance: f64) -> Self {
        Self { neighbor, distance }
    }

    pub fn neighbor(&self) -> &'g Node {
        self.neighbor
    }

    /// Raw, unweighted segment length in km
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_type_parses_known_categories() {
        assert_eq!(RoadType::parse("Highway"), RoadType::Highway);
        assert_eq!(RoadType::parse("Toll Road"), RoadType::TollRoad);
        assert_eq!(RoadType::parse("toll_road"), RoadType::TollRoad);
        assert_eq!(RoadType::parse("Regular Road"), RoadType::RegularRoad);
        assert_eq!(
            RoadType::parse("Mountain Pass"),
            RoadType::Other("Mountain Pass".to_string())
        );
        assert_eq!(RoadType::TollRoad.to_string(), "Toll Road");
    }

    #[test]
    fn opening_window_is_inclusive() {
        let node = Node::new(1, "Regular Road").open_between(8, 18);
        assert!(!node.is_open_at(7));
        assert!(node.is_open_at(8));
        assert!(node.is_open_at(18));
        assert!(!node.is_open_at(19));
    }

    #[test]
    fn obstacles_are_never_admitted() {
        let node = Node::new(1, RoadType::RegularRoad);
        let wall = Node::new(2, RoadType::RegularRoad).obstacle(true);
        assert!(!node.admits_neighbor(&wall));
        assert!(node.admits_neighbor(&Node::new(3, RoadType::Highway)));
    }

    #[test]
    fn node_deserializes_with_defaults() {
        let node: Node =
            serde_json::from_str(r#"{"id": 7, "road_type": "Highway", "high_risk_area": true}"#)
                .unwrap();
        assert_eq!(node.id(), 7);
        assert!(node.road_type().is_highway());
        assert!(node.is_high_risk_area());
        assert!(!node.is_obstacle());
        assert_eq!(node.open_time(), 0);
        assert_eq!(node.close_time(), 24);
        assert!((node.cost_per_km() - 1.0).abs() < f64::EPSILON);
    }
}
