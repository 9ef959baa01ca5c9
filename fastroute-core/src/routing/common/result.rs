use std::fmt;

use itertools::Itertools;
use log::warn;
use serde::Serialize;

use crate::NodeId;
use crate::model::{GasStations, Node, Vehicle};

/// Fill-up made on the way, recorded by fuel aware planners
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RefuelStop {
    pub node_id: NodeId,
    /// Raw kilometres driven before the stop
    pub distance_from_start: f64,
    pub litres: f64,
}

/// Route found by a planner: the nodes from start to end inclusive, the
/// effective cost the planner minimised and the raw length in kilometres.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult<'g> {
    path: Vec<&'g Node>,
    cost: f64,
    distance: f64,
    refuel_stops: Vec<RefuelStop>,
}

impl<'g> PathResult<'g> {
    pub fn new(path: Vec<&'g Node>, cost: f64, distance: f64) -> Self {
        Self {
            path,
            cost,
            distance,
            refuel_stops: Vec::new(),
        }
    }

    /// Route of a query whose start is its end
    pub fn single(node: &'g Node) -> Self {
        Self::new(vec![node], 0.0, 0.0)
    }

    #[must_use]
    pub(crate) fn with_refuel_stops(mut self, refuel_stops: Vec<RefuelStop>) -> Self {
        self.refuel_stops = refuel_stops;
        self
    }

    pub fn path(&self) -> &[&'g Node] {
        &self.path
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.path.iter().map(|node| node.id()).collect()
    }

    pub fn start(&self) -> Option<&'g Node> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<&'g Node> {
        self.path.last().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Sum of effective edge costs along the route
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sum of raw edge distances along the route
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn refuel_stops(&self) -> &[RefuelStop] {
        &self.refuel_stops
    }

    pub fn print_path(&self) {
        println!("{self}");
    }

    /// Drives `vehicle` along the route: burns fuel leg by leg and pays for
    /// every recorded stop at `stations`. Returns the total fuel bill.
    pub fn commit_fuel(&self, vehicle: &mut Vehicle, stations: &GasStations) -> f64 {
        let mut driven = 0.0;
        let mut bill = 0.0;

        for stop in &self.refuel_stops {
            vehicle.consume_fuel(stop.distance_from_start - driven);
            driven = stop.distance_from_start;
            match stations.get(&stop.node_id) {
                Some(station) => bill += station.refuel(vehicle, stop.litres),
                None => warn!("No gas station at node {}, skipping refuel", stop.node_id),
            }
        }

        vehicle.consume_fuel(self.distance - driven);
        bill
    }
}

impl fmt::Display for PathResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.path {
            write!(f, "{} -> ", node.id())?;
        }
        f.write_str("End")
    }
}

/// Compact form used in logs, e.g. `[1, 2, 4]`
pub(crate) fn format_ids(path: &[&Node]) -> String {
    format!("[{}]", path.iter().map(|node| node.id()).join(", "))
}
