use hashbrown::HashMap;
use log::info;
use serde::{Deserialize, Serialize};

use super::Vehicle;
use crate::NodeId;

/// Stations indexed by the node hosting them
pub type GasStations = HashMap<NodeId, GasStation>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasStation {
    node_id: NodeId,
    fuel_cost_per_litre: f64,
}

impl GasStation {
    pub fn new(node_id: NodeId, fuel_cost_per_litre: f64) -> Self {
        Self {
            node_id,
            fuel_cost_per_litre,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn fuel_cost_per_litre(&self) -> f64 {
        self.fuel_cost_per_litre
    }

    /// Pumps `litres` into `vehicle` and returns what was charged.
    ///
    /// The charge covers the requested amount even if the tank overflows.
    pub fn refuel(&self, vehicle: &mut Vehicle, litres: f64) -> f64 {
        vehicle.refuel(litres);
        let cost = litres * self.fuel_cost_per_litre;
        info!(
            "Refueled {litres:?} litres at node {} for {cost:?} cost.",
            self.node_id
        );
        cost
    }
}

/// Builds the station map from a list, keyed by node
pub fn index_stations(stations: impl IntoIterator<Item = GasStation>) -> GasStations {
    stations
        .into_iter()
        .map(|station| (station.node_id, station))
        .collect()
}
