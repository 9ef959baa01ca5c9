use log::trace;
use petgraph::graph::NodeIndex;

use super::weights::{effective_cost, is_traversable};
use crate::model::{Graph, Node, TrafficCondition, Vehicle, WeatherCondition};
use crate::{Error, Hour, NodeId};

/// Inputs of a single route query.
///
/// The graph is borrowed and shared; vehicle and conditions are snapshots
/// owned by the query, so several searches can run over one graph.
#[derive(Debug, Clone)]
pub struct SearchContext<'g> {
    graph: &'g Graph,
    start: NodeIndex,
    end: NodeIndex,
    vehicle: Vehicle,
    traffic: TrafficCondition,
    weather: WeatherCondition,
    current_time: Hour,
}

impl<'g> SearchContext<'g> {
    /// Fails with [`Error::InvalidNode`] when an endpoint is not in `graph`
    /// and with [`Error::InvalidConfiguration`] when the vehicle is malformed.
    pub fn new(graph: &'g Graph, start: NodeId, end: NodeId, vehicle: Vehicle) -> Result<Self, Error> {
        let start = graph.index_of(start).ok_or(Error::InvalidNode(start))?;
        let end = graph.index_of(end).ok_or(Error::InvalidNode(end))?;
        vehicle.validate()?;

        Ok(Self {
            graph,
            start,
            end,
            vehicle,
            traffic: TrafficCondition::default(),
            weather: WeatherCondition::default(),
            current_time: 0,
        })
    }

    #[must_use]
    pub fn with_traffic(mut self, traffic: TrafficCondition) -> Self {
        self.traffic = traffic;
        self
    }

    #[must_use]
    pub fn with_weather(mut self, weather: WeatherCondition) -> Self {
        self.weather = weather;
        self
    }

    #[must_use]
    pub fn at_time(mut self, current_time: Hour) -> Self {
        self.current_time = current_time;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn start(&self) -> &'g Node {
        self.graph.node_at(self.start)
    }

    pub fn end(&self) -> &'g Node {
        self.graph.node_at(self.end)
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn traffic(&self) -> &TrafficCondition {
        &self.traffic
    }

    pub fn weather(&self) -> &WeatherCondition {
        &self.weather
    }

    pub fn current_time(&self) -> Hour {
        self.current_time
    }

    pub(crate) fn start_index(&self) -> NodeIndex {
        self.start
    }

    pub(crate) fn end_index(&self) -> NodeIndex {
        self.end
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &'g Node {
        self.graph.node_at(idx)
    }

    /// Effective cost of stepping onto `to` over an edge of `distance`, or
    /// `None` when the node is not eligible or the edge is blocked
    pub(crate) fn step_cost(&self, to: NodeIndex, distance: f64) -> Option<f64> {
        let node = self.graph.node_at(to);
        if !is_traversable(node, &self.vehicle, self.current_time) {
            trace!("Node {} is not eligible at hour {}", node.id(), self.current_time);
            return None;
        }
        effective_cost(distance, node, &self.traffic, &self.weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoadType, TrafficStatus};

    fn graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new(1, RoadType::RegularRoad));
        graph.add_node(Node::new(2, RoadType::RegularRoad).high_risk_area(true));
        graph.add_node(Node::new(3, RoadType::Highway));
        graph.add_edge(1, 2, 4.0);
        graph.add_edge(1, 3, 5.0);
        graph
    }

    #[test]
    fn rejects_unknown_endpoints() {
        let graph = graph();
        let err = SearchContext::new(&graph, 1, 42, Vehicle::standard()).unwrap_err();
        assert!(matches!(err, Error::InvalidNode(42)));
    }

    #[test]
    fn rejects_invalid_vehicle() {
        let graph = graph();
        let vehicle = Vehicle::new("Broken", 1.0, false, 10.0, -5.0, 1.0, 0.0, false);
        let err = SearchContext::new(&graph, 1, 3, vehicle).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn step_cost_applies_eligibility_and_conditions() {
        let graph = graph();
        let traffic: TrafficCondition = [(3, TrafficStatus::Accident)].into_iter().collect();
        let context = SearchContext::new(&graph, 1, 3, Vehicle::standard())
            .unwrap()
            .with_traffic(traffic)
            .at_time(9);

        let risky = graph.index_of(2).unwrap();
        let highway = graph.index_of(3).unwrap();
        assert_eq!(context.step_cost(risky, 4.0), None);
        assert_eq!(context.step_cost(highway, 5.0), Some(15.0));
        assert_eq!(context.start().id(), 1);
        assert_eq!(context.end().id(), 3);
        assert_eq!(context.current_time(), 9);
    }
}
