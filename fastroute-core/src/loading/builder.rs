use hashbrown::HashSet;
use log::{info, warn};

use super::config::ScenarioConfig;
use crate::model::{
    GasStations, Graph, TrafficCondition, Vehicle, WeatherCondition, fleet::index_stations,
};
use crate::routing::{
    DEFAULT_MAX_DEPTH, PlannerOptions, RouteAlgorithm, RouteOptimizer, SearchContext,
};
use crate::{Error, Hour, NodeId};

/// Loaded scenario: the graph plus the query inputs that go with it
#[derive(Debug, Clone)]
pub struct Scenario {
    graph: Graph,
    vehicle: Vehicle,
    traffic: TrafficCondition,
    weather: WeatherCondition,
    gas_stations: GasStations,
    current_time: Hour,
    start: NodeId,
    end: NodeId,
    options: PlannerOptions,
}

impl Scenario {
    pub fn graph(&self) -> &Graph {
        &self.graph
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

    pub fn gas_stations(&self) -> &GasStations {
        &self.gas_stations
    }

    pub fn current_time(&self) -> Hour {
        self.current_time
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Search inputs for the configured start and end
    pub fn context(&self) -> Result<SearchContext<'_>, Error> {
        self.context_between(self.start, self.end)
    }

    /// Search inputs for another pair of nodes under the same conditions
    pub fn context_between(&self, start: NodeId, end: NodeId) -> Result<SearchContext<'_>, Error> {
        Ok(SearchContext::new(&self.graph, start, end, self.vehicle.clone())?
            .with_traffic(self.traffic.clone())
            .with_weather(self.weather.clone())
            .at_time(self.current_time))
    }

    pub fn planner_options(&self) -> PlannerOptions {
        self.options.clone()
    }

    pub fn optimizer(&self, kind: RouteAlgorithm) -> Result<RouteOptimizer<'_>, Error> {
        RouteOptimizer::for_algorithm(kind, self.context()?, self.planner_options())
    }
}

/// Builds a scenario from its configuration
///
/// # Errors
///
/// Returns an error if the configuration is inconsistent: no nodes, duplicate
/// node ids, non-finite distances, an unusable vehicle or unknown endpoints
pub fn create_scenario(config: &ScenarioConfig) -> Result<Scenario, Error> {
    validate_config(config)?;

    info!("Building road graph from {} nodes", config.nodes.len());
    let mut graph = Graph::new();
    for node in &config.nodes {
        graph.add_node(node.clone());
    }

    let mut ignored = 0;
    for edge in &config.edges {
        if !graph.add_edge(edge.from, edge.to, edge.distance) {
            warn!(
                "Ignoring edge {} -> {}: unknown endpoint or obstacle target",
                edge.from, edge.to
            );
            ignored += 1;
        }
    }
    info!(
        "Road graph ready: {} nodes, {} edges ({ignored} ignored)",
        graph.node_count(),
        graph.edge_count()
    );

    let vehicle = config.vehicle.resolve()?;
    info!("Vehicle: {}", vehicle.vehicle_type());

    let gas_stations = index_stations(config.gas_stations.iter().filter_map(|station| {
        if graph.contains(station.node_id()) {
            Some(station.clone())
        } else {
            warn!("Ignoring gas station at unknown node {}", station.node_id());
            None
        }
    }));
    info!("{} gas stations available", gas_stations.len());

    for &endpoint in &[config.start, config.end] {
        if !graph.contains(endpoint) {
            return Err(Error::InvalidNode(endpoint));
        }
    }

    let options = PlannerOptions {
        gas_stations: Some(gas_stations.clone()),
        max_depth: config.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        speeds: config.speed_profile,
        heuristic: config.heuristic,
    };

    info!("Scenario created successfully");
    Ok(Scenario {
        graph,
        vehicle,
        traffic: config.traffic.clone(),
        weather: config.weather.clone(),
        gas_stations,
        current_time: config.current_time,
        start: config.start,
        end: config.end,
        options,
    })
}

fn validate_config(config: &ScenarioConfig) -> Result<(), Error> {
    if config.nodes.is_empty() {
        return Err(Error::InvalidConfiguration(
            "scenario has no nodes".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(config.nodes.len());
    for node in &config.nodes {
        if !seen.insert(node.id()) {
            return Err(Error::InvalidConfiguration(format!(
                "duplicate node id {}",
                node.id()
            )));
        }
        if node.open_time() > node.close_time() {
            warn!(
                "Node {} opens at {} but closes at {}; it is never open",
                node.id(),
                node.open_time(),
                node.close_time()
            );
        }
    }

    if let Some(edge) = config.edges.iter().find(|edge| !edge.distance.is_finite()) {
        return Err(Error::InvalidConfiguration(format!(
            "edge {} -> {} has a non-finite distance",
            edge.from, edge.to
        )));
    }

    if !(0..=24).contains(&config.current_time) {
        warn!("Current time {} is outside 0..=24", config.current_time);
    }

    config.speed_profile.validate()?;
    config.heuristic.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{EdgeConfig, VehicleConfig};
    use crate::model::{GasStation, Node, RoadType};

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            nodes: (1..=4).map(|id| Node::new(id, RoadType::RegularRoad)).collect(),
            edges: [(1, 2, 10.0), (1, 3, 15.0), (2, 4, 10.0), (3, 4, 5.0), (2, 3, 2.0)]
                .into_iter()
                .map(|(from, to, distance)| EdgeConfig { from, to, distance })
                .collect(),
            vehicle: VehicleConfig::default(),
            traffic: TrafficCondition::default(),
            weather: WeatherCondition::default(),
            gas_stations: vec![GasStation::new(2, 1.4)],
            current_time: 8,
            start: 1,
            end: 4,
            max_depth: None,
            speed_profile: Default::default(),
            heuristic: Default::default(),
        }
    }

    #[test]
    fn builds_graph_and_context() {
        let scenario = create_scenario(&config()).unwrap();
        assert_eq!(scenario.graph().node_count(), 4);
        assert_eq!(scenario.graph().edge_count(), 5);
        assert_eq!(scenario.gas_stations().len(), 1);
        assert_eq!(scenario.planner_options().max_depth, DEFAULT_MAX_DEPTH);

        let context = scenario.context().unwrap();
        assert_eq!(context.start().id(), 1);
        assert_eq!(context.current_time(), 8);

        let route = scenario
            .optimizer(RouteAlgorithm::Dijkstra)
            .unwrap()
            .optimize_route()
            .unwrap();
        assert_eq!(route.node_ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn ignores_dangling_edges_and_stations() {
        let mut config = config();
        config.nodes.push(Node::new(5, RoadType::RegularRoad).obstacle(true));
        config.edges.push(EdgeConfig { from: 1, to: 99, distance: 1.0 });
        config.edges.push(EdgeConfig { from: 1, to: 5, distance: 1.0 });
        config.gas_stations.push(GasStation::new(42, 1.0));

        let scenario = create_scenario(&config).unwrap();
        assert_eq!(scenario.graph().edge_count(), 5);
        assert_eq!(scenario.gas_stations().len(), 1);
    }

    #[test]
    fn rejects_broken_configs() {
        let mut empty = config();
        empty.nodes.clear();
        assert!(matches!(create_scenario(&empty), Err(Error::InvalidConfiguration(_))));

        let mut duplicate = config();
        duplicate.nodes.push(Node::new(2, RoadType::Highway));
        assert!(matches!(create_scenario(&duplicate), Err(Error::InvalidConfiguration(_))));

        let mut nan = config();
        nan.edges.push(EdgeConfig { from: 1, to: 2, distance: f64::NAN });
        assert!(matches!(create_scenario(&nan), Err(Error::InvalidConfiguration(_))));

        let mut unknown_end = config();
        unknown_end.end = 77;
        assert!(matches!(create_scenario(&unknown_end), Err(Error::InvalidNode(77))));

        let mut bad_vehicle = config();
        bad_vehicle.vehicle = VehicleConfig::Preset("spaceship".into());
        assert!(create_scenario(&bad_vehicle).is_err());

        let mut reversing = config();
        reversing.speed_profile.regular_road = -50.0;
        assert!(matches!(create_scenario(&reversing), Err(Error::InvalidConfiguration(_))));

        let mut standstill = config();
        standstill.speed_profile.highway = 0.0;
        assert!(matches!(create_scenario(&standstill), Err(Error::InvalidConfiguration(_))));

        let mut bad_heuristic = config();
        bad_heuristic.heuristic.high_risk_factor = f64::NAN;
        assert!(matches!(create_scenario(&bad_heuristic), Err(Error::InvalidConfiguration(_))));
    }
}
