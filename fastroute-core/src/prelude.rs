// Re-export key components
pub use crate::loading::{EdgeConfig, Scenario, ScenarioConfig, VehicleConfig, create_scenario};
pub use crate::model::{
    Edge, GasStation, GasStations, Graph, Node, RoadType, TrafficCondition, TrafficStatus,
    Vehicle, WeatherCondition, WeatherStatus,
};
pub use crate::routing::{
    AStar, BellmanFord, DEFAULT_MAX_DEPTH, Dijkstra, FloydWarshall, FloydWarshallRoute,
    HeuristicWeights, IterativeDeepeningSearch, PathResult, PlannerOptions, RefuelStop,
    RouteAlgorithm, RouteOptimizer, SearchAlgorithm, SearchContext, SearchError,
    ShortestTimeFirst, SpeedProfile, effective_cost, is_traversable,
};

// Core error type
pub use crate::Error;

// Core scalar types
pub use crate::Hour;
pub use crate::NodeId;
