//! Constrained route planning over an in-memory road graph.
//!
//! The graph carries per-node constraints (obstacles, tolls, risk, opening
//! hours) and is searched by six interchangeable planners that share one
//! eligibility predicate and one edge-weight pipeline.

pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

mod error;

pub use error::Error;

pub use loading::{Scenario, ScenarioConfig, create_scenario};
pub use model::{
    Edge, GasStation, GasStations, Graph, Node, RoadType, TrafficCondition, TrafficStatus,
    Vehicle, WeatherCondition, WeatherStatus,
};
pub use routing::{
    AStar, BellmanFord, Dijkstra, FloydWarshall, FloydWarshallRoute, HeuristicWeights,
    IterativeDeepeningSearch, PathResult, PlannerOptions, RefuelStop, RouteAlgorithm,
    RouteOptimizer, SearchAlgorithm, SearchContext, SearchError, ShortestTimeFirst, SpeedProfile,
};

/// Node identifier as used in scenario files and traffic maps
pub type NodeId = i32;
/// Hour of day used for opening windows (`0..=24` in practice)
pub type Hour = i32;
