// Route planners sharing one search contract

pub mod astar;
pub mod bellman_ford;
pub mod common;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod iterative_deepening;
pub mod optimizer;
pub mod shortest_time;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main interfaces
pub use astar::{AStar, HeuristicWeights};
pub use bellman_ford::BellmanFord;
pub use common::{
    PathResult, RefuelStop, SearchAlgorithm, SearchContext, SearchError, effective_cost,
    is_traversable,
};
pub use dijkstra::Dijkstra;
pub use floyd_warshall::{FloydWarshall, FloydWarshallRoute};
pub use iterative_deepening::IterativeDeepeningSearch;
pub use optimizer::{DEFAULT_MAX_DEPTH, PlannerOptions, RouteAlgorithm, RouteOptimizer};
pub use shortest_time::{ShortestTimeFirst, SpeedProfile};
