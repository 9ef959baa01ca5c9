use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use super::astar::{AStar, HeuristicWeights};
use super::bellman_ford::BellmanFord;
use super::common::{PathResult, SearchAlgorithm, SearchContext};
use super::dijkstra::Dijkstra;
use super::floyd_warshall::FloydWarshallRoute;
use super::iterative_deepening::IterativeDeepeningSearch;
use super::shortest_time::{ShortestTimeFirst, SpeedProfile};
use crate::Error;
use crate::model::GasStations;

/// Depth limit used when none is configured
pub const DEFAULT_MAX_DEPTH: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RouteAlgorithm {
    Dijkstra,
    AStar,
    BellmanFord,
    FloydWarshall,
    IterativeDeepening,
    ShortestTimeFirst,
}

impl RouteAlgorithm {
    pub const ALL: [RouteAlgorithm; 6] = [
        RouteAlgorithm::Dijkstra,
        RouteAlgorithm::AStar,
        RouteAlgorithm::BellmanFord,
        RouteAlgorithm::FloydWarshall,
        RouteAlgorithm::IterativeDeepening,
        RouteAlgorithm::ShortestTimeFirst,
    ];

    /// Name accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "astar",
            RouteAlgorithm::BellmanFord => "bellman-ford",
            RouteAlgorithm::FloydWarshall => "floyd-warshall",
            RouteAlgorithm::IterativeDeepening => "iterative-deepening",
            RouteAlgorithm::ShortestTimeFirst => "shortest-time",
        }
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "bellmanford" => Ok(RouteAlgorithm::BellmanFord),
            "floydwarshall" => Ok(RouteAlgorithm::FloydWarshall),
            "iterativedeepening" | "ids" => Ok(RouteAlgorithm::IterativeDeepening),
            "shortesttime" | "shortesttimefirst" | "stf" => Ok(RouteAlgorithm::ShortestTimeFirst),
            _ => Err(Error::InvalidConfiguration(format!(
                "unknown algorithm '{value}'"
            ))),
        }
    }
}

impl TryFrom<String> for RouteAlgorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RouteAlgorithm> for String {
    fn from(value: RouteAlgorithm) -> Self {
        value.as_str().to_string()
    }
}

/// Planner specific inputs not carried by [`SearchContext`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOptions {
    pub gas_stations: Option<GasStations>,
    pub max_depth: i32,
    pub speeds: SpeedProfile,
    pub heuristic: HeuristicWeights,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            gas_stations: None,
            max_depth: DEFAULT_MAX_DEPTH,
            speeds: SpeedProfile::default(),
            heuristic: HeuristicWeights::default(),
        }
    }
}

/// Facade over one planner
pub struct RouteOptimizer<'g> {
    algorithm: Box<dyn SearchAlgorithm<'g> + 'g>,
}

impl<'g> RouteOptimizer<'g> {
    pub fn new(algorithm: impl SearchAlgorithm<'g> + 'g) -> Self {
        Self {
            algorithm: Box::new(algorithm),
        }
    }

    /// Builds the planner named by `kind` for `context`.
    ///
    /// Fails when the speed profile or heuristic weights the planner uses
    /// are out of range.
    pub fn for_algorithm(
        kind: RouteAlgorithm,
        context: SearchContext<'g>,
        options: PlannerOptions,
    ) -> Result<Self, Error> {
        let optimizer = match kind {
            RouteAlgorithm::Dijkstra => Self::new(Dijkstra::new(context, options.gas_stations)),
            RouteAlgorithm::AStar => Self::new(AStar::with_weights(context, options.heuristic)?),
            RouteAlgorithm::BellmanFord => Self::new(BellmanFord::new(context)),
            RouteAlgorithm::FloydWarshall => Self::new(FloydWarshallRoute::new(&context)),
            RouteAlgorithm::IterativeDeepening => {
                Self::new(IterativeDeepeningSearch::new(context, options.max_depth))
            }
            RouteAlgorithm::ShortestTimeFirst => {
                Self::new(ShortestTimeFirst::with_speeds(context, options.speeds)?)
            }
        };
        Ok(optimizer)
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn optimize_route(&self) -> Option<PathResult<'g>> {
        let result = self.algorithm.find_path();
        match &result {
            Some(route) => info!("{}: route {route}", self.algorithm_name()),
            None => info!("{}: no route", self.algorithm_name()),
        }
        result
    }
}
