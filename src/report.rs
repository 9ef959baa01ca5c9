use fastroute_core::{NodeId, PathResult, RefuelStop, RouteAlgorithm};
use itertools::Itertools;
use serde::Serialize;

/// Serializable view of a planned route
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub algorithm: RouteAlgorithm,
    pub found: bool,
    pub path: Vec<NodeId>,
    pub cost: Option<f64>,
    pub distance: Option<f64>,
    pub refuel_stops: Vec<RefuelStop>,
}

impl RouteReport {
    pub fn new(algorithm: RouteAlgorithm, result: Option<&PathResult<'_>>) -> Self {
        Self {
            algorithm,
            found: result.is_some(),
            path: result.map(PathResult::node_ids).unwrap_or_default(),
            cost: result.map(PathResult::cost),
            distance: result.map(PathResult::distance),
            refuel_stops: result
                .map(|route| route.refuel_stops().to_vec())
                .unwrap_or_default(),
        }
    }
}

pub fn print_route(name: &str, result: &PathResult<'_>) {
    println!("{name}: {result}");
    println!("  cost:     {:.3}", result.cost());
    println!("  distance: {:.3} km", result.distance());
    for stop in result.refuel_stops() {
        println!(
            "  refuel:   {:.1} l at node {} after {:.1} km",
            stop.litres, stop.node_id, stop.distance_from_start
        );
    }
}

/// One aligned line per algorithm
pub fn comparison_table(rows: &[(&str, Option<PathResult<'_>>)]) -> String {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(name, result)| match result {
            Some(route) => format!(
                "{name:<width$}  cost {:>10.3}  [{}]",
                route.cost(),
                route.node_ids().iter().join(" -> ")
            ),
            None => format!("{name:<width$}  no route"),
        })
        .join("\n")
}
