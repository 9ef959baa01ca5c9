use log::{debug, warn};
use petgraph::graph::NodeIndex;

use super::common::{
    PathResult, Predecessor, SearchAlgorithm, SearchContext, SearchError, format_ids, trace_back,
};

/// Bellman-Ford over the effective cost. The only planner that accepts
/// negative edge weights; a negative cycle reachable from the start makes
/// every query fail.
pub struct BellmanFord<'g> {
    context: SearchContext<'g>,
}

impl<'g> BellmanFord<'g> {
    pub fn new(context: SearchContext<'g>) -> Self {
        Self { context }
    }

    /// Like [`SearchAlgorithm::find_path`] but tells a negative cycle apart
    /// from an unreachable end
    pub fn try_find_path(&self) -> Result<PathResult<'g>, SearchError> {
        let ctx = &self.context;
        let (start, end) = (ctx.start_index(), ctx.end_index());
        if start == end {
            return Ok(PathResult::single(ctx.start()));
        }

        let node_count = ctx.graph().node_count();

        // Eligible edges with their effective cost, computed once
        let edges: Vec<(NodeIndex, NodeIndex, f64, f64)> = ctx
            .graph()
            .all_edges()
            .filter_map(|(from, to, distance)| {
                ctx.step_cost(to, distance).map(|cost| (from, to, distance, cost))
            })
            .collect();

        let mut costs = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Predecessor> = vec![None; node_count];
        costs[start.index()] = 0.0;

        for round in 1..node_count {
            let mut relaxed = false;
            for &(from, to, distance, cost) in &edges {
                let candidate = costs[from.index()] + cost;
                if costs[from.index()].is_finite() && candidate < costs[to.index()] {
                    costs[to.index()] = candidate;
                    predecessors[to.index()] = Some((from, distance));
                    relaxed = true;
                }
            }
            if !relaxed {
                debug!("Bellman-Ford: converged after {round} rounds");
                break;
            }
        }

        let has_cycle = edges.iter().any(|&(from, to, _, cost)| {
            costs[from.index()].is_finite() && costs[from.index()] + cost < costs[to.index()]
        });
        if has_cycle {
            warn!(
                "Bellman-Ford: negative cycle reachable from node {}",
                ctx.start().id()
            );
            return Err(SearchError::NegativeCycleDetected);
        }

        if !costs[end.index()].is_finite() {
            return Err(SearchError::NoPathFound);
        }

        let (route, distance) =
            trace_back(&predecessors, start, end).ok_or(SearchError::NoPathFound)?;
        let path: Vec<_> = route.into_iter().map(|idx| ctx.node(idx)).collect();
        debug!(
            "Bellman-Ford: {} -> {} via {} (cost {:.2})",
            ctx.start().id(),
            ctx.end().id(),
            format_ids(&path),
            costs[end.index()]
        );
        Ok(PathResult::new(path, costs[end.index()], distance))
    }
}

impl<'g> SearchAlgorithm<'g> for BellmanFord<'g> {
    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        self.try_find_path().ok()
    }
}
