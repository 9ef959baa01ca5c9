use fixedbitset::FixedBitSet;
use log::{debug, trace};
use petgraph::graph::NodeIndex;

use super::common::{PathResult, SearchAlgorithm, SearchContext, format_ids};

/// Node on the current depth-first branch
#[derive(Copy, Clone, Debug)]
struct Step {
    node: NodeIndex,
    cost: f64,
    distance: f64,
}

/// Depth-first search repeated with growing depth limits.
///
/// Depth counts edges. The first route found within the smallest limit is
/// returned, which is the route with the fewest edges rather than the
/// cheapest one. Revisiting a node on the current branch is not allowed.
pub struct IterativeDeepeningSearch<'g> {
    context: SearchContext<'g>,
    max_depth: i32,
}

impl<'g> IterativeDeepeningSearch<'g> {
    pub fn new(context: SearchContext<'g>, max_depth: i32) -> Self {
        Self { context, max_depth }
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    fn depth_limited(
        &self,
        remaining: usize,
        on_branch: &mut FixedBitSet,
        branch: &mut Vec<Step>,
    ) -> bool {
        let Some(&current) = branch.last() else {
            return false;
        };
        if current.node == self.context.end_index() {
            return true;
        }
        if remaining == 0 {
            return false;
        }

        for (next, distance) in self.context.graph().edges_at(current.node) {
            if on_branch.contains(next.index()) {
                continue;
            }
            let Some(cost) = self.context.step_cost(next, distance) else {
                continue;
            };

            on_branch.insert(next.index());
            branch.push(Step {
                node: next,
                cost: current.cost + cost,
                distance: current.distance + distance,
            });
            if self.depth_limited(remaining - 1, on_branch, branch) {
                return true;
            }
            branch.pop();
            on_branch.set(next.index(), false);
        }
        false
    }
}

impl<'g> SearchAlgorithm<'g> for IterativeDeepeningSearch<'g> {
    fn name(&self) -> &'static str {
        "Iterative Deepening"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        let ctx = &self.context;
        let Ok(max_depth) = usize::try_from(self.max_depth) else {
            debug!("Iterative deepening: negative depth limit {}", self.max_depth);
            return None;
        };

        // A simple path never has more edges than there are nodes minus one
        let node_count = ctx.graph().node_count();
        let limit = max_depth.min(node_count.saturating_sub(1));
        let start = ctx.start_index();

        for depth in 0..=limit {
            trace!("Iterative deepening: trying depth {depth}");
            let mut on_branch = FixedBitSet::with_capacity(node_count);
            on_branch.insert(start.index());
            let mut branch = vec![Step {
                node: start,
                cost: 0.0,
                distance: 0.0,
            }];

            if self.depth_limited(depth, &mut on_branch, &mut branch) {
                let Step { cost, distance, .. } = *branch.last()?;
                let path: Vec<_> = branch.iter().map(|step| ctx.node(step.node)).collect();
                debug!(
                    "Iterative deepening: {} -> {} via {} at depth {depth}",
                    ctx.start().id(),
                    ctx.end().id(),
                    format_ids(&path)
                );
                return Some(PathResult::new(path, cost, distance));
            }
        }

        debug!(
            "Iterative deepening: no route from {} to {} within depth {}",
            ctx.start().id(),
            ctx.end().id(),
            self.max_depth
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{Graph, Vehicle};
    use crate::routing::fixtures::{chain, diamond, regular, unlimited};

    fn three_hops() -> Graph {
        let mut graph = Graph::new();
        for id in [1, 2, 4] {
            graph.add_node(regular(id));
        }
        graph.add_edge(1, 2, 3.0);
        graph.add_edge(2, 4, 4.0);
        graph
    }

    #[test]
    fn depth_counts_edges() {
        let graph = three_hops();
        let search = |depth| {
            let context = SearchContext::new(&graph, 1, 4, Vehicle::standard()).unwrap();
            IterativeDeepeningSearch::new(context, depth).find_path()
        };

        assert!(search(0).is_none());
        assert!(search(1).is_none());
        let result = search(2).unwrap();
        assert_eq!(result.node_ids(), vec![1, 2, 4]);
        assert_relative_eq!(result.cost(), 7.0);
        assert!(search(i32::MAX).is_some());
    }

    #[test]
    fn negative_limit_finds_nothing() {
        let graph = three_hops();
        let context = SearchContext::new(&graph, 1, 1, Vehicle::standard()).unwrap();
        assert!(IterativeDeepeningSearch::new(context, -1).find_path().is_none());
    }

    #[test]
    fn start_is_end_at_depth_zero() {
        let graph = three_hops();
        let context = SearchContext::new(&graph, 2, 2, Vehicle::standard()).unwrap();
        let result = IterativeDeepeningSearch::new(context, 0).find_path().unwrap();
        assert_eq!(result.node_ids(), vec![2]);
    }

    #[test]
    fn prefers_fewest_edges() {
        let graph = diamond();
        let context = SearchContext::new(&graph, 1, 4, unlimited()).unwrap();
        let result = IterativeDeepeningSearch::new(context, 5).find_path().unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.start().unwrap().id(), 1);
        assert_eq!(result.end().unwrap().id(), 4);
    }

    #[test]
    fn cycles_do_not_trap_the_search() {
        let mut graph = chain(4);
        graph.add_edge(2, 1, 1.0);
        graph.add_edge(3, 2, 1.0);

        let context = SearchContext::new(&graph, 1, 4, unlimited()).unwrap();
        let result = IterativeDeepeningSearch::new(context, 10).find_path().unwrap();
        assert_eq!(result.node_ids(), vec![1, 2, 3, 4]);
    }
}
