use std::cmp::Ordering;

use petgraph::graph::NodeIndex;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("No path found")]
    NoPathFound,
    #[error("Negative cycle detected")]
    NegativeCycleDetected,
}

/// Heap entry keyed by accumulated cost
#[derive(Copy, Clone, Debug)]
pub(crate) struct State {
    pub(crate) cost: f64,
    pub(crate) node: NodeIndex,
}

// Min-heap by cost, ties broken by node index so runs are reproducible
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Previous node on the best known route plus the raw length of the leg
pub(crate) type Predecessor = Option<(NodeIndex, f64)>;

/// Walks predecessor links back from `end`.
///
/// Returns the node sequence from `start` to `end` and its raw length, or
/// `None` if the chain is broken or loops.
pub(crate) fn trace_back(
    predecessors: &[Predecessor],
    start: NodeIndex,
    end: NodeIndex,
) -> Option<(Vec<NodeIndex>, f64)> {
    let mut path = vec![end];
    let mut distance = 0.0;
    let mut current = end;

    while current != start {
        let (previous, leg) = predecessors.get(current.index()).copied().flatten()?;
        distance += leg;
        path.push(previous);
        current = previous;
        if path.len() > predecessors.len() {
            return None;
        }
    }

    path.reverse();
    Some((path, distance))
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        for (cost, node) in [(5.0, 0), (1.5, 1), (3.0, 2), (1.5, 3)] {
            heap.push(State {
                cost,
                node: NodeIndex::new(node),
            });
        }

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop())
            .map(|state| state.node.index())
            .collect();
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn trace_back_rebuilds_route() {
        let n = NodeIndex::new;
        let predecessors = vec![None, Some((n(0), 4.0)), Some((n(1), 2.5)), None];

        let (path, distance) = trace_back(&predecessors, n(0), n(2)).unwrap();
        assert_eq!(path, vec![n(0), n(1), n(2)]);
        assert!((distance - 6.5).abs() < 1e-9);

        assert!(trace_back(&predecessors, n(0), n(3)).is_none());
        assert_eq!(trace_back(&predecessors, n(0), n(0)).unwrap().0, vec![n(0)]);
    }

    #[test]
    fn trace_back_stops_on_loops() {
        let n = NodeIndex::new;
        let predecessors = vec![None, Some((n(2), 1.0)), Some((n(1), 1.0))];
        assert!(trace_back(&predecessors, n(0), n(2)).is_none());
    }
}
