//! Small graphs shared by the planner tests

use crate::model::{Graph, Node, RoadType};

pub(crate) fn regular(id: i32) -> Node {
    Node::new(id, RoadType::RegularRoad)
}

/// 1→2(10), 1→3(15), 2→4(10), 3→4(5), 2→3(2); best route 1,2,3,4 at 17
pub(crate) fn diamond() -> Graph {
    let mut graph = Graph::new();
    for id in 1..=4 {
        graph.add_node(regular(id));
    }
    for (from, to, distance) in [(1, 2, 10.0), (1, 3, 15.0), (2, 4, 10.0), (3, 4, 5.0), (2, 3, 2.0)] {
        graph.add_edge(from, to, distance);
    }
    graph
}

/// Straight line 1→2→…→n with unit edges
pub(crate) fn chain(n: i32) -> Graph {
    let mut graph = Graph::new();
    for id in 1..=n {
        graph.add_node(regular(id));
    }
    for id in 1..n {
        graph.add_edge(id, id + 1, 1.0);
    }
    graph
}

/// Unlimited fuel, no restrictions
pub(crate) fn unlimited() -> crate::model::Vehicle {
    crate::model::Vehicle::new("Standard Vehicle", 1000.0, false, 1e9, 1e9, 1.0, 0.0, false)
}
