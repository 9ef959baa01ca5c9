//! Road graph: petgraph storage plus an id index

use hashbrown::HashMap;
use log::{trace, warn};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::{Edge, Node};
use crate::NodeId;

/// Directed road graph keyed by [`NodeId`].
///
/// Each node's outgoing edges form its adjacency list. Edges into obstacle
/// nodes are refused at insertion time, so no adjacency list ever points at
/// an obstacle.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) graph: DiGraph<Node, f64>,
    index: HashMap<NodeId, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. A node with an id that is already present replaces the
    /// old one and starts over with an empty adjacency list.
    pub fn add_node(&mut self, node: Node) {
        let id = node.id();
        if let Some(&idx) = self.index.get(&id) {
            warn!("Node {id} already present - replacing it and dropping its outgoing edges");
            let drop_incoming = node.is_obstacle();
            self.graph
                .retain_edges(|g, edge| match g.edge_endpoints(edge) {
                    Some((source, target)) => source != idx && !(drop_incoming && target == idx),
                    None => true,
                });
            self.graph[idx] = node;
            return;
        }

        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
    }

    /// Adds a directed edge `from -> to`.
    ///
    /// Silently ignored (returns `false`) when either endpoint is unknown or
    /// when the target refuses the link because it is an obstacle.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, distance: f64) -> bool {
        let (Some(&source), Some(&target)) = (self.index.get(&from), self.index.get(&to)) else {
            trace!("Ignoring edge {from} -> {to}: unknown endpoint");
            return false;
        };

        if !self.graph[source].admits_neighbor(&self.graph[target]) {
            trace!("Ignoring edge {from} -> {to}: target is an obstacle");
            return false;
        }

        self.graph.add_edge(source, target, distance);
        true
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Adjacency list of `id`; empty for unknown ids
    pub fn edges(&self, id: NodeId) -> impl Iterator<Item = Edge<'_>> {
        self.index_of(id)
            .into_iter()
            .flat_map(move |idx| self.edges_at(idx))
            .map(move |(target, distance)| Edge::new(&self.graph[target], distance))
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges(from).any(|edge| edge.neighbor().id() == to)
    }

    /// Length of the shortest direct edge `from -> to`, if any
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edges(from)
            .filter(|edge| edge.neighbor().id() == to)
            .map(|edge| edge.distance())
            .min_by(f64::total_cmp)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Outgoing `(target, distance)` pairs of a dense index
    pub(crate) fn edges_at(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph
            .edges(idx)
            .map(|edge| (edge.target(), *edge.weight()))
    }

    /// Every `(source, target, distance)` triple in the graph
    pub(crate) fn all_edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoadType;

    fn regular(id: NodeId) -> Node {
        Node::new(id, RoadType::RegularRoad)
    }

    #[test]
    fn edges_form_adjacency_lists() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));
        graph.add_node(regular(2));
        graph.add_node(regular(3));

        assert!(graph.add_edge(1, 2, 10.0));
        assert!(graph.add_edge(1, 3, 7.2));

        assert_eq!(graph.edges(1).count(), 2);
        assert_eq!(graph.edges(2).count(), 0);
        assert_eq!(graph.distance(1, 3), Some(7.2));
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 1));
    }

    #[test]
    fn edges_to_unknown_nodes_are_ignored() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));

        assert!(!graph.add_edge(1, 99, 5.0));
        assert!(!graph.add_edge(99, 1, 5.0));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edges(99).count(), 0);
    }

    #[test]
    fn edges_into_obstacles_are_refused() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));
        graph.add_node(regular(2).obstacle(true));

        assert!(!graph.add_edge(1, 2, 3.0));
        assert!(graph.add_edge(2, 1, 3.0));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn replacing_a_node_resets_its_adjacency() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));
        graph.add_node(regular(2));
        graph.add_node(regular(3));
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(2, 3, 1.0);

        graph.add_node(regular(2).high_risk_area(true));

        assert_eq!(graph.node_count(), 3);
        assert!(graph.get_node(2).is_some_and(Node::is_high_risk_area));
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_edge(2, 3));

        graph.add_node(regular(2).obstacle(true));
        assert!(!graph.has_edge(1, 2));
    }
}
