use std::fmt;

use log::debug;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::common::{PathResult, SearchAlgorithm, SearchContext, effective_cost};
use crate::NodeId;
use crate::model::{Graph, Node, TrafficCondition, WeatherCondition};

/// All-pairs shortest paths over a dense matrix.
///
/// Unreachable pairs keep an infinite distance and reconstruct to an empty
/// path. Negative cycles are not detected.
#[derive(Debug, Clone)]
pub struct FloydWarshall<'g> {
    graph: &'g Graph,
    size: usize,
    /// Row-major `size * size` shortest distances
    dist: Vec<f64>,
    /// Next hop from row towards column
    next: Vec<Option<NodeIndex>>,
    /// Raw length of the direct edge chosen for each pair
    hop: Vec<f64>,
}

impl<'g> FloydWarshall<'g> {
    /// Raw edge distances, no conditions applied
    pub fn new(graph: &'g Graph) -> Self {
        Self::build(graph, |_, distance| Some(distance))
    }

    /// Edge weights run through traffic and weather; blocked edges are left out
    pub fn with_conditions(
        graph: &'g Graph,
        traffic: &TrafficCondition,
        weather: &WeatherCondition,
    ) -> Self {
        Self::build(graph, |to, distance| {
            effective_cost(distance, graph.node_at(to), traffic, weather)
        })
    }

    /// Full query context: eligibility for the vehicle and hour plus conditions
    pub fn with_context(context: &SearchContext<'g>) -> Self {
        Self::build(context.graph(), |to, distance| context.step_cost(to, distance))
    }

    fn build(graph: &'g Graph, weight: impl Fn(NodeIndex, f64) -> Option<f64>) -> Self {
        let size = graph.node_count();
        let mut dist = vec![f64::INFINITY; size * size];
        let mut next = vec![None; size * size];
        let mut hop = vec![0.0; size * size];

        for i in 0..size {
            dist[i * size + i] = 0.0;
            next[i * size + i] = Some(NodeIndex::new(i));
        }

        for (from, to, distance) in graph.all_edges() {
            let cell = from.index() * size + to.index();
            match weight(to, distance) {
                Some(cost) if cost < dist[cell] => {
                    dist[cell] = cost;
                    next[cell] = Some(to);
                    hop[cell] = distance;
                }
                _ => {}
            }
        }

        for k in 0..size {
            let via_row = dist[k * size..(k + 1) * size].to_vec();
            dist.par_chunks_mut(size)
                .zip(next.par_chunks_mut(size))
                .for_each(|(row, next_row)| {
                    let to_k = row[k];
                    if !to_k.is_finite() {
                        return;
                    }
                    for (j, &from_k) in via_row.iter().enumerate() {
                        let candidate = to_k + from_k;
                        if candidate < row[j] {
                            row[j] = candidate;
                            next_row[j] = next_row[k];
                        }
                    }
                });
        }

        debug!("Floyd-Warshall: computed {size}x{size} distance matrix");
        Self {
            graph,
            size,
            dist,
            next,
            hop,
        }
    }

    fn cell(&self, from: NodeId, to: NodeId) -> Option<(usize, usize)> {
        Some((self.graph.index_of(from)?.index(), self.graph.index_of(to)?.index()))
    }

    fn route(&self, from: usize, to: usize) -> Option<(Vec<NodeIndex>, f64)> {
        let mut current = from;
        let mut route = vec![NodeIndex::new(from)];
        let mut distance = 0.0;

        while current != to {
            let step = self.next[current * self.size + to]?;
            distance += self.hop[current * self.size + step.index()];
            current = step.index();
            route.push(step);
            if route.len() > self.size {
                return None;
            }
        }
        Some((route, distance))
    }

    /// Nodes from `from` to `to`; empty when unreachable or either id is
    /// unknown
    pub fn get_shortest_path(&self, from: NodeId, to: NodeId) -> Vec<&'g Node> {
        self.shortest_path(from, to)
            .map(|result| result.path().to_vec())
            .unwrap_or_default()
    }

    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<PathResult<'g>> {
        let (i, j) = self.cell(from, to)?;
        let cost = self.dist[i * self.size + j];
        if !cost.is_finite() {
            return None;
        }
        let (route, distance) = self.route(i, j)?;
        let path = route.into_iter().map(|idx| self.graph.node_at(idx)).collect();
        Some(PathResult::new(path, cost, distance))
    }

    /// Shortest distance, `None` when unreachable
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let (i, j) = self.cell(from, to)?;
        let cost = self.dist[i * self.size + j];
        cost.is_finite().then_some(cost)
    }

    pub fn print_distance_matrix(&self) {
        print!("{self}");
    }
}

impl fmt::Display for FloydWarshall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<NodeId> = self.graph.nodes().map(Node::id).collect();

        for id in &ids {
            write!(f, "\t{id}")?;
        }
        writeln!(f)?;

        for (i, id) in ids.iter().enumerate() {
            write!(f, "{id}")?;
            for value in &self.dist[i * self.size..(i + 1) * self.size] {
                if value.is_finite() {
                    write!(f, "\t{value}")?;
                } else {
                    f.write_str("\t∞")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Single-pair adapter: precomputes the matrix for one query context and
/// reads its start/end entry
pub struct FloydWarshallRoute<'g> {
    table: FloydWarshall<'g>,
    start: NodeId,
    end: NodeId,
}

impl<'g> FloydWarshallRoute<'g> {
    pub fn new(context: &SearchContext<'g>) -> Self {
        Self {
            table: FloydWarshall::with_context(context),
            start: context.start().id(),
            end: context.end().id(),
        }
    }

    pub fn table(&self) -> &FloydWarshall<'g> {
        &self.table
    }
}

impl<'g> SearchAlgorithm<'g> for FloydWarshallRoute<'g> {
    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        self.table.shortest_path(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{RoadType, TrafficStatus, Vehicle, WeatherStatus};
    use crate::routing::fixtures::{diamond, regular, unlimited};

    #[test]
    fn all_pairs_on_diamond() {
        let graph = diamond();
        let table = FloydWarshall::new(&graph);

        let ids: Vec<NodeId> = table.get_shortest_path(1, 4).iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(table.distance(1, 4), Some(17.0));
        assert_eq!(table.distance(2, 4), Some(7.0));
        assert_eq!(table.distance(1, 1), Some(0.0));

        let result = table.shortest_path(1, 3).unwrap();
        assert_eq!(result.node_ids(), vec![1, 2, 3]);
        assert_relative_eq!(result.distance(), 12.0);
    }

    #[test]
    fn unreachable_pair_is_empty() {
        let graph = diamond();
        let table = FloydWarshall::new(&graph);

        assert!(table.get_shortest_path(4, 1).is_empty());
        assert_eq!(table.shortest_path(4, 1), None);
        assert_eq!(table.distance(4, 1), None);
        assert!(table.get_shortest_path(1, 99).is_empty());
    }

    #[test]
    fn same_node_path() {
        let graph = diamond();
        let table = FloydWarshall::new(&graph);
        assert_eq!(table.get_shortest_path(3, 3).len(), 1);
    }

    #[test]
    fn conditions_reweight_and_block() {
        let graph = diamond();
        let traffic: TrafficCondition = [(3, TrafficStatus::Closed)].into_iter().collect();
        let weather = WeatherCondition::new(WeatherStatus::Rainy);
        let table = FloydWarshall::with_conditions(&graph, &traffic, &weather);

        assert_eq!(table.distance(1, 4), Some(30.0));
        assert_eq!(table.distance(1, 3), None);
        let result = table.shortest_path(1, 4).unwrap();
        assert_eq!(result.node_ids(), vec![1, 2, 4]);
        assert_relative_eq!(result.distance(), 20.0);
    }

    #[test]
    fn matrix_rendering_marks_unreachable() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));
        graph.add_node(regular(2));
        graph.add_edge(1, 2, 3.5);

        let rendered = FloydWarshall::new(&graph).to_string();
        assert_eq!(rendered, "\t1\t2\n1\t0\t3.5\n2\t∞\t0\n");
    }

    #[test]
    fn route_adapter_uses_eligibility() {
        let mut graph = Graph::new();
        graph.add_node(regular(1));
        graph.add_node(Node::new(2, RoadType::RegularRoad).high_risk_area(true));
        graph.add_node(regular(3));
        graph.add_edge(1, 2, 1.0);
        graph.add_edge(2, 3, 1.0);
        graph.add_edge(1, 3, 5.0);

        let context = SearchContext::new(&graph, 1, 3, unlimited()).unwrap();
        let route = FloydWarshallRoute::new(&context);
        assert_eq!(route.find_path().unwrap().node_ids(), vec![1, 3]);

        let context = SearchContext::new(&graph, 1, 3, Vehicle::emergency()).unwrap();
        let route = FloydWarshallRoute::new(&context);
        assert_eq!(route.find_path().unwrap().node_ids(), vec![1, 2, 3]);
    }
}
