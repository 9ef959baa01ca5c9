use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::{debug, trace};
use petgraph::graph::NodeIndex;

use super::common::{PathResult, RefuelStop, SearchAlgorithm, SearchContext, format_ids};
use crate::model::GasStations;

/// One way of arriving at a node: what it cost and what is left in the tank
#[derive(Copy, Clone, Debug)]
struct Label {
    node: NodeIndex,
    cost: f64,
    fuel: f64,
    /// Raw kilometres from the start
    driven: f64,
    /// Label this one was extended from
    parent: Option<usize>,
    /// Litres pumped at the parent's node before the leg into this node
    refuelled: Option<f64>,
}

impl Label {
    /// At least as cheap with at least as much fuel
    fn dominates(&self, other: &Label) -> bool {
        self.cost <= other.cost && self.fuel >= other.fuel
    }
}

/// Whether `node` already lies on the route that ends in label `at`
fn on_route(labels: &[Label], mut at: usize, node: NodeIndex) -> bool {
    loop {
        let label = &labels[at];
        if label.node == node {
            return true;
        }
        match label.parent {
            Some(parent) => at = parent,
            None => return false,
        }
    }
}

/// Heap entry pointing into the label arena
#[derive(Copy, Clone, Debug)]
struct Entry {
    cost: f64,
    label: usize,
}

// Min-heap by cost, earlier labels first on ties
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.label.cmp(&self.label))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Fuel aware Dijkstra.
///
/// Fuel is tracked per label, so the vehicle in the context is never touched
/// during search. When the tank would dip below the reserve on the next leg
/// and the current node hosts a station, the tank is filled to capacity first.
/// A leg that would leave the tank below empty is not taken.
///
/// Each node keeps every arrival that no other arrival beats on both cost and
/// fuel left, so a dearer arrival with a fuller tank survives a cheaper one
/// that cannot finish the trip. Routes never revisit a node.
pub struct Dijkstra<'g> {
    context: SearchContext<'g>,
    gas_stations: GasStations,
}

impl<'g> Dijkstra<'g> {
    pub fn new(context: SearchContext<'g>, gas_stations: Option<GasStations>) -> Self {
        Self {
            context,
            gas_stations: gas_stations.unwrap_or_default(),
        }
    }

    pub fn context(&self) -> &SearchContext<'g> {
        &self.context
    }

    pub fn gas_stations(&self) -> &GasStations {
        &self.gas_stations
    }

    fn build_result(&self, labels: &[Label], arrival: usize) -> Option<PathResult<'g>> {
        let ctx = &self.context;

        let mut chain = vec![arrival];
        let mut current = arrival;
        while let Some(parent) = labels.get(current)?.parent {
            chain.push(parent);
            current = parent;
            if chain.len() > labels.len() {
                return None;
            }
        }
        chain.reverse();

        let mut stops = Vec::new();
        for pair in chain.windows(2) {
            let (from, to) = (&labels[pair[0]], &labels[pair[1]]);
            if let Some(litres) = to.refuelled {
                stops.push(RefuelStop {
                    node_id: ctx.node(from.node).id(),
                    distance_from_start: from.driven,
                    litres,
                });
            }
        }

        let end = &labels[arrival];
        let path = chain.iter().map(|&label| ctx.node(labels[label].node)).collect();
        Some(PathResult::new(path, end.cost, end.driven).with_refuel_stops(stops))
    }
}

impl<'g> SearchAlgorithm<'g> for Dijkstra<'g> {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        let ctx = &self.context;
        let graph = ctx.graph();
        let vehicle = ctx.vehicle();
        let (start, end) = (ctx.start_index(), ctx.end_index());

        if start == end {
            return Some(PathResult::single(ctx.start()));
        }

        let mut labels = vec![Label {
            node: start,
            cost: 0.0,
            fuel: vehicle.current_fuel(),
            driven: 0.0,
            parent: None,
            refuelled: None,
        }];
        // Live non-dominated labels per node
        let mut frontier: Vec<Vec<usize>> = vec![Vec::new(); graph.node_count()];
        frontier[start.index()].push(0);
        let mut dominated = FixedBitSet::with_capacity(1);
        let mut heap = BinaryHeap::from([Entry { cost: 0.0, label: 0 }]);

        while let Some(Entry { label: current, .. }) = heap.pop() {
            // Beaten after it was queued
            if dominated.contains(current) {
                continue;
            }
            let label = labels[current];
            let node = label.node;

            if node == end {
                let result = self.build_result(&labels, current)?;
                debug!(
                    "Dijkstra: {} -> {} via {} (cost {:.2}, {} labels)",
                    ctx.start().id(),
                    ctx.end().id(),
                    format_ids(result.path()),
                    result.cost(),
                    labels.len()
                );
                return Some(result);
            }

            let has_station = self.gas_stations.contains_key(&ctx.node(node).id());

            for (next, distance) in graph.edges_at(node) {
                if on_route(&labels, current, next) {
                    continue;
                }
                let Some(step) = ctx.step_cost(next, distance) else {
                    continue;
                };

                let mut fuel = label.fuel;
                let mut refuelled = None;
                if has_station && vehicle.needs_refueling_from(fuel, distance) {
                    let litres = vehicle.fuel_capacity() - fuel;
                    if litres > 0.0 {
                        fuel = vehicle.fuel_capacity();
                        refuelled = Some(litres);
                    }
                }

                let fuel_left = fuel - vehicle.fuel_needed(distance);
                if fuel_left < 0.0 {
                    trace!(
                        "Dijkstra: not enough fuel for {} -> {}",
                        ctx.node(node).id(),
                        ctx.node(next).id()
                    );
                    continue;
                }

                let candidate = Label {
                    node: next,
                    cost: label.cost + step,
                    fuel: fuel_left,
                    driven: label.driven + distance,
                    parent: Some(current),
                    refuelled,
                };

                let kept = &mut frontier[next.index()];
                if kept.iter().any(|&other| labels[other].dominates(&candidate)) {
                    continue;
                }
                kept.retain(|&other| {
                    let beaten = candidate.dominates(&labels[other]);
                    if beaten {
                        dominated.grow(other + 1);
                        dominated.insert(other);
                    }
                    !beaten
                });

                let id = labels.len();
                kept.push(id);
                labels.push(candidate);
                heap.push(Entry {
                    cost: candidate.cost,
                    label: id,
                });
            }
        }

        debug!(
            "Dijkstra: no route from {} to {}",
            ctx.start().id(),
            ctx.end().id()
        );
        None
    }
}
