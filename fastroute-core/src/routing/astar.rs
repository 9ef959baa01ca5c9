use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::debug;
use serde::{Deserialize, Serialize};

use super::common::{
    PathResult, Predecessor, SearchAlgorithm, SearchContext, State, format_ids, trace_back,
};
use crate::Error;
use crate::model::Node;

/// Road-aware scaling of the id-gap heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Applied to highway nodes, below 1 to pull the search onto them
    pub highway_factor: f64,
    /// Applied to high-risk nodes, above 1 to push the search away
    pub high_risk_factor: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            highway_factor: 0.8,
            high_risk_factor: 2.0,
        }
    }
}

impl HeuristicWeights {
    /// Both factors must be finite and non-negative
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("highway_factor", self.highway_factor),
            ("high_risk_factor", self.high_risk_factor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "heuristic: {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
struct Label {
    g: f64,
    fuel: f64,
}

/// A* over the effective cost.
///
/// The graph carries no coordinates, so the estimate is the gap between node
/// ids scaled by road type and risk. It is not admissible and the route is
/// not guaranteed minimal. Fuel is a hard limit: a leg that would leave less
/// than the vehicle's reserve is never taken and nothing is refuelled.
pub struct AStar<'g> {
    context: SearchContext<'g>,
    weights: HeuristicWeights,
}

impl<'g> AStar<'g> {
    pub fn new(context: SearchContext<'g>) -> Self {
        Self {
            context,
            weights: HeuristicWeights::default(),
        }
    }

    pub fn with_weights(
        context: SearchContext<'g>,
        weights: HeuristicWeights,
    ) -> Result<Self, Error> {
        weights.validate()?;
        Ok(Self { context, weights })
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Estimated remaining cost from `node` to the goal
    #[allow(clippy::cast_precision_loss)]
    pub fn heuristic(&self, node: &Node) -> f64 {
        let gap = (i64::from(self.context.end().id()) - i64::from(node.id())).abs() as f64;
        let factor = if node.is_high_risk_area() {
            self.weights.high_risk_factor
        } else if node.road_type().is_highway() {
            self.weights.highway_factor
        } else {
            1.0
        };
        gap * factor
    }
}

impl<'g> SearchAlgorithm<'g> for AStar<'g> {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        let ctx = &self.context;
        let vehicle = ctx.vehicle();
        let (start, end) = (ctx.start_index(), ctx.end_index());

        if start == end {
            return Some(PathResult::single(ctx.start()));
        }

        let node_count = ctx.graph().node_count();
        let mut labels: Vec<Option<Label>> = vec![None; node_count];
        let mut predecessors: Vec<Predecessor> = vec![None; node_count];
        let mut closed = FixedBitSet::with_capacity(node_count);
        let mut open = BinaryHeap::new();

        labels[start.index()] = Some(Label {
            g: 0.0,
            fuel: vehicle.current_fuel(),
        });
        open.push(State {
            cost: self.heuristic(ctx.start()),
            node: start,
        });

        while let Some(State { node, .. }) = open.pop() {
            if closed.put(node.index()) {
                continue;
            }
            let Some(label) = labels[node.index()] else {
                continue;
            };

            if node == end {
                let (route, distance) = trace_back(&predecessors, start, end)?;
                let path: Vec<_> = route.into_iter().map(|idx| ctx.node(idx)).collect();
                debug!(
                    "A*: {} -> {} via {} (cost {:.2})",
                    ctx.start().id(),
                    ctx.end().id(),
                    format_ids(&path),
                    label.g
                );
                return Some(PathResult::new(path, label.g, distance));
            }

            for (next, distance) in ctx.graph().edges_at(node) {
                if closed.contains(next.index()) {
                    continue;
                }
                let Some(step) = ctx.step_cost(next, distance) else {
                    continue;
                };
                if vehicle.needs_refueling_from(label.fuel, distance) {
                    continue;
                }

                let g = label.g + step;
                if labels[next.index()].is_none_or(|best| g < best.g) {
                    labels[next.index()] = Some(Label {
                        g,
                        fuel: label.fuel - vehicle.fuel_needed(distance),
                    });
                    predecessors[next.index()] = Some((node, distance));
                    open.push(State {
                        cost: g + self.heuristic(ctx.node(next)),
                        node: next,
                    });
                }
            }
        }

        debug!("A*: no route from {} to {}", ctx.start().id(), ctx.end().id());
        None
    }
}
