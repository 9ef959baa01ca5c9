use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::debug;
use serde::{Deserialize, Serialize};

use super::common::{
    PathResult, Predecessor, SearchAlgorithm, SearchContext, State, format_ids, trace_back,
};
use crate::Error;
use crate::model::{Node, RoadType, Vehicle};

/// Cruising speeds in km/h by road type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedProfile {
    pub highway: f64,
    pub toll_road: f64,
    pub regular_road: f64,
    /// Multiplier on every speed for heavy vehicles
    pub heavy_vehicle_factor: f64,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            highway: 100.0,
            toll_road: 80.0,
            regular_road: 50.0,
            heavy_vehicle_factor: 0.75,
        }
    }
}

impl SpeedProfile {
    /// Every speed and the heavy vehicle factor must be finite and positive
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("highway", self.highway),
            ("toll_road", self.toll_road),
            ("regular_road", self.regular_road),
            ("heavy_vehicle_factor", self.heavy_vehicle_factor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "speed profile: {name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Speed on the road type of `node`; unknown road types drive like
    /// regular roads
    pub fn speed(&self, node: &Node, vehicle: &Vehicle) -> f64 {
        let base = match node.road_type() {
            RoadType::Highway => self.highway,
            RoadType::TollRoad => self.toll_road,
            RoadType::RegularRoad | RoadType::Other(_) => self.regular_road,
        };
        if vehicle.is_heavy() {
            base * self.heavy_vehicle_factor
        } else {
            base
        }
    }
}

/// Dijkstra over travel time instead of distance. Traffic and weather scale
/// the distance before it is divided by the speed of the arrival node.
pub struct ShortestTimeFirst<'g> {
    context: SearchContext<'g>,
    speeds: SpeedProfile,
}

impl<'g> ShortestTimeFirst<'g> {
    pub fn new(context: SearchContext<'g>) -> Self {
        Self {
            context,
            speeds: SpeedProfile::default(),
        }
    }

    pub fn with_speeds(context: SearchContext<'g>, speeds: SpeedProfile) -> Result<Self, Error> {
        speeds.validate()?;
        Ok(Self { context, speeds })
    }

    pub fn speeds(&self) -> &SpeedProfile {
        &self.speeds
    }

    /// Hours needed to cover `distance` effective kilometres into `node`
    pub fn travel_time(&self, distance: f64, node: &Node) -> f64 {
        distance / self.speeds.speed(node, self.context.vehicle())
    }
}

impl<'g> SearchAlgorithm<'g> for ShortestTimeFirst<'g> {
    fn name(&self) -> &'static str {
        "Shortest Time First"
    }

    fn find_path(&self) -> Option<PathResult<'g>> {
        let ctx = &self.context;
        let (start, end) = (ctx.start_index(), ctx.end_index());

        if start == end {
            return Some(PathResult::single(ctx.start()));
        }

        let node_count = ctx.graph().node_count();
        let mut times = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Predecessor> = vec![None; node_count];
        let mut settled = FixedBitSet::with_capacity(node_count);
        let mut heap = BinaryHeap::new();

        times[start.index()] = 0.0;
        heap.push(State {
            cost: 0.0,
            node: start,
        });

        while let Some(State { cost, node }) = heap.pop() {
            if settled.put(node.index()) {
                continue;
            }

            if node == end {
                let (route, distance) = trace_back(&predecessors, start, end)?;
                let path: Vec<_> = route.into_iter().map(|idx| ctx.node(idx)).collect();
                debug!(
                    "Shortest time: {} -> {} via {} ({cost:.3} h)",
                    ctx.start().id(),
                    ctx.end().id(),
                    format_ids(&path)
                );
                return Some(PathResult::new(path, cost, distance));
            }

            for (next, distance) in ctx.graph().edges_at(node) {
                if settled.contains(next.index()) {
                    continue;
                }
                let Some(effective) = ctx.step_cost(next, distance) else {
                    continue;
                };

                let arrival = cost + self.travel_time(effective, ctx.node(next));
                if arrival < times[next.index()] {
                    times[next.index()] = arrival;
                    predecessors[next.index()] = Some((node, distance));
                    heap.push(State {
                        cost: arrival,
                        node: next,
                    });
                }
            }
        }

        debug!(
            "Shortest time: no route from {} to {}",
            ctx.start().id(),
            ctx.end().id()
        );
        None
    }
}
