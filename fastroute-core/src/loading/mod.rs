//! Scenario loading: reads a JSON scenario file and builds the graph, vehicle
//! and conditions a route query runs against.

mod builder;
mod config;

pub use builder::{Scenario, create_scenario};
pub use config::{EdgeConfig, ScenarioConfig, VehicleConfig};
