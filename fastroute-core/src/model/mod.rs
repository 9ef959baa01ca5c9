//! Data model for constrained road routing
//!
//! Contains the road network and the context that modulates traversal:
//! vehicles, refuelling points and live conditions.

pub mod conditions;
pub mod fleet;
pub mod network;

// Re-export of the road network
pub use network::{Edge, Graph, Node, RoadType};

// Re-export of the constraint context
pub use conditions::{TrafficCondition, TrafficStatus, WeatherCondition, WeatherStatus};
pub use fleet::{GasStation, GasStations, Vehicle};
