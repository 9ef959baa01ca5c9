//! Road network model

pub mod components;
pub mod graph;

pub use components::{Edge, Node, RoadType};
pub use graph::Graph;
