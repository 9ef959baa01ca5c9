//! Live conditions that scale edge weights

pub mod traffic;
pub mod weather;

pub use traffic::{TrafficCondition, TrafficStatus};
pub use weather::{WeatherCondition, WeatherStatus};
