//! Vehicles and refuelling points

pub mod gas_station;
pub mod vehicle;

pub use gas_station::{GasStation, GasStations, index_stations};
pub use vehicle::Vehicle;
