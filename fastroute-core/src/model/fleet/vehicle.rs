use serde::{Deserialize, Serialize};

use crate::Error;

const HEAVY_VEHICLE_TYPE: &str = "Heavy Vehicle";

/// Vehicle profile plus its live fuel state.
///
/// The fuel fields change as the vehicle drives (`consume_fuel`) and stops at
/// stations (`refuel`); everything else is a fixed profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    vehicle_type: String,
    max_load: f64,
    #[serde(default)]
    requires_toll_free_route: bool,
    fuel_capacity: f64,
    current_fuel: f64,
    fuel_consumption_per_km: f64,
    #[serde(default)]
    min_fuel_at_end: f64,
    #[serde(default)]
    is_emergency_vehicle: bool,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vehicle_type: impl Into<String>,
        max_load: f64,
        requires_toll_free_route: bool,
        fuel_capacity: f64,
        current_fuel: f64,
        fuel_consumption_per_km: f64,
        min_fuel_at_end: f64,
        is_emergency_vehicle: bool,
    ) -> Self {
        Self {
            vehicle_type: vehicle_type.into(),
            max_load,
            requires_toll_free_route,
            fuel_capacity,
            current_fuel,
            fuel_consumption_per_km,
            min_fuel_at_end,
            is_emergency_vehicle,
        }
    }

    /// Passenger car: 50 l tank half full, 0.5 l/km, 5 l reserve
    pub fn standard() -> Self {
        Self::new("Standard Vehicle", 1000.0, false, 50.0, 25.0, 0.5, 5.0, false)
    }

    /// Emergency vehicle: ignores opening hours and risk zones
    pub fn emergency() -> Self {
        Self::new("Emergency Vehicle", 2000.0, false, 60.0, 40.0, 0.8, 8.0, true)
    }

    /// Heavy goods vehicle: avoids toll roads, drives slower
    pub fn heavy() -> Self {
        Self::new(HEAVY_VEHICLE_TYPE, 5000.0, true, 100.0, 50.0, 1.0, 10.0, false)
    }

    /// Looks up one of the preset profiles by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::standard()),
            "emergency" => Some(Self::emergency()),
            "heavy" => Some(Self::heavy()),
            _ => None,
        }
    }

    pub fn vehicle_type(&self) -> &str {
        &self.vehicle_type
    }

    pub fn max_load(&self) -> f64 {
        self.max_load
    }

    pub fn requires_toll_free_route(&self) -> bool {
        self.requires_toll_free_route
    }

    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    pub fn current_fuel(&self) -> f64 {
        self.current_fuel
    }

    pub fn fuel_consumption_per_km(&self) -> f64 {
        self.fuel_consumption_per_km
    }

    pub fn min_fuel_at_end(&self) -> f64 {
        self.min_fuel_at_end
    }

    pub fn is_emergency_vehicle(&self) -> bool {
        self.is_emergency_vehicle
    }

    pub fn is_heavy(&self) -> bool {
        self.vehicle_type.eq_ignore_ascii_case(HEAVY_VEHICLE_TYPE)
    }

    /// Litres burnt over `distance` km
    pub fn fuel_needed(&self, distance: f64) -> f64 {
        distance * self.fuel_consumption_per_km
    }

    pub fn consume_fuel(&mut self, distance: f64) {
        self.current_fuel -= self.fuel_needed(distance);
    }

    /// True when covering `remaining_distance` would leave less than the
    /// required reserve in the tank
    pub fn needs_refueling(&self, remaining_distance: f64) -> bool {
        self.needs_refueling_from(self.current_fuel, remaining_distance)
    }

    /// Same check for a hypothetical fuel level, used by searches that track
    /// fuel per partial route instead of mutating the vehicle
    pub fn needs_refueling_from(&self, fuel: f64, remaining_distance: f64) -> bool {
        fuel - self.fuel_needed(remaining_distance) < self.min_fuel_at_end
    }

    /// Adds `amount` litres, clamped to the tank capacity
    pub fn refuel(&mut self, amount: f64) {
        self.current_fuel = self.fuel_capacity.min(self.current_fuel + amount);
    }

    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("max_load", self.max_load),
            ("fuel_capacity", self.fuel_capacity),
            ("current_fuel", self.current_fuel),
            ("fuel_consumption_per_km", self.fuel_consumption_per_km),
            ("min_fuel_at_end", self.min_fuel_at_end),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "vehicle '{}': {name} must be a non-negative number, got {value}",
                    self.vehicle_type
                )));
            }
        }
        if self.current_fuel > self.fuel_capacity {
            return Err(Error::InvalidConfiguration(format!(
                "vehicle '{}': current_fuel {} exceeds fuel_capacity {}",
                self.vehicle_type, self.current_fuel, self.fuel_capacity
            )));
        }
        Ok(())
    }
}
