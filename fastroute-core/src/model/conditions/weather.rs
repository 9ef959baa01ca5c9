use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Node;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherStatus {
    #[default]
    Clear,
    Rainy,
    Snowy,
    Stormy,
    Other(String),
}

impl WeatherStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => WeatherStatus::Clear,
            "rainy" => WeatherStatus::Rainy,
            "snowy" => WeatherStatus::Snowy,
            "stormy" => WeatherStatus::Stormy,
            _ => WeatherStatus::Other(value.to_string()),
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            WeatherStatus::Clear | WeatherStatus::Other(_) => 1.0,
            WeatherStatus::Rainy => 1.5,
            WeatherStatus::Snowy => 2.0,
            WeatherStatus::Stormy => 3.0,
        }
    }
}

impl fmt::Display for WeatherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherStatus::Clear => f.write_str("Clear"),
            WeatherStatus::Rainy => f.write_str("Rainy"),
            WeatherStatus::Snowy => f.write_str("Snowy"),
            WeatherStatus::Stormy => f.write_str("Stormy"),
            WeatherStatus::Other(status) => f.write_str(status),
        }
    }
}

impl From<String> for WeatherStatus {
    fn from(value: String) -> Self {
        WeatherStatus::parse(&value)
    }
}

impl From<&str> for WeatherStatus {
    fn from(value: &str) -> Self {
        WeatherStatus::parse(value)
    }
}

impl From<WeatherStatus> for String {
    fn from(value: WeatherStatus) -> Self {
        value.to_string()
    }
}

/// Network-wide weather snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCondition {
    status: WeatherStatus,
}

impl WeatherCondition {
    pub fn new(status: impl Into<WeatherStatus>) -> Self {
        Self {
            status: status.into(),
        }
    }

    pub fn status(&self) -> &WeatherStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<WeatherStatus>) {
        self.status = status.into();
    }

    /// Scales `weight` by the current weather. The node is not consulted yet;
    /// it is part of the signature so weather can become local later.
    pub fn adjust_weight_for_weather(&self, weight: f64, _node: &Node) -> f64 {
        weight * self.status.multiplier()
    }
}
