use crate::Hour;
use crate::model::{Node, TrafficCondition, Vehicle, WeatherCondition};

/// Legality of entering `node` with `vehicle` at `current_time`.
///
/// Emergency vehicles ignore opening hours and high-risk zones. Nobody enters
/// an obstacle.
pub fn is_traversable(node: &Node, vehicle: &Vehicle, current_time: Hour) -> bool {
    if node.is_obstacle() {
        return false;
    }
    if !vehicle.is_emergency_vehicle()
        && (node.is_high_risk_area() || !node.is_open_at(current_time))
    {
        return false;
    }
    !(node.is_toll_road() && vehicle.requires_toll_free_route())
}

/// Cost of an edge of length `distance` arriving at `to` after traffic and
/// weather are applied. `None` means the edge is blocked.
pub fn effective_cost(
    distance: f64,
    to: &Node,
    traffic: &TrafficCondition,
    weather: &WeatherCondition,
) -> Option<f64> {
    let weight = traffic.adjust_weight(distance, to.id());
    let weight = weather.adjust_weight_for_weather(weight, to);
    weight.is_finite().then_some(weight)
}
