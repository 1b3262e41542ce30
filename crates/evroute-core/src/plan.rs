//! Entry point for charging-stop planning on one route.

use crate::assembler::StopAssembler;
use crate::collaborators::StationResolver;
use crate::distance::route_distance_km;
use crate::models::{ChargingPlan, Route};
use crate::rules::PlanningRules;
use crate::stops::required_stops_with_rules;

/// Plan charging stops along `route` for a vehicle with `autonomy_km` range.
///
/// The route is always returned whole. A route with no driven distance, or a
/// vehicle with no usable range, gets a plan without stops and the resolver
/// is never called.
pub async fn plan_charging(
    route: Route,
    autonomy_km: f64,
    resolver: &dyn StationResolver,
    rules: &PlanningRules,
) -> ChargingPlan {
    let total_distance_km = route_distance_km(route.points());
    let required_stops = required_stops_with_rules(total_distance_km, autonomy_km, rules);

    let assembly = StopAssembler::new(resolver, rules)
        .assemble(route.points(), required_stops)
        .await;

    ChargingPlan {
        route,
        stops: assembly.stops,
        total_distance_km,
        required_stops,
        segments_without_stop: assembly.segments_without_stop,
        unavailable_lookups: assembly.unavailable_lookups,
    }
}
