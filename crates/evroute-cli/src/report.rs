//! Plain-text rendering of API responses.

use evroute_core::{TripPlanResponse, VehicleSummary};
use std::fmt::Write;

pub fn format_plan(plan: &TripPlanResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} -> {}: {:.1} km",
        plan.start_point.name, plan.end_point.name, plan.distance
    );
    match (plan.time, plan.price) {
        (Some(time), Some(price)) => {
            let _ = writeln!(out, "Estimated time: {:.2} h, price: {:.2}", time, price);
        }
        _ => {
            let _ = writeln!(out, "No time or price estimate for this vehicle");
        }
    }

    if plan.stations.is_empty() {
        let _ = writeln!(out, "No charging stop");
    } else {
        let _ = writeln!(
            out,
            "Charging stops ({}/{}):",
            plan.nb_stations, plan.required_stops
        );
        for (i, station) in plan.stations.iter().enumerate() {
            let _ = write!(
                out,
                "  {}. {} ({:.5}, {:.5})",
                i + 1,
                station.name,
                station.lat,
                station.lon
            );
            if !station.address.is_empty() {
                let _ = write!(out, " - {}", station.address);
            }
            out.push('\n');
        }
    }

    if plan.degraded {
        let _ = writeln!(
            out,
            "Warning: only {} of {} stops found ({} lookups failed)",
            plan.nb_stations, plan.required_stops, plan.unavailable_lookups
        );
    }
    out
}

pub fn format_vehicles(vehicles: &[VehicleSummary]) -> String {
    if vehicles.is_empty() {
        return "No vehicles available\n".to_string();
    }
    let width = vehicles.iter().map(|v| v.id.len()).max().unwrap_or(0);
    vehicles
        .iter()
        .map(|v| format!("{:width$}  {} {}\n", v.id, v.make, v.model, width = width))
        .collect()
}
