//! List the vehicle catalog, or show one vehicle's details.

use clap::Parser;
use evroute_cli::{format_vehicles, PlannerClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show details for this vehicle id
    #[arg(long)]
    id: Option<String>,

    /// Estimate charging time for a distance in km (requires --id)
    #[arg(long)]
    distance: Option<f64>,

    /// Planner server URL
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = PlannerClient::new(&args.url);

    let Some(id) = args.id else {
        let vehicles = client.list_vehicles().await?;
        print!("{}", format_vehicles(&vehicles));
        return Ok(());
    };

    let details = client.vehicle_details(&id).await?;
    let vehicle = &details.vehicle_details;
    println!("{} {} ({})", vehicle.make, vehicle.model, vehicle.id);
    println!("  Range: {} km", vehicle.profile.autonomy_km);
    println!("  Battery: {} kWh", vehicle.profile.recharge_rate_kwh);
    match details.optimal_charging_time {
        Some(minutes) => println!("  Fastest connector: {} min", minutes),
        None => println!("  No connector data"),
    }

    if let Some(distance) = args.distance {
        let estimate = client.charging_time(distance, &id).await?;
        match (estimate.charging_time, estimate.price) {
            (Some(time), Some(price)) => {
                println!("  {} km: {:.2} h, price {:.2}", distance, time, price)
            }
            _ => println!("  No estimate for {} km", distance),
        }
    }
    Ok(())
}
