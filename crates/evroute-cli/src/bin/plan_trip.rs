//! Plan a trip with charging stops.
//!
//! Usage: plan_trip --start Paris --end Lyon --vehicle <id>

use clap::Parser;
use evroute_cli::{format_plan, PlannerClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Departure place name
    #[arg(long)]
    start: String,

    /// Destination place name
    #[arg(long)]
    end: String,

    /// Vehicle id from `list_vehicles`
    #[arg(long)]
    vehicle: String,

    /// Planner server URL
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = PlannerClient::new(&args.url);

    println!("Planning {} -> {} with vehicle {}...", args.start, args.end, args.vehicle);
    let plan = match client.plan_trip(&args.start, &args.end, &args.vehicle).await {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Planning failed: {:#}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", format_plan(&plan));
    }
    Ok(())
}
