use std::time::Duration;

use clap::Parser;
use menu::{
    DiningClient,
    models::{DEFAULT_API_BASE, DEFAULT_LOCATION_ID},
};
use planner::{DEFAULT_PROTEIN_GOAL, Meal};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    days_before: u32,

    days_after: u32,

    /// Repeat to scan several meals. Defaults to breakfast, lunch and dinner.
    #[arg(long)]
    meal: Vec<Meal>,

    #[arg(long, default_value_t = DEFAULT_PROTEIN_GOAL)]
    goal: f64,

    #[arg(long, env = "DINING_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long, env = "DINING_LOCATION_ID", default_value = DEFAULT_LOCATION_ID)]
    location: String,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let meals = if args.meal.is_empty() {
        Meal::ALL.to_vec()
    } else {
        args.meal
    };

    let client = DiningClient::new(
        &args.api_base,
        &args.location,
        Duration::from_secs(args.timeout_secs),
    )?;

    process::scan_menus(&client, args.days_before, args.days_after, &meals, args.goal).await
}
