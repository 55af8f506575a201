//! CLI tool to poll a running kiosk server and print the display
//! state as it evolves.

use std::time::Duration;

use clap::Parser;
use tokio::time;

/// Watch the kiosk server's display snapshot
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Kiosk server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Poll interval in seconds
    #[arg(long, default_value_t = 1.0)]
    interval: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();
    let mut ticker = time::interval(Duration::from_secs_f64(args.interval));

    loop {
        ticker.tick().await;

        let snapshot: serde_json::Value = client
            .get(format!("{}/v1/snapshot", args.url))
            .send()
            .await?
            .json()
            .await?;

        println!(
            "{} | {:<10} {:<8} alt {:<9} dist {:<8} wx {} {}",
            snapshot["clock"].as_str().unwrap_or("--:--:--"),
            snapshot["flight_number"].as_str().unwrap_or(""),
            snapshot["status"].as_str().unwrap_or(""),
            snapshot["altitude"].as_str().unwrap_or(""),
            snapshot["distance"].as_str().unwrap_or(""),
            snapshot["flight_rules_status"].as_str().unwrap_or(""),
            snapshot["ceiling_status"].as_str().unwrap_or(""),
        );
    }
}
