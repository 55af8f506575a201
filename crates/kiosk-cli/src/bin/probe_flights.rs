//! CLI tool to run one search + enrichment cycle against the flight
//! feed and print the merged record.

use clap::Parser;

use kiosk_feeds::FlightRadarClient;

/// Probe the flight feed for an inbound arrival (one-shot)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Flight API base URL
    #[arg(long, default_value = "https://fr24api.flightradar24.com/api")]
    url: String,

    /// API bearer token (falls back to FR24_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Accept-Version header value
    #[arg(long, default_value = "v1")]
    accept_version: String,

    /// Search bounding box
    #[arg(long, default_value = "33.5,32.0,-118.8,-116.0")]
    bounds: String,

    /// Monitored arrival airport (IATA)
    #[arg(long, default_value = "SAN")]
    airport: String,

    /// Altitude ceiling for the search filter, in feet
    #[arg(long, default_value_t = 10_000)]
    ceiling: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let token = match args.token {
        Some(token) => token,
        None => std::env::var("FR24_API_TOKEN")
            .map_err(|_| anyhow::anyhow!("pass --token or set FR24_API_TOKEN"))?,
    };

    let client = FlightRadarClient::new(
        &args.url,
        &token,
        &args.accept_version,
        &args.bounds,
        &args.airport,
        args.ceiling,
    );

    match client.fetch_arrival().await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("no inbound traffic"),
    }

    Ok(())
}
