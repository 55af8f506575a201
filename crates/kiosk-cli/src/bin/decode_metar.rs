//! CLI tool to fetch and decode a METAR report.

use clap::Parser;

use kiosk_core::metar;
use kiosk_feeds::MetarClient;

/// Fetch (or take) a raw METAR report and print the decoded metrics
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// METAR reporting station
    #[arg(long, default_value = "KSAN")]
    station: String,

    /// Weather API base URL
    #[arg(long, default_value = "https://aviationweather.gov/api/data")]
    url: String,

    /// Decode this report text instead of fetching
    #[arg(long)]
    raw: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let report = match args.raw {
        Some(raw) => raw,
        None => {
            MetarClient::new(&args.url, &args.station)
                .fetch_raw()
                .await?
        }
    };
    println!("{}", report);
    println!();

    let metrics = metar::decode(&report);
    println!(
        "flight rules: {} ({})",
        metrics.flight_rules.label(),
        metrics.flight_rules.message()
    );
    match (metrics.ceiling_ft, metrics.ceiling_cover) {
        (Some(ft), Some(cover)) => println!("ceiling:      {} FT ({})", ft, cover.message()),
        _ => println!("ceiling:      clear"),
    }
    match metrics.temperature_c {
        Some(temp) => println!("temperature:  {}°C", temp),
        None => println!("temperature:  n/a"),
    }
    match (metrics.wind_direction_deg, metrics.wind_speed_kt) {
        (Some(dir), Some(speed)) => println!("wind:         {:03}° at {} kt", dir, speed),
        _ => println!("wind:         calm"),
    }
    match metrics.visibility_sm {
        Some(sm) => println!("visibility:   {} SM", sm),
        None => println!("visibility:   n/a"),
    }
    match metrics.altimeter_inhg {
        Some(inhg) => println!("altimeter:    {:.2} inHg", inhg),
        None => println!("altimeter:    n/a"),
    }

    Ok(())
}
