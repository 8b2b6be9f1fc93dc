//! Manual fetch utility: reconciled marine forecast for a point,
//! printed as JSON lines.
//!
//! Usage: `marine-forecast <lat> <lon> [days]`

use anyhow::{Context, Result};
use buoycast_client::{ForecastProvider, ForecastRequest, NdfdClient, UnitSystem};
use chrono::{Duration, Utc};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let latitude: f64 = args
        .next()
        .context("usage: marine-forecast <lat> <lon> [days]")?
        .parse()
        .context("latitude must be a number")?;
    let longitude: f64 = args
        .next()
        .context("usage: marine-forecast <lat> <lon> [days]")?
        .parse()
        .context("longitude must be a number")?;
    let days: i64 = match args.next() {
        Some(d) => d.parse().context("days must be an integer")?,
        None => 3,
    };

    let begin = Utc::now();
    let end = begin + Duration::days(days);
    let request = ForecastRequest {
        latitude,
        longitude,
        begin: begin.to_rfc3339(),
        end: end.to_rfc3339(),
        units: UnitSystem::Imperial,
    };

    let client = NdfdClient::new();
    let series = client.marine_forecast(&request).await?;

    for forecast in &series {
        println!("{}", serde_json::to_string(forecast)?);
    }
    Ok(())
}
