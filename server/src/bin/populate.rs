//! One-shot import from the listings provider.
//!
//! Usage: `populate <make> [model] [limit]`
//!
//! Reads the same environment (or `.env`) as the API server.

use auction_insights::config::DEFAULT_IMPORT_LIMIT;
use auction_insights::{AuctionInsightsBuilder, Settings};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("auction_insights=info,populate=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!(error = %e, "import failed");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let make = args
        .first()
        .ok_or("usage: populate <make> [model] [limit]")?;
    let model = args.get(1).map(String::as_str).filter(|m| !m.is_empty() && *m != "-");
    let limit = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_IMPORT_LIMIT,
    };

    let settings = Settings::from_env()?;
    let store = AuctionInsightsBuilder::from_settings(&settings).build()?;
    let summary = store.import_sales(make, model, limit)?;

    info!(
        imported = summary.imported,
        make = %summary.make,
        model = ?summary.model,
        "import complete"
    );
    Ok(())
}
