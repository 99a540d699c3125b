use std::sync::Arc;

use auction_insights::{AsyncAuctionInsights, AuctionInsightsBuilder, Settings};
use auction_insights_api::{router, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("auction_insights=info,auction_insights_api=info,tower_http=info")
        }))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    info!(
        database = ?settings.database_path,
        provider = settings.provider_base_url.as_deref().unwrap_or("<unset>"),
        "opening auction sales store"
    );
    let store = AsyncAuctionInsights::build(AuctionInsightsBuilder::from_settings(&settings)).await?;

    let app = router(Arc::new(AppState::new(store)));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
