use auction_insights::AsyncAuctionInsights;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Handle to the sales store. Each call runs on its own scoped session,
    /// so no request holds a connection beyond its own work.
    pub store: AsyncAuctionInsights,
}

impl AppState {
    pub fn new(store: AsyncAuctionInsights) -> Self {
        Self { store }
    }
}
