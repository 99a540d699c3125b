//! HTTP surface for the auction sales store.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Sales routes are served under both spellings; the web client uses the
/// hyphenated one.
const SALES_PREFIXES: [&str; 2] = ["/auction_sales", "/auction-sales"];

pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(routes::meta::root))
        .route("/health", get(routes::meta::health));

    for prefix in SALES_PREFIXES {
        app = app
            .route(
                prefix,
                get(routes::sales::list_sales).post(routes::sales::create_sale),
            )
            .route(
                &format!("{prefix}/import"),
                axum::routing::post(routes::sales::import_sales),
            )
            .route(&format!("{prefix}/trends"), get(routes::trends::get_trends))
            .route(&format!("{prefix}/filters"), get(routes::trends::get_filters));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
