use std::sync::Arc;

use auction_insights::{FilterOptions, TrendFilters, TrendResponse};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /auction_sales/trends?make=Porsche&make=Ferrari&model=911&year_min=1964&year_max=1973
///
/// `make` may repeat; every other parameter is single-valued.
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TrendResponse>, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::bad_request(e.body_text()))?;
    let filters = parse_trend_filters(pairs)?;

    let trends = state
        .store
        .run(move |s| s.trends().compute(&filters))
        .await?;

    Ok(Json(trends))
}

/// GET /auction_sales/filters
pub async fn get_filters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptions>, AppError> {
    let options = state.store.run(|s| s.filters().options()).await?;
    Ok(Json(options))
}

/// Build trend filters from decoded query pairs.
///
/// Empty values are treated as absent; unknown keys are ignored. Make and
/// model are matched exactly as sent.
pub fn parse_trend_filters(pairs: Vec<(String, String)>) -> Result<TrendFilters, AppError> {
    let mut filters = TrendFilters::default();
    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "make" => filters.makes.push(value),
            "model" => filters.model = Some(value),
            "year_min" => filters.year_min = Some(parse_year("year_min", &value)?),
            "year_max" => filters.year_max = Some(parse_year("year_max", &value)?),
            _ => {}
        }
    }
    Ok(filters)
}

fn parse_year(field: &str, value: &str) -> Result<i32, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_field(field, format!("'{value}' is not a valid integer")))
}
