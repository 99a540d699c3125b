use std::sync::Arc;

use auction_insights::config::DEFAULT_IMPORT_LIMIT;
use auction_insights::{ImportSummary, SaleCreate, SaleRecord};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListSalesParams {
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct ImportParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub limit: Option<u32>,
}

/// GET /auction_sales?skip=0&limit=100
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListSalesParams>, QueryRejection>,
) -> Result<Json<Vec<SaleRecord>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::unprocessable(e.body_text()))?;

    let sales = state
        .store
        .run(move |s| s.sales().list(params.skip, params.limit))
        .await?;

    Ok(Json(sales))
}

/// POST /auction_sales
///
/// Body: a sale with at least `car_name`. Returns the stored record.
pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaleCreate>, JsonRejection>,
) -> Result<Json<SaleRecord>, AppError> {
    let Json(sale) = payload.map_err(|e| AppError::unprocessable(e.body_text()))?;

    let created = state.store.run(move |s| s.sales().create(&sale)).await?;
    Ok(Json(created))
}

/// POST /auction_sales/import?make=Porsche&model=911&limit=50
///
/// Pulls listings from the provider and stores them. Fails as a whole if
/// the provider call fails or any listing is unusable.
pub async fn import_sales(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ImportParams>, QueryRejection>,
) -> Result<Json<ImportSummary>, AppError> {
    let Query(params) = params.map_err(|e| AppError::unprocessable(e.body_text()))?;

    let make = params
        .make
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::invalid_field("make", "Missing required query parameter: make"))?;
    let model = params.model.filter(|m| !m.trim().is_empty());
    let limit = params.limit.unwrap_or(DEFAULT_IMPORT_LIMIT);

    let summary = state
        .store
        .run(move |s| s.import_sales(&make, model.as_deref(), limit))
        .await?;

    Ok(Json(summary))
}
