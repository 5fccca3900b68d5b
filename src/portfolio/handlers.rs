use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{AddEntryRequest, AddEntryResponse, MessageResponse, MigrateResponse, UsageResponse},
    model::PortfolioEntry,
    services,
};
use crate::{error::AppError, session::CurrentIdentity, state::AppState};

pub const GUEST_ID_HEADER: &str = "x-guest-id";

pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(list_portfolio).post(add_stock))
        .route("/portfolio/usage", get(portfolio_usage))
        .route("/portfolio/migrate", post(migrate_portfolio))
        .route("/portfolio/:id", delete(remove_stock))
}

#[instrument(skip(state, identity))]
pub async fn list_portfolio(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Vec<PortfolioEntry>>, AppError> {
    let rows = services::list_entries(state.portfolio.as_ref(), &identity).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, identity, payload))]
pub async fn add_stock(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<AddEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError> {
    let Json(payload) = payload?;
    let row = services::add_entry(state.portfolio.as_ref(), &identity, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            id: row.id,
            message: "Stock added successfully".into(),
        }),
    ))
}

#[instrument(skip(state, identity))]
pub async fn remove_stock(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    services::remove_entry(state.portfolio.as_ref(), &identity, id).await?;
    Ok(Json(MessageResponse {
        message: "Stock removed successfully".into(),
    }))
}

/// Folds a guest portfolio (named by `X-Guest-Id`) into the caller's account.
#[instrument(skip(state, identity, headers))]
pub async fn migrate_portfolio(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    headers: HeaderMap,
) -> Result<Json<MigrateResponse>, AppError> {
    let guest_ref = headers
        .get(GUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let migrated =
        services::migrate_guest_portfolio(state.portfolio.as_ref(), &identity, guest_ref).await?;
    let message = if migrated == 0 {
        "No guest portfolio to migrate".to_string()
    } else {
        format!("Migrated {} portfolio entries to user", migrated)
    };
    Ok(Json(MigrateResponse { migrated, message }))
}

#[instrument(skip(state, identity))]
pub async fn portfolio_usage(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<UsageResponse>, AppError> {
    Ok(Json(
        services::usage(state.portfolio.as_ref(), &identity).await?,
    ))
}
