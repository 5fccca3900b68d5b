use axum::{http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use tracing::{info, instrument};

use super::identity::generate_guest_id;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GuestSessionResponse {
    pub guest_id: String,
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/session/guest", post(start_guest_session))
}

/// Mints a guest id for clients that cannot build one. Nothing is stored.
#[instrument]
pub async fn start_guest_session() -> (StatusCode, Json<GuestSessionResponse>) {
    let guest_id = generate_guest_id();
    info!(guest_id = %guest_id, "guest id issued");
    (StatusCode::CREATED, Json(GuestSessionResponse { guest_id }))
}
