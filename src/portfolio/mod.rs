use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod services;
pub mod store;

pub use store::{PgPortfolioStore, PortfolioStore};

pub fn router() -> Router<AppState> {
    handlers::portfolio_routes()
}
