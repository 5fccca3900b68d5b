use crate::state::AppState;
use axum::Router;

mod handlers;
pub mod identity;
pub mod resolver;

pub use identity::{is_guest_id, Identity, IdentityKind};
pub use resolver::CurrentIdentity;

pub fn router() -> Router<AppState> {
    handlers::session_routes()
}
