pub mod dto;
pub mod handlers;
pub mod services;
pub mod styles;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::dashboard_routes()
}
