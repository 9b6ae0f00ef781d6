use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use super::dto::DashboardView;
use super::services::get_dashboard_data;
use crate::{
    auth::services::AuthUser,
    db::UserKey,
    error::{api_error, ApiError},
    state::AppState,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardView>, ApiError> {
    match get_dashboard_data(state.store.as_ref(), &UserKey::Id(user_id)).await {
        Ok(Some(view)) => Ok(Json(view)),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, "User not found")),
        Err(e) => {
            error!(error = ?e, %user_id, "dashboard load failed");
            Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "Data unavailable"))
        }
    }
}
