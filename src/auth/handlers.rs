use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest},
        password::verify_password,
        services::{is_valid_email, normalize_email, AuthUser, JwtKeys},
    },
    error::{api_error, bad_body, ApiError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_pair(keys: &JwtKeys, user: PublicUser) -> Result<AuthResponse, ApiError> {
    let access_token = keys.sign_access(user.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not issue token")
    })?;
    let refresh_token = keys.sign_refresh(user.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not issue token")
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user,
    })
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(mut payload) = payload.map_err(bad_body)?;
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(api_error(StatusCode::BAD_REQUEST, "Invalid email"));
    }

    let user = match state.store.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(api_error(StatusCode::UNAUTHORIZED, "Invalid credentials"));
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "Data unavailable"));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Stored credential unusable"));
        }
    };

    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(api_error(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(&state);
    let response = issue_pair(&keys, PublicUser::from(user))?;

    info!(user_id = %response.user.id, email = %response.user.email, "user logged in");
    Ok(Json(response))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload.map_err(bad_body)?;
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| {
            warn!(error = %e, "refresh token rejected");
            api_error(StatusCode::UNAUTHORIZED, "Invalid or expired token")
        })?;

    let user = match state.store.find_user_by_id(claims.sub).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err(api_error(StatusCode::UNAUTHORIZED, "User not found")),
        Err(e) => {
            error!(error = %e, user_id = %claims.sub, "find_user_by_id failed");
            return Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "Data unavailable"));
        }
    };

    Ok(Json(issue_pair(&keys, PublicUser::from(user))?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    match state.store.find_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(Json(PublicUser::from(user))),
        Ok(None) => {
            warn!(user_id = %user_id, "user not found");
            Err(api_error(StatusCode::UNAUTHORIZED, "User not found"))
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_user_by_id failed");
            Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "Data unavailable"))
        }
    }
}
