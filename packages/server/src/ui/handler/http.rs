//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{LoginRequest, LoginResponse, SessionStateDto},
    ui::state::AppState,
    usecase::{LoginError, Role},
};

/// Debug endpoint to get the current session state
pub async fn debug_session_state(State(state): State<Arc<AppState>>) -> Json<SessionStateDto> {
    let session = state.get_session_state_usecase.execute().await;
    Json(SessionStateDto::from(&session))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Login endpoint
///
/// ボディは自前でデコードし、形式が不正な場合は常に 400 を返す
pub async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: LoginRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Invalid login payload: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request payload").into_response();
        }
    };

    match state
        .login_usecase
        .execute(&request.nickname, &request.password)
    {
        Ok(role) => {
            tracing::info!("'{}' logged in as {:?}", request.nickname, role);
            Json(LoginResponse {
                nickname: request.nickname,
                role: match role {
                    Role::Admin => "admin",
                    Role::Member => "member",
                },
            })
            .into_response()
        }
        Err(LoginError::InvalidPassword) => {
            tracing::warn!("Login rejected for '{}'", request.nickname);
            (StatusCode::UNAUTHORIZED, "Invalid password").into_response()
        }
        Err(LoginError::NotConfigured) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Login is not configured").into_response()
        }
    }
}
