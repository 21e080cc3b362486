use std::sync::Arc;

use appeals_api_client::{
    AddMessageRequest, AppealDetail, AppealMessage, AppealSummary, LoginRequest, LoginSuccess,
};
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod config;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    appeals: Arc<Mutex<Vec<AppealDetail>>>,
    config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            appeals: Arc::new(Mutex::new(seed_appeals())),
            config: Arc::new(config),
        }
    }
}

/// The three tickets every fresh server starts with.
fn seed_appeals() -> Vec<AppealDetail> {
    vec![
        AppealDetail {
            id: 1,
            title: "Something went wrong!".to_string(),
            messages: vec![AppealMessage {
                text: "a message".to_string(),
                is_admin: false,
            }],
        },
        AppealDetail {
            id: 2,
            title: "I got an error".to_string(),
            messages: vec![AppealMessage {
                text: "another message".to_string(),
                is_admin: false,
            }],
        },
        AppealDetail {
            id: 3,
            title: "An error occurred".to_string(),
            messages: vec![AppealMessage {
                text: "test".to_string(),
                is_admin: false,
            }],
        },
    ]
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/admin_login", post(admin_login))
        .route("/api/appeals", get(list_appeals))
        .route("/api/appeals/:appeal_id", get(fetch_appeal))
        .route("/api/appeals/:appeal_id/add-message", post(add_message))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Bearer check against the fixed session token. Validity is exact string
/// equality; anything else is the generic 401 body.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", state.config.access_token);
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(error_body(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if request.username == state.config.admin_username
        && request.password == state.config.admin_password
    {
        tracing::info!(username = %request.username, "admin login accepted");
        Json(LoginSuccess {
            token: state.config.access_token.clone(),
            refresh_token: state.config.refresh_token.clone(),
        })
        .into_response()
    } else {
        tracing::warn!(username = %request.username, "admin login rejected");
        error_body(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

async fn list_appeals(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let appeals = state.appeals.lock().await;
    let summaries: Vec<AppealSummary> = appeals
        .iter()
        .map(|appeal| AppealSummary {
            id: appeal.id,
            title: appeal.title.clone(),
        })
        .collect();
    Json(summaries).into_response()
}

async fn fetch_appeal(
    State(state): State<AppState>,
    Path(appeal_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let appeals = state.appeals.lock().await;
    match appeals.iter().find(|appeal| appeal.id == appeal_id) {
        Some(appeal) => Json(appeal.clone()).into_response(),
        None => error_body(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn add_message(
    State(state): State<AppState>,
    Path(appeal_id): Path<u64>,
    headers: HeaderMap,
    Json(request): Json<AddMessageRequest>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let mut appeals = state.appeals.lock().await;
    match appeals.iter_mut().find(|appeal| appeal.id == appeal_id) {
        Some(appeal) => {
            appeal.messages.push(AppealMessage {
                text: request.message,
                is_admin: request.is_admin,
            });
            // The add-message endpoint acknowledges with an empty JSON string.
            Json("").into_response()
        }
        None => error_body(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests;
