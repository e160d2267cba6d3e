use std::sync::Arc;

use axum::{
    routing::{ get, post },
    Router,
    extract::State,
    response::{ Html, IntoResponse, Response },
    http::{ HeaderMap, StatusCode },
    Json,
};
use log::{ error, warn };
use tower_http::cors::{ Any, CorsLayer };
use uuid::Uuid;

use crate::llm::SUPPORTED_MODELS;
use crate::models::api::{
    ChatRequest,
    ChatResponse,
    ErrorResponse,
    ModelRequest,
    ModelResponse,
    SessionResponse,
    ThemeResponse,
};
use crate::session::{ SessionError, SessionStore, SubmitOutcome };

/// Header the page uses to identify its browser session. The page keeps the
/// id in sessionStorage, so the session dies with the tab.
pub const SESSION_HEADER: &str = "x-session-id";

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page_handler))
        .route("/api/session", get(session_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/model", post(model_handler))
        .route("/api/theme", post(theme_handler))
        .layer(cors)
        .with_state(state)
}

async fn page_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message.to_string() }),
    ).into_response()
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: e.to_string() }),
    ).into_response()
}

/// Returns the session for the current page, minting an id when the page has
/// none yet. Creation seeds the welcome turn.
async fn session_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = session_id_from(&headers).unwrap_or_else(|| Uuid::new_v4().to_string());

    let session = match state.store.get_or_create(&session_id).await {
        Ok(session) => session,
        Err(e) => return internal_error(e),
    };
    let session = session.lock().await;

    Json(SessionResponse {
        session_id,
        messages: session.messages().to_vec(),
        dark_mode: session.dark_mode(),
        model: session.model().to_string(),
        models: SUPPORTED_MODELS.iter().map(|m| m.to_string()).collect(),
    }).into_response()
}

async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Response {
    let Some(session_id) = session_id_from(&headers) else {
        return bad_request("missing session id");
    };

    let session = match state.store.get_or_create(&session_id).await {
        Ok(session) => session,
        Err(e) => return internal_error(e),
    };

    // Holding the session lock across the model call serializes submissions
    // within one session; other sessions are untouched.
    let mut session = session.lock().await;
    match session.submit(&req.message).await {
        SubmitOutcome::Answered(appended) => Json(ChatResponse { appended }).into_response(),
        SubmitOutcome::Ignored => {
            warn!("Ignoring empty submission from session {}", session_id);
            bad_request("empty message")
        }
    }
}

async fn model_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ModelRequest>,
) -> Response {
    let Some(session_id) = session_id_from(&headers) else {
        return bad_request("missing session id");
    };

    let session = match state.store.get_or_create(&session_id).await {
        Ok(session) => session,
        Err(e) => return internal_error(e),
    };

    let mut session = session.lock().await;
    match session.update_model(&req.model) {
        Ok(notice) =>
            Json(ModelResponse {
                message: notice,
                model: session.model().to_string(),
            }).into_response(),
        Err(e @ SessionError::UnsupportedModel(_)) => bad_request(&e.to_string()),
        Err(e) => internal_error(e),
    }
}

async fn theme_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = session_id_from(&headers) else {
        return bad_request("missing session id");
    };

    let session = match state.store.get_or_create(&session_id).await {
        Ok(session) => session,
        Err(e) => return internal_error(e),
    };

    let dark_mode = session.lock().await.toggle_dark_mode();
    Json(ThemeResponse { dark_mode }).into_response()
}
