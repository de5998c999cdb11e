use crate::auth::{AuthError, Authenticator};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use lavender_core::{ErrorBody, GeminiClient, GeminiError, GenerateRequest};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Application state shared with all routes
#[derive(Clone, Debug)]
pub struct AppState {
    gemini_client: Arc<GeminiClient>,
    authenticator: Option<Arc<Authenticator>>,
}

impl AppState {
    pub fn new(gemini_client: GeminiClient, authenticator: Option<Authenticator>) -> Self {
        Self {
            gemini_client: Arc::new(gemini_client),
            authenticator: authenticator.map(Arc::new),
        }
    }
}

/// Error type for HTTP server
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(AuthError),
    Gemini(GeminiError),
}

impl From<GeminiError> for ApiError {
    fn from(e: GeminiError) -> Self {
        ApiError::Gemini(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(e) => {
                warn!(error = %e, "Rejected unauthenticated generate request");
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("Unauthorized"))).into_response()
            }
            Self::Gemini(e) => {
                match &e {
                    GeminiError::ConfigError => {
                        error!("GEMINI_API_KEY is not set; refusing to call the Gemini API")
                    }
                    GeminiError::DownstreamError(message) => {
                        error!(api_message = %message, "Gemini API returned an error")
                    }
                    GeminiError::EmptyResult => {
                        error!("Gemini API responded with no candidates, possibly a safety block")
                    }
                    GeminiError::TransportError { details } => {
                        error!(details = %details, "Gemini API request failed")
                    }
                }
                let mut body = ErrorBody::new(e.message());
                if let Some(details) = e.details() {
                    body = body.with_details(details);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Build the router with CORS enabled for every origin
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/generate", post(handle_generate))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

    info!("Backend running on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

/// Health check handler
async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Forward a prompt to the Gemini API and pass its payload through
async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<GenerateRequest>>,
) -> Result<Json<Value>, ApiError> {
    if let Some(authenticator) = &state.authenticator {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let claims = authenticator
            .verify_header(header)
            .map_err(ApiError::Unauthorized)?;
        info!(user = %claims.sub, "Authenticated generate request");
    }

    // A missing or unreadable body is forwarded as an empty prompt
    let request = payload.map(|Json(request)| request).unwrap_or_default();

    let data = state.gemini_client.generate_content(&request.prompt).await?;
    info!(
        candidates = data["candidates"].as_array().map_or(0, Vec::len),
        "Gemini API request succeeded"
    );
    Ok(Json(data))
}
