use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use house_price_core::{
    idle_view, trigger, ArtifactState, ArtifactStore, DashboardView, InputSpec, ModelCard,
    PriceError, RawInputs, INPUT_SPECS, MODEL_CARD,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::page::render_index;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub start_time: Instant,
    pub req_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store: Arc::new(store),
            start_time: Instant::now(),
            req_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn record_request(&self) -> u64 {
        self.req_count.fetch_add(1, Ordering::Relaxed) as u64 + 1
    }

    fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn artifacts(&self) -> Result<&ArtifactState, ApiError> {
        self.store.load().map_err(ApiError::from)
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    artifacts: &'static str,
    uptime_secs: u64,
    req_total: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unprocessable<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<PriceError> for ApiError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::OutOfRange { .. } | PriceError::DomainViolation { .. } => {
                ApiError::unprocessable(err.to_string())
            }
            other => {
                error!("Prediction failed: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, payload).into_response()
    }
}

/// Load the artifacts before serving
///
/// Missing or unreadable files only disable prediction; inconsistent
/// artifacts are an error and the dashboard must not start on them.
pub fn load_artifacts(store: &ArtifactStore) -> Result<&ArtifactState> {
    match store.load() {
        Ok(state) => {
            match state {
                ArtifactState::Loaded(artifacts) => {
                    info!("Prediction enabled with {} features", artifacts.schema().len())
                }
                ArtifactState::Unavailable { reason } => warn!("Prediction disabled: {}", reason),
            }
            Ok(state)
        }
        Err(err) => {
            error!(
                "Artifacts in {} are inconsistent: {}",
                store.paths().dir.display(),
                err
            );
            Err(err).context("refusing to start with mismatched artifacts")
        }
    }
}

pub async fn start_server(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind dashboard listener on {addr}"))?;
    info!("House price dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dashboard server terminated unexpectedly")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => warn!("Unable to listen for shutdown signal: {}", err),
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/api/health", get(handle_health))
        .route("/api/inputs", get(handle_inputs))
        .route("/api/state", get(handle_state))
        .route("/api/predict", post(handle_predict))
        .route("/api/model", get(handle_model))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    state.record_request();
    let artifacts = state.artifacts()?;
    Ok(Html(render_index(&idle_view(artifacts))))
}

async fn handle_health(State(state): State<SharedState>) -> Result<Json<HealthResponse>, ApiError> {
    let req_total = state.record_request();
    let artifacts = state.artifacts()?;

    Ok(Json(HealthResponse {
        status: if artifacts.is_loaded() { "ok" } else { "degraded" },
        service: "house-price-dashboard",
        version: env!("CARGO_PKG_VERSION"),
        artifacts: artifacts.status_label(),
        uptime_secs: state.uptime_seconds(),
        req_total,
    }))
}

async fn handle_inputs(State(state): State<SharedState>) -> Json<[InputSpec; 8]> {
    state.record_request();
    Json(INPUT_SPECS)
}

async fn handle_state(State(state): State<SharedState>) -> Result<Json<DashboardView>, ApiError> {
    state.record_request();
    let artifacts = state.artifacts()?;
    Ok(Json(idle_view(artifacts)))
}

async fn handle_predict(
    State(state): State<SharedState>,
    Json(raw): Json<RawInputs>,
) -> Result<(StatusCode, Json<DashboardView>), ApiError> {
    state.record_request();

    let artifacts = state.artifacts()?;
    if !artifacts.is_loaded() {
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(idle_view(artifacts))));
    }

    raw.check_bounds()?;
    let view = trigger(artifacts, &raw)?;
    Ok((StatusCode::OK, Json(view)))
}

async fn handle_model(State(state): State<SharedState>) -> Json<ModelCard> {
    state.record_request();
    Json(MODEL_CARD)
}
