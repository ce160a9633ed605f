//! HTTP server for interview panel matching

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::MatchError;
use crate::matcher::SharedPanelMatcher;
use crate::types::ScoredCandidate;
use crate::workbook::{load_workbook, remove_upload, save_upload, validate_upload};

const INDEX_HTML: &str = include_str!("../templates/index.html");
const GENERIC_ERROR: &str = "An error occurred while processing the file.";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub matcher: SharedPanelMatcher,
    pub upload_folder: Arc<PathBuf>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub embedder: String,
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            MatchError::InvalidUpload(_) | MatchError::Workbook(_) => StatusCode::BAD_REQUEST,
            MatchError::CandidateNotFound(_) => StatusCode::NOT_FOUND,
            MatchError::Provider(_) | MatchError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if self.is_client_error() {
            warn!("Rejected request: {}", self);
            self.to_string()
        } else {
            error!("Error occurred: {}", self);
            GENERIC_ERROR.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Multipart fields of a panel request
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    file_bytes: Vec<u8>,
    candidate_name: Option<String>,
    panel_count: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, MatchError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatchError::InvalidUpload(format!("Malformed upload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(str::to_string);
                form.file_bytes = field
                    .bytes()
                    .await
                    .map_err(|e| MatchError::InvalidUpload(format!("Malformed upload: {}", e)))?
                    .to_vec();
            }
            "candidate_name" | "panel_count" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| MatchError::InvalidUpload(format!("Malformed upload: {}", e)))?;
                if name == "candidate_name" {
                    form.candidate_name = Some(value);
                } else {
                    form.panel_count = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Panel size from the form; non-positive values mean an empty panel
fn parse_panel_count(raw: Option<&str>) -> Result<usize, MatchError> {
    let raw = raw.ok_or_else(|| MatchError::InvalidUpload("Missing panel_count.".to_string()))?;
    let count: i64 = raw
        .trim()
        .parse()
        .map_err(|_| MatchError::InvalidUpload("panel_count must be an integer.".to_string()))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Rank professors for the named candidate in an uploaded workbook
async fn get_interviewers_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<ScoredCandidate>>, MatchError> {
    let form = read_form(multipart).await?;
    let filename = validate_upload(form.file_name.as_deref())?.to_string();

    let candidate_name = form
        .candidate_name
        .ok_or_else(|| MatchError::InvalidUpload("Missing candidate_name.".to_string()))?;
    let panel_count = parse_panel_count(form.panel_count.as_deref())?;

    info!(
        "Received panel request: file='{}', candidate='{}', panel_count={}",
        filename, candidate_name, panel_count
    );

    let path = save_upload(&state.upload_folder, &filename, &form.file_bytes).await?;
    let parse_path = path.clone();
    let parsed = tokio::task::spawn_blocking(move || load_workbook(&parse_path)).await;
    remove_upload(&path).await;
    let workbook =
        parsed.map_err(|e| MatchError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

    let panel = state
        .matcher
        .match_candidate(
            &candidate_name,
            &workbook.candidates,
            &workbook.professors,
            panel_count,
        )
        .await?;

    info!("Panel for '{}': {} professors", candidate_name, panel.len());
    Ok(Json(panel))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "panelmatch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        embedder: state.matcher.embedder_name().to_string(),
    })
}

/// Create and configure the HTTP router
pub fn create_router(matcher: SharedPanelMatcher, config: &AppConfig) -> Router {
    let state = AppState {
        matcher,
        upload_folder: Arc::new(config.upload_folder.clone()),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/get_interviewers", post(get_interviewers_handler))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(matcher: SharedPanelMatcher, config: AppConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.upload_folder).await?;

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting panelmatch server on {}", addr);

    let app = create_router(matcher, &config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
