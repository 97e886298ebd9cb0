// crates/ledgerscope/src/routes.rs

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ledgerscope_core::{analyze, AnalysisError, AnalysisResult};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::ServerConfig;

/// Multipart form field that carries the uploaded CSV.
pub const CSV_FIELD: &str = "csvFile";

const PREVIEW_CHARS: usize = 150;
/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct AppState {
    max_upload_bytes: usize,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No CSV file uploaded")]
    NoFile,

    #[error("CSV file must be UTF-8 text")]
    NotUtf8,

    #[error("CSV file exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFile | ApiError::NotUtf8 => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Multipart(err) => err.status(),
            ApiError::Analysis(err) if err.is_malformed_input() => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Analysis(_) | ApiError::Task(_) => {
                error!(status = status.as_u16(), "CSV analysis failed: {self}");
                json!({ "error": "Failed to analyze CSV", "details": self.to_string() })
            }
            ApiError::Multipart(err) => json!({ "error": err.body_text() }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        max_upload_bytes: config.max_upload_bytes,
    });

    Router::new()
        .route("/", get(banner))
        .route("/analyze", post(analyze_upload))
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
        ))
        .with_state(state)
}

async fn banner() -> &'static str {
    "Ledgerscope CSV analysis service running"
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

async fn read_csv_field(multipart: &mut Multipart) -> Result<Option<Upload>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(CSV_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let data = field.bytes().await?;
        return Ok(Some(Upload { file_name, data }));
    }
    Ok(None)
}

pub async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    let upload = read_csv_field(&mut multipart).await?.ok_or(ApiError::NoFile)?;

    if upload.data.len() > state.max_upload_bytes {
        return Err(ApiError::TooLarge {
            limit: state.max_upload_bytes,
        });
    }
    let content = String::from_utf8(upload.data.to_vec()).map_err(|_| ApiError::NotUtf8)?;

    let preview: String = content.chars().take(PREVIEW_CHARS).collect();
    debug!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        size = content.len(),
        %preview,
        "received CSV upload"
    );

    let result = tokio::task::spawn_blocking(move || analyze(&content)).await??;

    info!(rows = result.dataset_summary.total_rows, "analyzed CSV upload");
    Ok(Json(result))
}
