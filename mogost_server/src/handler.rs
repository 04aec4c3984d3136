use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::response::Json;
use mogost_common::{FileCompareResult, ToolkitError};
use mogost_core::{decode_text, is_csv_file, CsvView};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use crate::upload::collect_files;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "mogost-toolkit",
        "version": env!("CARGO_PKG_VERSION"),
        "tools": ["file-compare", "csv-view"],
    }))
}

/// Compare the two files of a multipart upload (`files` field, twice).
pub async fn file_compare_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<FileCompareResult>> {
    let multipart =
        multipart.map_err(|e| upload_rejected(e, "failed to retrieve uploaded files"))?;
    let mut files = collect_files(multipart, "files").await?.into_iter();
    let (Some(left), Some(right), None) = (files.next(), files.next(), files.next()) else {
        return Err(ServerError::invalid_input("upload exactly two files to compare"));
    };

    info!("Comparing {} with {}", left.file_name, right.file_name);

    let engine = state.text_engine.clone();
    let report = tokio::task::spawn_blocking(move || {
        let left_text = decode_text(&left.data);
        let right_text = decode_text(&right.data);
        engine
            .compare_text(&left_text, &right_text)
            .into_report(&left.file_name, &right.file_name)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(Json(report))
}

#[derive(Debug, Default, Deserialize)]
pub struct CsvViewQuery {
    pub preview: Option<String>,
}

/// Parse an uploaded CSV (`file` field). `?preview=true` trims the rows.
pub async fn csv_view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CsvViewQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<CsvView>> {
    let multipart =
        multipart.map_err(|e| upload_rejected(e, "failed to retrieve uploaded file"))?;
    let preview = query.preview.as_deref() == Some("true");

    let Some(file) = collect_files(multipart, "file").await?.into_iter().next() else {
        return Err(ToolkitError::Upload("failed to retrieve uploaded file".to_string()).into());
    };
    if !is_csv_file(Path::new(&file.file_name)) {
        return Err(ServerError::invalid_input("please upload a CSV file"));
    }

    info!("Viewing {} (preview: {})", file.file_name, preview);

    let viewer = state.csv_viewer.clone();
    let view = tokio::task::spawn_blocking(move || {
        viewer.view_reader(&file.file_name, file.data.as_ref(), preview)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok(Json(view))
}

fn upload_rejected(rejection: MultipartRejection, message: &str) -> ServerError {
    debug!("Multipart body rejected: {}", rejection);
    ToolkitError::Upload(message.to_string()).into()
}
