use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::response::Json;
use dv_sdk::{DeltaVision, SearchOptions};
use dv_types::DiffMode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "dv-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Port and configured default directories.
pub async fn app_info_handler(State(state): State<AppState>) -> Json<Value> {
    let config = state.config();
    let display = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };
    Json(json!({
        "networkUrl": format!("http://{}", config.bind_addr),
        "isNetworkAccessEnabled": true,
        "serverPort": config.bind_addr.port(),
        "appState": {
            "oldFilesDir": display(&config.old_dir),
            "newFilesDir": display(&config.new_dir),
            "keywordsFilePath": display(&config.keywords_file),
            "defaultDiffMode": config.default_diff_mode,
        },
    }))
}

fn viewer(state: &AppState, mode: Option<DiffMode>) -> DeltaVision {
    DeltaVision::new(mode.unwrap_or(state.config().default_diff_mode))
}

/// Treat a missing or empty path as absent.
fn present(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn required(path: Option<PathBuf>, message: &str) -> ServerResult<PathBuf> {
    present(path).ok_or_else(|| ServerError::BadRequest(message.to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareDirectoriesRequest {
    pub old_dir_path: Option<PathBuf>,
    pub new_dir_path: Option<PathBuf>,
    pub diff_mode: Option<DiffMode>,
}

pub async fn compare_directories_handler(
    State(state): State<AppState>,
    Json(req): Json<CompareDirectoriesRequest>,
) -> ServerResult<Json<Value>> {
    let both = "both old and new directory paths are required";
    let old_dir = required(req.old_dir_path, both)?;
    let new_dir = required(req.new_dir_path, both)?;
    debug!(old = %old_dir.display(), new = %new_dir.display(), "compare-directories");

    let results = viewer(&state, req.diff_mode)
        .compare_directories(&old_dir, &new_dir)
        .await?;
    Ok(Json(json!({ "success": true, "diffResults": results })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareFilesRequest {
    pub old_file_path: Option<PathBuf>,
    pub new_file_path: Option<PathBuf>,
    pub diff_mode: Option<DiffMode>,
}

pub async fn compare_files_handler(
    State(state): State<AppState>,
    Json(req): Json<CompareFilesRequest>,
) -> ServerResult<Json<Value>> {
    let old = present(req.old_file_path);
    let new = present(req.new_file_path);
    if old.is_none() && new.is_none() {
        return Err(ServerError::BadRequest(
            "at least one file path is required".to_string(),
        ));
    }

    let result = viewer(&state, req.diff_mode)
        .compare_files(old.as_deref(), new.as_deref())
        .await?;
    Ok(Json(json!({ "success": true, "result": result })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilesRequest {
    pub directory_path: Option<PathBuf>,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub options: SearchOptions,
}

pub async fn search_files_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchFilesRequest>,
) -> ServerResult<Json<Value>> {
    let dir = present(req.directory_path).filter(|_| !req.search_term.is_empty());
    let Some(dir) = dir else {
        return Err(ServerError::BadRequest(
            "directory path and search term are required".to_string(),
        ));
    };

    let report = viewer(&state, None)
        .search_files(&dir, &req.search_term, &req.options)
        .await?;
    debug!(results = report.results.len(), "search-files");
    Ok(Json(json!({
        "success": true,
        "results": report.results,
        "stats": report.stats,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileRequest {
    pub file_path: Option<PathBuf>,
}

pub async fn read_file_content_handler(
    State(state): State<AppState>,
    Json(req): Json<ReadFileRequest>,
) -> ServerResult<Json<Value>> {
    let path = required(req.file_path, "file path is required")?;
    let content = viewer(&state, None).read_file_content(&path).await?;
    Ok(Json(json!({ "success": true, "content": content })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    pub keywords_file_path: Option<PathBuf>,
}

pub async fn parse_keywords_file_handler(
    State(state): State<AppState>,
    Json(req): Json<KeywordsRequest>,
) -> ServerResult<Json<Value>> {
    let path = required(req.keywords_file_path, "keywords file path is required")?;
    let categories = viewer(&state, None).parse_keywords_file(&path).await;
    Ok(Json(json!({
        "success": true,
        "keywords": {
            "categories": categories,
            "filePath": path,
        },
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQuery {
    pub directory_path: Option<PathBuf>,
}

pub async fn stream_files_handler(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> ServerResult<Json<Value>> {
    let dir = required(query.directory_path, "directoryPath query parameter is required")?;
    let files = viewer(&state, None).list_directory(&dir).await?;
    Ok(Json(json!({ "success": true, "files": files })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileQuery {
    pub file_path: Option<PathBuf>,
}

pub async fn stream_file_content_handler(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> ServerResult<Json<Value>> {
    let path = required(query.file_path, "filePath query parameter is required")?;
    let file = viewer(&state, None).read_stream_file(&path).await?;
    let mut body = serde_json::to_value(file).map_err(|e| ServerError::Internal(e.to_string()))?;
    if let Value::Object(map) = &mut body {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Ok(Json(body))
}
