//! Content CRUD over the repository.
//!
//! - GET /api/v1/files?dir=&path=
//!   With `path`, returns the file's text; otherwise lists `dir` (root if
//!   absent). Used by: file browser, documents and prototypes list views.
//!
//! - GET /api/v1/files/raw?path=
//!   Opaque bytes with a guessed content type. Used for non-text files.
//!
//! - POST /api/v1/files { path, content?, isDirectory? }
//! - PUT /api/v1/files { path, content }
//! - DELETE /api/v1/files?path=

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::content::{NewEntry, SharedContent};
use crate::error::{AppError, Result};
use crate::models::{CreateRequest, FilesResponse, MutationResponse, UpdateRequest};

pub fn routes(content: SharedContent) -> Router {
    Router::new()
        .route(
            "/api/v1/files",
            get(list_or_read).post(create).put(update).delete(remove),
        )
        .route("/api/v1/files/raw", get(read_raw))
        .with_state(content)
}

#[derive(Debug, Deserialize)]
struct FilesQuery {
    dir: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PathQuery {
    path: Option<String>,
}

fn required(path: Option<String>) -> Result<String> {
    path.filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Path is required".to_string()))
}

async fn list_or_read(
    State(content): State<SharedContent>,
    Query(query): Query<FilesQuery>,
) -> Result<Json<FilesResponse>> {
    if let Some(path) = query.path.filter(|p| !p.is_empty()) {
        let bytes = content.read(&path).await?;
        let text = String::from_utf8(bytes).map_err(|_| AppError::NotText(path))?;
        return Ok(Json(FilesResponse::File { content: text }));
    }

    let items = content.list(query.dir.as_deref().unwrap_or("")).await?;
    Ok(Json(FilesResponse::Directory { items }))
}

async fn read_raw(
    State(content): State<SharedContent>,
    Query(query): Query<PathQuery>,
) -> Result<impl IntoResponse> {
    let path = required(query.path)?;
    let bytes = content.read(&path).await?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes))
}

async fn create(
    State(content): State<SharedContent>,
    Json(request): Json<CreateRequest>,
) -> Result<Json<MutationResponse>> {
    let path = required(Some(request.path))?;

    if request.is_directory {
        content.create(&path, NewEntry::Directory).await?;
        Ok(Json(MutationResponse::ok("Directory created")))
    } else {
        let body = request.content.unwrap_or_default();
        content.create(&path, NewEntry::File(body.as_bytes())).await?;
        Ok(Json(MutationResponse::ok("File created")))
    }
}

async fn update(
    State(content): State<SharedContent>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<MutationResponse>> {
    let path = required(Some(request.path))?;
    let body = request
        .content
        .ok_or_else(|| AppError::BadRequest("Path and content are required".to_string()))?;

    content.update(&path, body.as_bytes()).await?;
    Ok(Json(MutationResponse::ok("File updated")))
}

async fn remove(
    State(content): State<SharedContent>,
    Query(query): Query<PathQuery>,
) -> Result<Json<MutationResponse>> {
    let path = required(query.path)?;
    content.remove(&path).await?;
    Ok(Json(MutationResponse::ok("Deleted successfully")))
}
