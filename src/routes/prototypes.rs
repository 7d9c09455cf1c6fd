//! Prototype pages.
//!
//! GET /prototypes/{name}
//!
//! Serves `prototypes/<name>/index.html` with its CSS/JS siblings inlined. The
//! response carries a sandbox CSP so the page runs isolated from the hub UI,
//! the same way a sandboxed iframe would. Unknown prototypes get an HTML 404.
//!
//! Used by: "Open in New Tab" and shared prototype URLs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::content::SharedContent;
use crate::error::AppError;
use crate::prototype::PrototypeBundle;

pub const PROTOTYPE_SANDBOX: &str = "sandbox allow-scripts allow-same-origin allow-forms allow-popups";

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Prototype Not Found</title>
    <style>
        body { font-family: system-ui, sans-serif; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0; background: #f9fafb; }
        h1 { font-size: 1.5rem; color: #111827; margin-bottom: .5rem; }
        p { color: #4b5563; }
    </style>
</head>
<body>
    <div style="text-align: center">
        <h1>Prototype Not Found</h1>
        <p>The prototype you're looking for doesn't exist.</p>
    </div>
</body>
</html>"#;

pub fn routes(content: SharedContent) -> Router {
    Router::new()
        .route("/prototypes/{name}", get(render_prototype))
        .with_state(content)
}

async fn render_prototype(
    State(content): State<SharedContent>,
    Path(name): Path<String>,
) -> Response {
    match PrototypeBundle::load(&content, &name).await {
        Ok(bundle) => (
            [(header::CONTENT_SECURITY_POLICY, PROTOTYPE_SANDBOX)],
            Html(bundle.render()),
        )
            .into_response(),
        Err(AppError::NotFound(_) | AppError::InvalidPath(_)) => {
            (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
