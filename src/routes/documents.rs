//! Markdown document rendering.
//!
//! GET /api/v1/documents/render?path=
//!
//! Renders a markdown file to HTML with the GFM extensions the editor preview
//! expects (tables, strikethrough, task lists, footnotes).
//!
//! Used by: document view and editor preview

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use pulldown_cmark::{html, Event, Options, Parser};
use serde::Deserialize;

use crate::content::SharedContent;
use crate::error::{AppError, Result};
use crate::models::RenderedDocument;

pub fn routes(content: SharedContent) -> Router {
    Router::new()
        .route("/api/v1/documents/render", get(render_document))
        .with_state(content)
}

#[derive(Debug, Deserialize)]
struct RenderQuery {
    path: String,
}

pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    // Raw HTML in a document is shown as text, never injected into the UI
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

async fn render_document(
    State(content): State<SharedContent>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedDocument>> {
    let entry = content.stat(&query.path).await?;
    let bytes = content.read(&entry.path).await?;
    let source = String::from_utf8(bytes).map_err(|_| AppError::NotText(entry.path.clone()))?;

    Ok(Json(RenderedDocument {
        html: render_markdown(&source),
        path: entry.path,
        modified: entry.modified,
    }))
}
