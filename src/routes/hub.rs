use axum::{extract::State, routing::get, Json, Router};

use crate::content::{SharedContent, DOCUMENTS_DIR, PROTOTYPES_DIR};
use crate::models::HubInfo;

pub fn routes(content: SharedContent) -> Router {
    Router::new()
        .route("/api/v1/hub", get(get_hub_info))
        .with_state(content)
}

async fn get_hub_info(State(content): State<SharedContent>) -> Json<HubInfo> {
    Json(HubInfo {
        content_root: content.root().to_string_lossy().to_string(),
        documents_dir: DOCUMENTS_DIR.to_string(),
        prototypes_dir: PROTOTYPES_DIR.to_string(),
    })
}
