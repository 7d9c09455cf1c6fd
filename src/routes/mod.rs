//! API route handlers - maps HTTP endpoints to content operations.
//!
//! Each submodule defines routes for a feature area:
//! - `hub`: Content root and folder conventions (GET /api/v1/hub)
//! - `files`: List, read, create, update and delete content
//! - `documents`: Markdown rendering for the document view
//! - `prototypes`: Inlined, sandboxed prototype pages (GET /prototypes/{name})

pub mod documents;
pub mod files;
pub mod hub;
pub mod prototypes;

use axum::Router;

use crate::content::SharedContent;

pub fn create_router(content: SharedContent) -> Router {
    Router::new()
        .merge(hub::routes(content.clone()))
        .merge(files::routes(content.clone()))
        .merge(documents::routes(content.clone()))
        .merge(prototypes::routes(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::content::{ContentRepository, NewEntry};

    struct TestApp {
        _tmp: TempDir,
        content: SharedContent,
        router: Router,
    }

    struct TestResponse {
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
    }

    impl TestResponse {
        fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }

        fn text(&self) -> String {
            String::from_utf8(self.body.clone()).unwrap()
        }
    }

    fn test_app() -> TestApp {
        let tmp = TempDir::new().unwrap();
        let content = Arc::new(ContentRepository::open(tmp.path()).unwrap());
        let router = create_router(content.clone());
        TestApp { _tmp: tmp, content, router }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> TestResponse {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
            TestResponse { status, headers, body }
        }

        async fn get(&self, uri: &str) -> TestResponse {
            self.send(Request::get(uri).body(Body::empty()).unwrap()).await
        }

        async fn send_json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            self.send(request).await
        }
    }

    #[tokio::test]
    async fn create_list_and_read_document() {
        let app = test_app();

        let res = app
            .send_json(
                Method::POST,
                "/api/v1/files",
                json!({ "path": "docs and prds/plan.md", "content": "# Plan\n\n" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json(), json!({ "success": true, "message": "File created" }));

        let res = app.get("/api/v1/files?dir=docs%20and%20prds").await;
        assert_eq!(res.status, StatusCode::OK);
        let listing = res.json();
        assert_eq!(listing["type"], "directory");
        let item = &listing["items"][0];
        assert_eq!(item["name"], "plan.md");
        assert_eq!(item["path"], "docs and prds/plan.md");
        assert_eq!(item["type"], "file");
        assert_eq!(item["size"], 8);
        assert!(item["modified"].is_string());

        let res = app.get("/api/v1/files?path=docs%20and%20prds/plan.md").await;
        assert_eq!(res.json(), json!({ "type": "file", "content": "# Plan\n\n" }));
    }

    #[tokio::test]
    async fn root_listing_includes_conventional_folders() {
        let app = test_app();
        let res = app.get("/api/v1/files").await;
        let mut names: Vec<String> = res.json()["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["docs and prds", "prototypes"]);
    }

    #[tokio::test]
    async fn create_directory_twice_succeeds() {
        let app = test_app();
        for _ in 0..2 {
            let res = app
                .send_json(
                    Method::POST,
                    "/api/v1/files",
                    json!({ "path": "prototypes/demo", "isDirectory": true }),
                )
                .await;
            assert_eq!(res.status, StatusCode::OK);
            assert_eq!(res.json()["message"], "Directory created");
        }
    }

    #[tokio::test]
    async fn update_then_delete() {
        let app = test_app();

        let res = app
            .send_json(Method::PUT, "/api/v1/files", json!({ "path": "notes.md", "content": "v2" }))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json()["message"], "File updated");
        assert_eq!(app.get("/api/v1/files?path=notes.md").await.json()["content"], "v2");

        let res = app
            .send(
                Request::delete("/api/v1/files?path=notes.md")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);

        let res = app.get("/api/v1/files?path=notes.md").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.json()["error"].as_str().unwrap().contains("notes.md"));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let app = test_app();
        let res = app
            .send(Request::delete("/api/v1/files?path=nope.md").body(Body::empty()).unwrap())
            .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_and_missing_paths_are_bad_requests() {
        let app = test_app();

        let res = app
            .send_json(Method::POST, "/api/v1/files", json!({ "path": "../escape.md", "content": "x" }))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);

        let res = app.send_json(Method::POST, "/api/v1/files", json!({ "content": "x" })).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.json()["error"], "Path is required");

        let res = app.send_json(Method::PUT, "/api/v1/files", json!({ "path": "a.md" })).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);

        let res = app.get("/api/v1/files?dir=../..").await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);

        let res = app
            .send(Request::delete("/api/v1/files").body(Body::empty()).unwrap())
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reading_a_directory_conflicts() {
        let app = test_app();
        let res = app.get("/api/v1/files?path=prototypes").await;
        assert_eq!(res.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn binary_files_use_the_raw_route() {
        let app = test_app();
        let bytes = [0x89u8, 0x50, 0x4e, 0x47, 0xff];
        app.content.create("logo.png", NewEntry::File(&bytes)).await.unwrap();

        let res = app.get("/api/v1/files?path=logo.png").await;
        assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let res = app.get("/api/v1/files/raw?path=logo.png").await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(res.body, bytes);
    }

    #[tokio::test]
    async fn prototype_page_is_inlined_and_sandboxed() {
        let app = test_app();
        let files: [(&str, &str); 4] = [
            (
                "prototypes/chores/index.html",
                "<html><head><link rel=\"stylesheet\" href=\"style.css\"></head><body><script src=\"app.js\"></script><script src=\"data.js\"></script></body></html>",
            ),
            ("prototypes/chores/style.css", "body{color:red}"),
            ("prototypes/chores/app.js", "render(CHORES)"),
            ("prototypes/chores/data.js", "const CHORES = []"),
        ];
        for (path, body) in files {
            app.content.create(path, NewEntry::File(body.as_bytes())).await.unwrap();
        }

        let res = app.get("/prototypes/chores").await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.headers[header::CONTENT_SECURITY_POLICY], prototypes::PROTOTYPE_SANDBOX);
        assert!(res.headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));

        let html = res.text();
        assert!(html.contains("color:red"));
        assert!(!html.contains("href=\"style.css\""));
        assert!(html.find("const CHORES").unwrap() < html.find("render(CHORES)").unwrap());
    }

    #[tokio::test]
    async fn unknown_prototype_renders_not_found_page() {
        let app = test_app();
        for uri in ["/prototypes/missing", "/prototypes/.."] {
            let res = app.get(uri).await;
            assert_eq!(res.status, StatusCode::NOT_FOUND);
            assert!(res.text().contains("Prototype Not Found"));
        }
    }

    #[tokio::test]
    async fn document_render_returns_html() {
        let app = test_app();
        app.content
            .create("docs and prds/roadmap.md", NewEntry::File(b"# Title\n\n- [ ] task\n"))
            .await
            .unwrap();

        let res = app.get("/api/v1/documents/render?path=docs%20and%20prds/roadmap.md").await;
        assert_eq!(res.status, StatusCode::OK);
        let body = res.json();
        assert_eq!(body["path"], "docs and prds/roadmap.md");
        assert!(body["html"].as_str().unwrap().contains("<h1>Title</h1>"));

        let res = app.get("/api/v1/documents/render?path=docs%20and%20prds/none.md").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn hub_info_names_the_layout() {
        let app = test_app();
        let body = app.get("/api/v1/hub").await.json();
        assert_eq!(body["documents_dir"], "docs and prds");
        assert_eq!(body["prototypes_dir"], "prototypes");
        assert_eq!(
            body["content_root"],
            app.content.root().to_string_lossy().to_string()
        );
    }
}
