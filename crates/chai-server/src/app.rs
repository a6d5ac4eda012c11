//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::HeaderValue;
use axum::http::header::{X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::response::Redirect;
use axum::routing::get;
use chai_config::{EXERCISE_ROUTE, STATIC_ROUTE};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `static_dir` - Directory served under `/static`
pub(crate) fn create_router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    let mut router = Router::new()
        .route(EXERCISE_ROUTE, get(handlers::exercises::get_exercise))
        .nest(STATIC_ROUTE, static_router(static_dir));

    for (index, page) in state.pages.iter().enumerate() {
        router = router.route(
            &page.route,
            get(move |State(state): State<Arc<AppState>>| async move {
                handlers::pages::static_page(&state, index)
            }),
        );
    }

    for (index, page) in state.groups.iter().enumerate() {
        let route = &page.group.spec().route;
        let prefix = route.trim_end_matches('/');
        if !prefix.is_empty() {
            let index_route = prefix.to_owned();
            router = router.route(
                &format!("{prefix}/"),
                get(move || async move { Redirect::permanent(&index_route) }),
            );
        }
        router = router
            .route(
                route,
                get(move |State(state): State<Arc<AppState>>| async move {
                    handlers::docs::group_page(&state, index, "")
                }),
            )
            .route(
                &format!("{prefix}/{{*path}}"),
                get(
                    move |State(state): State<Arc<AppState>>, Path(path): Path<String>| async move {
                        handlers::docs::group_page(&state, index, &path)
                    },
                ),
            );
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
        .with_state(state)
}

/// Stylesheets compiled on demand, everything else straight from disk.
fn static_router(static_dir: PathBuf) -> Router<Arc<AppState>> {
    Router::new()
        .route("/scss/{*file}", get(handlers::styles::get_stylesheet))
        .fallback_service(ServeDir::new(static_dir))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::state::test_support;

    fn router(static_dir: PathBuf) -> Router {
        create_router(Arc::new(test_support::state()), static_dir)
    }

    async fn get_response(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        test_support::unescape_slashes(&String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn request(uri: &str) -> Response {
        let dir = tempfile::tempdir().unwrap();
        get_response(router(dir.path().to_path_buf()), uri).await
    }

    #[tokio::test]
    async fn test_home_page() {
        let response = request("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(body_string(response).await.contains("<h1>Chai</h1>"));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let response = request("/docs").await;

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_section_page() {
        let response = request("/docs/book/chapter1/section2").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<section-title>Variables</section-title>"));
        assert!(body.contains("class=\"prev\" href=\"/docs/book/chapter1/section1\""));
        assert!(body.contains("class=\"next\" href=\"/docs/book/chapter2/section1\""));
    }

    #[tokio::test]
    async fn test_group_index() {
        let response = request("/docs/book").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response)
            .await
            .contains("<title>The Chai Book | chai-lang.dev</title>"));
    }

    #[tokio::test]
    async fn test_single_file_page_route() {
        let response = request("/docs/module-schema").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Module Schema"));
    }

    #[tokio::test]
    async fn test_tour_route() {
        let response = request("/tour/chapter1").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<h1>Tour: chapter 1</h1>"));
    }

    #[tokio::test]
    async fn test_group_trailing_slash_redirects_to_index() {
        let response = request("/docs/book/").await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/docs/book");

        let response = request("/tour/").await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/tour");
    }

    #[tokio::test]
    async fn test_unknown_chapter_is_not_found() {
        let response = request("/docs/book/chapter7/section1").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_doc_path_is_not_found() {
        let response = request("/docs/book/appendix").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unrouted_path_is_not_found() {
        let response = request("/blog").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stylesheet_compiled_on_demand() {
        let response = request("/static/scss/index.scss").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
        assert_eq!(
            body_string(response).await,
            "/* compiled */\nbody { color: red; }"
        );
    }

    #[tokio::test]
    async fn test_stylesheet_errors() {
        assert_eq!(
            request("/static/scss/missing.scss").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            request("/static/scss/index.css").await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            request("/static/scss/broken.scss").await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_static_files_served_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/app.js"), "console.log(1);").unwrap();

        let response = get_response(router(dir.path().to_path_buf()), "/static/js/app.js").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "console.log(1);");
    }

    #[tokio::test]
    async fn test_exercise_with_solution() {
        let response = request("/api/guide/exercise?label=1.1").await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            json!({
                "prompt": "Say hi",
                "solution": { "url": "hello/main.chai", "src": "fn main() {}" }
            })
        );
    }

    #[tokio::test]
    async fn test_exercise_bad_label() {
        assert_eq!(
            request("/api/guide/exercise?label=one").await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            request("/api/guide/exercise").await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_exercise_not_found() {
        let response = request("/api/guide/exercise?label=9.9").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_exercise_upstream_failure() {
        let response = request("/api/guide/exercise?label=1.2").await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].as_str().unwrap().contains("exercise 1.2"));
    }
}
