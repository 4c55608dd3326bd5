//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page))
        .route(
            "/api/theme",
            get(handlers::theme::get_theme).put(handlers::theme::put_theme),
        );

    let router = Router::new()
        .merge(api_routes)
        .route(
            fakerdocs_site::SIDEBAR_TOGGLE_PATH,
            get(handlers::sidebar::toggle_sidebar),
        )
        .merge(static_files::static_router())
        .fallback(handlers::shell::render_shell)
        .layer(TraceLayer::new_for_http());

    security::with_security_headers(router).with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;
    use crate::state::test_support;

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    async fn get(router: &Router, uri: &str) -> Response {
        send(router, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    fn put_theme(theme: &str) -> Request<Body> {
        Request::put("/api/theme")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"theme":"{theme}"}}"#)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_page_renders_shell() {
        let router = create_router(test_support::state(false));

        let response = get(&router, "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert!(response.headers().contains_key("content-security-policy"));
        let html = body_text(response).await;
        assert!(html.contains("<h1>faker-api</h1>"));
        assert!(html.contains(r#"href="/" aria-current="page""#));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found_with_ok() {
        let router = create_router(test_support::state(false));

        let response = get(&router, "/no/such/page").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<title>Page Not Found | faker-api</title>"));
    }

    #[tokio::test]
    async fn test_non_get_shell_request_rejected() {
        let router = create_router(test_support::state(false));

        let response = send(
            &router,
            Request::post("/installation").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_navigation_api() {
        let router = create_router(test_support::state(false));

        let json = body_json(get(&router, "/api/navigation?path=/examples").await).await;

        let sections = json["sections"].as_array().unwrap();
        let names: Vec<_> = sections.iter().map(|s| s["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Getting Started", "Reference", "Usage", "Resources"]);
        assert_eq!(sections[2]["items"][0]["href"], "/examples");
        assert_eq!(sections[2]["items"][0]["active"], true);
        assert_eq!(sections[0]["items"][0]["active"], false);
    }

    #[tokio::test]
    async fn test_navigation_api_defaults_to_root() {
        let router = create_router(test_support::state(false));

        let json = body_json(get(&router, "/api/navigation").await).await;

        assert_eq!(json["sections"][0]["items"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_pages_api() {
        let router = create_router(test_support::state(false));

        let response = get(&router, "/api/pages/quick-start").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        let json = body_json(response).await;
        assert_eq!(json["title"], "Quick Start");
        assert_eq!(json["path"], "/quick-start");
        assert_eq!(json["matched"], true);
        assert!(json["content"].as_str().unwrap().contains("<h1>"));
    }

    #[tokio::test]
    async fn test_pages_api_root_and_unmatched() {
        let router = create_router(test_support::state(false));

        let root = body_json(get(&router, "/api/pages/").await).await;
        let missing = body_json(get(&router, "/api/pages/missing").await).await;

        assert_eq!(root["title"], "Introduction");
        assert_eq!(root["path"], "/");
        assert_eq!(missing["matched"], false);
        assert_eq!(missing["title"], "Page Not Found");
    }

    #[tokio::test]
    async fn test_encoded_path_matches_in_shell_and_api() {
        let router = create_router(test_support::state(false));

        let html = body_text(get(&router, "/quick%2Dstart").await).await;
        let json = body_json(get(&router, "/api/pages/quick%2Dstart").await).await;

        assert!(html.contains("<title>Quick Start | faker-api</title>"));
        assert!(html.contains(r#"data-path="/quick-start""#));
        assert_eq!(json["matched"], true);
        assert_eq!(json["path"], "/quick-start");
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_found() {
        let router = create_router(test_support::state(false));

        let response = get(&router, "/api/unknown").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found: /api/unknown");
    }

    #[tokio::test]
    async fn test_theme_api_round_trip() {
        let router = create_router(test_support::state(false));

        let initial = body_json(get(&router, "/api/theme").await).await;
        assert_eq!(initial["theme"], "system");
        assert_eq!(initial["storageKey"], "faker-api-theme");

        let updated = send(&router, put_theme("dark")).await;
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(body_json(updated).await["theme"], "dark");

        let html = body_text(get(&router, "/").await).await;
        assert!(html.contains(r#"<html lang="en" data-theme="dark">"#));
    }

    #[tokio::test]
    async fn test_theme_api_rejects_unknown_theme() {
        let router = create_router(test_support::state(false));

        let response = send(&router, put_theme("sepia")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("sepia"));
    }

    #[tokio::test]
    async fn test_sidebar_toggle_sets_cookie_and_redirects() {
        let router = create_router(test_support::state(false));

        let response = get(&router, "/-/sidebar/toggle?return=%2Finstallation").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/installation");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
        assert!(cookie.starts_with("fakerdocs-sidebar=open|/installation;"));

        let pair = cookie.split(';').next().unwrap();
        let page = send(
            &router,
            Request::get("/installation")
                .header(header::COOKIE, pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let html = body_text(page).await;
        assert!(html.contains(r#"<aside id="sidebar" class="sidebar open">"#));
    }

    #[tokio::test]
    async fn test_sidebar_toggle_closes_open_sidebar() {
        let router = create_router(test_support::state(false));

        let response = send(
            &router,
            Request::get("/-/sidebar/toggle?return=/")
                .header(header::COOKIE, "fakerdocs-sidebar=open|/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("fakerdocs-sidebar=closed|/;"));
    }

    #[tokio::test]
    async fn test_sidebar_sticky_across_navigation_by_default() {
        let router = create_router(test_support::state(false));

        let response = send(
            &router,
            Request::get("/examples")
                .header(header::COOKIE, "fakerdocs-sidebar=open|/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert!(!response.headers().contains_key(header::SET_COOKIE));
        assert!(body_text(response).await.contains(r#"class="sidebar open""#));
    }

    #[tokio::test]
    async fn test_sidebar_closes_on_navigation_when_enabled() {
        let router = create_router(test_support::state(true));

        let response = send(
            &router,
            Request::get("/examples")
                .header(header::COOKIE, "fakerdocs-sidebar=open|/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_owned();
        assert!(cookie.starts_with("fakerdocs-sidebar=closed|/examples;"));
        assert!(!body_text(response).await.contains(r#"class="sidebar open""#));
    }

    #[tokio::test]
    async fn test_static_assets() {
        let router = create_router(test_support::state(false));

        let css = get(&router, "/assets/shell.css").await;
        let js = get(&router, "/assets/shell.js").await;

        assert_eq!(css.status(), StatusCode::OK);
        assert_eq!(css.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
        assert_eq!(js.headers()[header::CONTENT_TYPE], "text/javascript; charset=utf-8");
    }
}
