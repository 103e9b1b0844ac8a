use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth;
use crate::handlers::{admin, chapters, health, novels, tags};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Auth routes
        .route("/auth", post(auth::telegram_login))

        // Novel routes
        .route("/novels", get(novels::list_novels).post(novels::create_novel))
        .route("/novels/:id", get(novels::get_novel))
        .route(
            "/novels/:id/chapters/:chapter_id",
            get(chapters::get_chapter),
        )

        // Chapter routes
        .route(
            "/chapters",
            get(chapters::list_chapters).post(chapters::create_chapter),
        )

        // Tag index
        .route("/tags", get(tags::list_tags))

        // Schema setup
        .route("/init-db", post(admin::init_db))
}

/// Build the full application router.
pub fn create_app(state: AppState, cors_allowed_origins: Option<&[String]>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_allowed_origins))
        .with_state(state)
}

/// Build CORS layer from the configured origins.
///
/// If no origins are configured, defaults to permissive CORS (for development only).
fn build_cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .unwrap_or_default()
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS not set or empty, using permissive CORS (not recommended for production)"
        );
        return CorsLayer::permissive();
    }

    tracing::info!("CORS configured for origins: {:?}", origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{AuthPayload, TelegramVerifier};
    use crate::store::MemoryStore;

    const TEST_TOKEN: &str = "TEST";

    fn test_app() -> Router {
        let state = AppState::new(
            TelegramVerifier::new(TEST_TOKEN),
            Arc::new(MemoryStore::new()),
        );
        create_app(state, None)
    }

    fn sign(mut body: Value) -> Value {
        let payload = AuthPayload::from_json(body.clone()).expect("should parse");
        let hash = TelegramVerifier::new(TEST_TOKEN)
            .sign(&payload)
            .expect("should sign");
        body["hash"] = Value::String(hash);
        body
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, body)
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("valid request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    fn new_novel(title: &str, tags: &[&str]) -> Value {
        json!({
            "title": title,
            "description": "A story",
            "tags": tags,
            "totalChapters": 0,
            "author": "Anon",
            "yearStarted": 2021
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_auth_accepts_valid_signature() {
        let app = test_app();
        let user = sign(json!({
            "id": 1,
            "first_name": "Ann",
            "username": "ann",
            "auth_date": 1700000000
        }));

        let (status, body) = send(&app, post_json("/api/auth", user.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Authorization successful");
        assert_eq!(body["user"], user);
    }

    #[tokio::test]
    async fn test_auth_accepts_precomputed_hash() {
        let app = test_app();
        let user = json!({
            "id": 1,
            "first_name": "Ann",
            "hash": "fc0ce00b8d8782c4fed1c825764de1ce0f4628f75dbf24d76d7c7050705b204d"
        });

        let (status, _) = send(&app, post_json("/api/auth", user.to_string())).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_rejects_tampered_payload() {
        let app = test_app();
        let mut user = sign(json!({ "id": 1, "first_name": "Ann" }));
        user["id"] = json!(2);

        let (status, body) = send(&app, post_json("/api/auth", user.to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": "Invalid Telegram authorization" }));
    }

    #[tokio::test]
    async fn test_auth_rejects_missing_hash() {
        let app = test_app();
        let user = json!({ "id": 1, "first_name": "Ann" });

        let (status, body) = send(&app, post_json("/api/auth", user.to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": "Invalid Telegram authorization" }));
    }

    #[tokio::test]
    async fn test_auth_rejects_null_or_empty_hash() {
        let app = test_app();

        for hash in [json!(null), json!("")] {
            let user = json!({ "id": 1, "first_name": "Ann", "hash": hash.clone() });
            let (status, body) = send(&app, post_json("/api/auth", user.to_string())).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "hash {}", hash);
            assert_eq!(body, json!({ "error": "Invalid Telegram authorization" }));
        }
    }

    #[tokio::test]
    async fn test_auth_non_string_hash_is_bad_request() {
        let app = test_app();
        let user = json!({ "id": 1, "first_name": "Ann", "hash": 12345 });
        let (status, _) = send(&app, post_json("/api/auth", user.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_auth_malformed_body_is_bad_request() {
        let app = test_app();

        for body in ["not json", "[1, 2, 3]", r#"{"id": {"nested": true}, "hash": "x"}"#] {
            let (status, response) = send(&app, post_json("/api/auth", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
            assert!(response["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_create_and_list_novels() {
        let app = test_app();

        for title in ["First", "Second", "Third"] {
            let (status, body) = send(
                &app,
                post_json("/api/novels", new_novel(title, &["drama"]).to_string()),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["message"], "Novel created");
            assert_eq!(body["novel"]["title"], title);
        }

        let (status, body) = send(&app, get("/api/novels?page=1&pageSize=2")).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<_> = body
            .as_array()
            .expect("array")
            .iter()
            .map(|n| n["title"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, vec!["Third", "Second"]);

        let (_, body) = send(&app, get("/api/novels?page=2&pageSize=2")).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_invalid_page_is_bad_request() {
        let app = test_app();
        let (status, _) = send(&app, get("/api/novels?page=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, get("/api/novels?pageSize=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_huge_page_is_bad_request() {
        let app = test_app();
        let (status, body) = send(
            &app,
            get("/api/novels?page=9223372036854775807&pageSize=10"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "page is too large" }));
    }

    #[tokio::test]
    async fn test_create_novel_missing_field_is_bad_request() {
        let app = test_app();
        let (status, body) = send(&app, post_json("/api/novels", r#"{"title": "Only"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_novel_empty_title_is_bad_request() {
        let app = test_app();
        let (status, _) = send(&app, post_json("/api/novels", new_novel("", &[]).to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chapters_flow() {
        let app = test_app();
        let (_, created) = send(
            &app,
            post_json("/api/novels", new_novel("Novel", &[]).to_string()),
        )
        .await;
        let novel_id = created["novel"]["id"].as_i64().expect("id");

        for number in [2, 1] {
            let chapter = json!({
                "novelId": novel_id,
                "chapterNumber": number,
                "title": format!("Chapter {}", number),
                "text": "Once upon a time"
            });
            let (status, body) = send(&app, post_json("/api/chapters", chapter.to_string())).await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["message"], "Chapter created");
        }

        let (status, body) = send(&app, get(&format!("/api/chapters?novel_id={}", novel_id))).await;
        assert_eq!(status, StatusCode::OK);
        let numbers: Vec<_> = body
            .as_array()
            .expect("array")
            .iter()
            .map(|c| c["chapter_number"].as_i64().unwrap_or_default())
            .collect();
        assert_eq!(numbers, vec![1, 2]);

        let (status, body) = send(&app, get(&format!("/api/novels/{}", novel_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Novel");
        assert_eq!(body["chapters"].as_array().map(Vec::len), Some(2));
    }

    async fn create_chapter(app: &Router, novel_id: i64, number: i64) -> i64 {
        let chapter = json!({
            "novelId": novel_id,
            "chapterNumber": number,
            "title": format!("Chapter {}", number),
            "text": "..."
        });
        let (status, body) = send(app, post_json("/api/chapters", chapter.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        body["chapter"]["id"].as_i64().expect("id")
    }

    #[tokio::test]
    async fn test_chapter_navigation() {
        let app = test_app();
        let (_, created) = send(
            &app,
            post_json("/api/novels", new_novel("Reader", &[]).to_string()),
        )
        .await;
        let novel_id = created["novel"]["id"].as_i64().expect("id");

        let second = create_chapter(&app, novel_id, 2).await;
        let first = create_chapter(&app, novel_id, 1).await;
        let third = create_chapter(&app, novel_id, 3).await;

        let expected = [
            (first, Value::Null, json!(second)),
            (second, json!(first), json!(third)),
            (third, json!(second), Value::Null),
        ];
        for (id, prev, next) in expected {
            let (status, body) = send(
                &app,
                get(&format!("/api/novels/{}/chapters/{}", novel_id, id)),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["id"], json!(id));
            assert_eq!(body["novel_title"], "Reader");
            assert_eq!(body["prev_chapter"], prev, "chapter {}", id);
            assert_eq!(body["next_chapter"], next, "chapter {}", id);
        }
    }

    #[tokio::test]
    async fn test_unknown_chapter_is_not_found() {
        let app = test_app();
        let (_, created) = send(
            &app,
            post_json("/api/novels", new_novel("Reader", &[]).to_string()),
        )
        .await;
        let novel_id = created["novel"]["id"].as_i64().expect("id");

        let (status, body) = send(&app, get(&format!("/api/novels/{}/chapters/5", novel_id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Chapter 5 not found" }));

        let (status, _) = send(&app, get("/api/novels/1/chapters/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chapters_require_novel_id() {
        let app = test_app();
        let (status, body) = send(&app, get("/api/chapters")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Novel ID is required" }));
    }

    #[tokio::test]
    async fn test_chapter_for_unknown_novel_is_not_found() {
        let app = test_app();
        let chapter = json!({
            "novelId": 99,
            "chapterNumber": 1,
            "title": "Lost",
            "text": "..."
        });
        let (status, _) = send(&app, post_json("/api/chapters", chapter.to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_novel_is_not_found() {
        let app = test_app();
        let (status, body) = send(&app, get("/api/novels/7")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Novel 7 not found" }));
    }

    #[tokio::test]
    async fn test_tags_are_distinct_and_sorted() {
        let app = test_app();
        for (title, tags) in [("A", vec!["romance", "drama"]), ("B", vec!["drama", "action"])] {
            send(
                &app,
                post_json("/api/novels", new_novel(title, &tags).to_string()),
            )
            .await;
        }

        let (status, body) = send(&app, get("/api/tags")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["action", "drama", "romance"]));
    }

    #[tokio::test]
    async fn test_init_db() {
        let app = test_app();
        let (status, body) = send(&app, post_json("/api/init-db", Body::empty())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Database initialized" }));
    }
}
