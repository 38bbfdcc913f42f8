//! Axum router configuration for the cookbook server

use crate::server::handlers;
use crate::server::ServerState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(handlers::parse))
        .route("/entry", post(handlers::create_entry))
        .route("/summary", get(handlers::summary))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cookbook::Cookbook;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(ServerState::new(Cookbook::default())))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(&app(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_parse_route() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json("/parse", serde_json::json!({"input": "Skibidi spaghetti"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["msg"], "Skibidi Spaghetti");

        let (status, _) = send(&app, post_json("/parse", serde_json::json!({"input": "1234"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_entry_then_summary() {
        let app = app();
        let entries = [
            serde_json::json!({"type": "ingredient", "name": "Egg", "cookTime": 5}),
            serde_json::json!({"type": "ingredient", "name": "Flour", "cookTime": 2}),
            serde_json::json!({"type": "recipe", "name": "Batter",
                "requiredItems": [{"name": "Egg", "quantity": 2}, {"name": "Flour", "quantity": 3}]}),
            serde_json::json!({"type": "recipe", "name": "Pancake",
                "requiredItems": [{"name": "Batter", "quantity": 2}, {"name": "Egg", "quantity": 1}]}),
        ];
        for entry in entries {
            let (status, body) = send(&app, post_json("/entry", entry)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "{}");
        }

        let (status, body) = send(&app, get_request("/summary?name=Pancake")).await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Pancake",
                "cookTime": 37,
                "ingredients": [
                    {"name": "Egg", "quantity": 5},
                    {"name": "Flour", "quantity": 6}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_entry_rejections() {
        let app = app();
        let egg = serde_json::json!({"type": "ingredient", "name": "Egg", "cookTime": 5});
        assert_eq!(send(&app, post_json("/entry", egg.clone())).await.0, StatusCode::OK);

        let (status, body) = send(&app, post_json("/entry", egg)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("already exists"));

        let negative = serde_json::json!({"type": "ingredient", "name": "Ice", "cookTime": -1});
        assert_eq!(send(&app, post_json("/entry", negative)).await.0, StatusCode::BAD_REQUEST);

        let duplicated = serde_json::json!({"type": "recipe", "name": "Omelette",
            "requiredItems": [{"name": "Egg", "quantity": 1}, {"name": "Egg", "quantity": 2}]});
        assert_eq!(send(&app, post_json("/entry", duplicated)).await.0, StatusCode::BAD_REQUEST);

        let bad_type = serde_json::json!({"type": "utensil", "name": "Spoon"});
        assert_eq!(send(&app, post_json("/entry", bad_type)).await.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests() {
        let app = app();

        let wrong_type =
            serde_json::json!({"type": "ingredient", "name": "Egg", "cookTime": "five"});
        let (status, body) = send(&app, post_json("/entry", wrong_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Error: malformed body"));

        let not_json = Request::builder()
            .method("POST")
            .uri("/entry")
            .header("content-type", "application/json")
            .body(Body::from("{\"type\": \"ingredient\","))
            .unwrap();
        assert_eq!(send(&app, not_json).await.0, StatusCode::BAD_REQUEST);

        let no_content_type = Request::builder()
            .method("POST")
            .uri("/parse")
            .body(Body::from("{\"input\": \"Egg\"}"))
            .unwrap();
        assert_eq!(send(&app, no_content_type).await.0, StatusCode::BAD_REQUEST);

        // 失敗的請求不會留下任何條目
        let (status, _) = send(&app, get_request("/summary?name=Egg")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_summary_failures() {
        let app = app();
        let entries = [
            serde_json::json!({"type": "ingredient", "name": "Egg", "cookTime": 5}),
            serde_json::json!({"type": "recipe", "name": "Mystery",
                "requiredItems": [{"name": "Dragon", "quantity": 1}]}),
            serde_json::json!({"type": "recipe", "name": "Loop",
                "requiredItems": [{"name": "Loop", "quantity": 1}]}),
        ];
        for entry in entries {
            assert_eq!(send(&app, post_json("/entry", entry)).await.0, StatusCode::OK);
        }

        let (status, body) = send(&app, get_request("/summary?name=Waffle")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("not found"));

        assert_eq!(send(&app, get_request("/summary?name=Egg")).await.0, StatusCode::BAD_REQUEST);
        assert_eq!(send(&app, get_request("/summary")).await.0, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get_request("/summary?name=Mystery")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Recipe contains unknown items");

        let (status, body) = send(&app, get_request("/summary?name=Loop")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Recipe requires itself");
    }
}
