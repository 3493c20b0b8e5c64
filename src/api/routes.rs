//! API Routes
//!
//! Configures the Axum router with all listing service endpoints.

use axum::{
    handler::Handler,
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_metrics, create_property, delete_property, health_handler, list_properties,
    update_property, AppState,
};
use super::response_cache::cache_page;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties` - List every property (response cached for 15 minutes)
/// - `POST /properties` - Create a property
/// - `PUT /properties/:id` - Replace a property
/// - `DELETE /properties/:id` - Delete a property
/// - `GET /cache-metrics` - Cache hit/miss metrics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cached_list =
        list_properties.layer(middleware::from_fn_with_state(state.clone(), cache_page));

    Router::new()
        .route("/properties", get(cached_list).post(create_property))
        .route(
            "/properties/:id",
            put(update_property).delete(delete_property),
        )
        .route("/cache-metrics", get(cache_metrics))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::db::InMemoryPropertyRepository;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            CacheStore::new(100, 300),
            Arc::new(InMemoryPropertyRepository::new()),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint_sets_cache_control() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "max-age=900"
        );
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache-metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_missing_property() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/properties/77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
