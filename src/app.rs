//! The HTTP application.
//!
//! Routes are served at the root: `/todos`, `/healthz` and `/openapi.json`.

use crate::{
    feature::{health::health_api, todo::todo_api},
    infra::{
        config::ServerConfig,
        database::DbPool,
        error::PanicHandler,
        extract::Json,
        middleware::{trace_bodies, MakeRequestIdSpan},
        openapi::ApiDoc,
        shutdown::shutdown_signal,
        state::AppState,
    },
};
use axum::{routing::get, Router};
use http::StatusCode;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

/// Constructs the full axum application.
///
/// A request that times out has its handler dropped, which also aborts
/// any database call it was waiting on.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(health_api::routes())
        .merge(todo_api::routes())
        .route("/openapi.json", get(openapi))
        .with_state(state)
        // Layers
        .layer(axum::middleware::from_fn(trace_bodies))
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(ConcurrencyLimitLayer::new(config.concurrency_limit))
        .layer(CatchPanicLayer::custom(PanicHandler))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Starts the axum server.
pub async fn run_app(
    listener: TcpListener,
    db: DbPool,
    config: ServerConfig,
) -> std::io::Result<()> {
    let app = app(AppState::new(db), &config);
    tracing::info!("Starting axum on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(test)]
fn test_config() -> ServerConfig {
    ServerConfig {
        http_address: "127.0.0.1".to_string(),
        http_port: 0,
        request_timeout: std::time::Duration::from_secs(5),
        concurrency_limit: 10,
        body_limit: 1024,
    }
}

#[cfg(test)]
pub(crate) fn test_app(db: DbPool) -> Router {
    app(AppState::new(db), &test_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{feature::health::health_api::Health, infra::database::test_db};
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_says_ok() {
        let app = test_app(test_db().await);
        let req = Request::get("/healthz").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let body = res.into_body().collect().await.unwrap().to_bytes();
        let health: Health = serde_json::from_slice(&body).unwrap();
        assert_eq!("OK", health.message());
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let app = test_app(test_db().await);
        let req = Request::get("/healthz").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = test_app(test_db().await);
        let req = Request::get("/openapi.json").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
        let body = res.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/todos"].is_object());
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let app = test_app(test_db().await);
        let body = format!(r#"{{"subject": "{}"}}"#, "x".repeat(4096));
        let req = Request::post("/todos")
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len())
            .body(Body::from(body))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, res.status());
    }

    #[tokio::test]
    async fn timed_out_requests_give_back_their_connection() {
        let db = test_db().await;
        let config = ServerConfig {
            request_timeout: Duration::from_millis(100),
            ..test_config()
        };
        let app = app(AppState::new(db.clone()), &config);

        // The pool has a single connection, so the request has to wait for it.
        let held = db.acquire().await.unwrap();
        let started = Instant::now();
        let req = Request::get("/todos").body(Body::empty()).unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(StatusCode::REQUEST_TIMEOUT, res.status());
        assert!(started.elapsed() < Duration::from_secs(2));
        drop(held);

        let req = Request::get("/todos").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
    }

    #[tokio::test]
    async fn unknown_routes_are_404() {
        let app = test_app(test_db().await);
        let req = Request::get("/nope").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }
}
