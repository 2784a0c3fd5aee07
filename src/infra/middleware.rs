//! Middleware for modifying requests and responses.

use super::error::{ApiError, ClientError, InternalError};
use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

/// Puts the request id into the span of every request.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// Logs request and response bodies at trace level.
///
/// Bodies are buffered, so this must sit inside the body limit layer.
pub(crate) async fn trace_bodies(req: Request, next: Next) -> Result<Response, ApiError> {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let bytes = buffer_and_print("Request", body)
        .await
        .map_err(|e| ClientError::BadRequest(format!("failed to read request body: {e}")))?;
    let req = Request::from_parts(parts, Body::from(bytes));

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let bytes = buffer_and_print("Response", body)
        .await
        .map_err(|e| InternalError::Other(format!("failed to read response body: {e}")))?;
    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> Result<Bytes, axum::Error> {
    let body = body.collect().await?.to_bytes();

    // Log if valid text
    if let Ok(body) = std::str::from_utf8(&body) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(body)
}
