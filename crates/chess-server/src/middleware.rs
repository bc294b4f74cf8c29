//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Requests slower than this are logged as warnings.
const SLOW_REQUEST_MS: u128 = 100;

/// Logs method, path, status and duration of every request.
///
/// Server errors and slow requests are warnings, everything else is debug.
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed().as_millis();
    let status = response.status();
    if status.is_server_error() || elapsed > SLOW_REQUEST_MS {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = elapsed,
            "Request finished"
        );
    } else {
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = elapsed,
            "Request finished"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_response_passes_through() {
        let app: Router = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(middleware::from_fn(log_requests));

        let response = app
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"short and stout");
    }
}
