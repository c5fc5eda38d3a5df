//! Request outcome logging

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::utils::logging::log_request_outcome;

/// Log method, path, status and duration of every request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    log_request_outcome(method.as_str(), &path, response.status().as_u16(), start.elapsed());
    response
}
