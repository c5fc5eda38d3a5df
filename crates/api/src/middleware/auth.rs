//! Authentication guard for the company data endpoints

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::context::SharedContext;
use crate::error::AppError;

/// Answer 401 unless a non-expired access token is stored.
pub async fn require_auth(
    State(ctx): State<SharedContext>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !ctx.tokens.is_authenticated().await {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
