//! # Static Page Routes
//!
//! - `GET /`              - `{pages_dir}/index.html`
//! - `GET /pages/{*path}` - any file under `pages_dir`
//!
//! Paths containing `..` are never resolved.

use std::path::Path as FsPath;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::context::SharedContext;
use crate::error::AppError;

pub fn router() -> Router<SharedContext> {
    Router::new().route("/", get(index)).route("/pages/{*path}", get(asset))
}

async fn index(State(ctx): State<SharedContext>) -> Result<Response, AppError> {
    let path = FsPath::new(&ctx.config.server.pages_dir).join("index.html");

    match tokio::fs::read(&path).await {
        Ok(contents) => {
            Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], contents).into_response())
        }
        Err(_) => Err(AppError::Text(StatusCode::NOT_FOUND, "index.html not found".to_string())),
    }
}

async fn asset(
    State(ctx): State<SharedContext>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    let missing = || AppError::Text(StatusCode::NOT_FOUND, "File not found".to_string());

    if path.contains("..") {
        return Err(missing());
    }

    let file = FsPath::new(&ctx.config.server.pages_dir).join(path.trim_start_matches('/'));
    let contents = tokio::fs::read(&file).await.map_err(|_| missing())?;

    Ok(([(header::CONTENT_TYPE, content_type(&file))], contents).into_response())
}

fn content_type(file: &FsPath) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type(FsPath::new("pages/app.css")), "text/css; charset=utf-8");
        assert_eq!(
            content_type(FsPath::new("pages/app.js")),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type(FsPath::new("pages/readme.md")), "text/plain; charset=utf-8");
        assert_eq!(content_type(FsPath::new("pages/LICENSE")), "text/plain; charset=utf-8");
    }
}
