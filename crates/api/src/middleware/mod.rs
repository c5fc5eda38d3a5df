//! # Middleware Stack
//!
//! - [`auth`]: rejects `/api/quickbook/*` calls without a valid token.
//! - [`request_log`]: one structured log line per request.

pub mod auth;
pub mod request_log;
