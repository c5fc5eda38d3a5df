//! Conversions from external infrastructure errors into domain errors.

use qbo_bridge_domain::BridgeError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BridgeError);

impl From<InfraError> for BridgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BridgeError> for InfraError {
    fn from(value: BridgeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBridgeError {
    fn into_bridge(self) -> BridgeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BridgeError */
/* -------------------------------------------------------------------------- */

impl IntoBridgeError for HttpError {
    fn into_bridge(self) -> BridgeError {
        if self.is_timeout() {
            return BridgeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BridgeError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return BridgeError::Upstream(format!("Failed to decode upstream response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => BridgeError::Auth(message),
                404 => BridgeError::NotFound(message),
                400..=499 => BridgeError::InvalidInput(message),
                _ => BridgeError::Network(message),
            };
        }

        BridgeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_bridge())
    }
}

/// Shorthand used by the HTTP adapters.
pub(crate) fn http_error(err: HttpError) -> BridgeError {
    InfraError::from(err).into()
}
