//! Application constants
//!
//! Centralized location for the platform endpoints and protocol values used
//! throughout the application.

// OAuth endpoints
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://appcenter.intuit.com/connect/oauth2";
pub const DEFAULT_TOKEN_ENDPOINT: &str =
    "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";

/// Scopes requested during the authorization-code flow.
pub const OAUTH_SCOPES: [&str; 6] = [
    "app-foundations.custom-field-definitions.read",
    "app-foundations.custom-field-definitions",
    "com.intuit.quickbooks.accounting",
    "openid",
    "profile",
    "email",
];

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

// Accounting platform endpoints
pub const DEFAULT_REST_BASE_URL: &str = "https://quickbooks.api.intuit.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://qb.api.intuit.com/graphql";
pub const DEFAULT_MINOR_VERSION: u32 = 75;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Header carrying the company (realm) id on GraphQL requests.
pub const REALM_ID_HEADER: &str = "intuit-realm-id";

// HTTP surface
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PAGES_DIR: &str = "pages";
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Body key under which custom field payloads are attached to entities.
pub const CUSTOM_FIELD_KEY: &str = "CustomField";
