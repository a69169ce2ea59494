pub mod health;
pub mod language;

use axum::http::{header, HeaderMap};
use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment_handlers;
use crate::config::Config;
use crate::extraction::handlers as extraction_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis API
        .route(
            "/api/resume/analyze",
            post(extraction_handlers::handle_analyze_resume),
        )
        // Assessment API
        .route(
            "/api/assessment/generate",
            post(assessment_handlers::handle_generate),
        )
        .route(
            "/api/assessment/grade",
            post(assessment_handlers::handle_grade),
        )
        .route(
            "/api/links/resolve",
            get(assessment_handlers::handle_resolve_link),
        )
        // User preferences
        .route(
            "/api/user/language",
            get(language::handle_get_language).post(language::handle_set_language),
        )
        .with_state(state)
}

/// The key used for a request: the `X-Gemini-API-Key` header when present,
/// otherwise the configured key. The literal "null" (a frontend artifact)
/// counts as absent. None disables every AI path for the request.
pub fn effective_api_key(headers: &HeaderMap, config: &Config) -> Option<String> {
    headers
        .get("x-gemini-api-key")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && *v != "null")
        .map(str::to_string)
        .or_else(|| config.gemini_api_key.clone())
}

/// Primary language subtag of the first `Accept-Language` entry ("es-MX,en"
/// -> "es"). Defaults to "en".
pub fn request_language(headers: &HeaderMap) -> String {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.split(';').next())
        .and_then(|v| v.split('-').next())
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "en".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            gemini_api_key: key.map(str::to_string),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_header_key_overrides_configured_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-gemini-api-key", HeaderValue::from_static("user-key"));
        let key = effective_api_key(&headers, &config_with_key(Some("server-key")));
        assert_eq!(key.as_deref(), Some("user-key"));
    }

    #[test]
    fn test_configured_key_used_when_no_header() {
        let headers = HeaderMap::new();
        let key = effective_api_key(&headers, &config_with_key(Some("server-key")));
        assert_eq!(key.as_deref(), Some("server-key"));
    }

    #[test]
    fn test_null_string_header_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-gemini-api-key", HeaderValue::from_static("null"));
        assert!(effective_api_key(&headers, &config_with_key(None)).is_none());
    }

    #[test]
    fn test_request_language_takes_primary_subtag() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-MX,en;q=0.8"),
        );
        assert_eq!(request_language(&headers), "es");
    }

    #[test]
    fn test_request_language_defaults_to_en() {
        assert_eq!(request_language(&HeaderMap::new()), "en");
    }
}
