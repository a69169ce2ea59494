//! Language preference persistence via the `app_language` cookie.
//!
//! Absence of the cookie is a valid state (defaults to "en"), never an error.

use axum::http::{header, HeaderMap};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const COOKIE_NAME: &str = "app_language";
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365; // 1 year

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub language: String,
}

/// GET /api/user/language
pub async fn handle_get_language(headers: HeaderMap) -> Json<LanguagePreference> {
    let language = read_cookie(&headers, COOKIE_NAME).unwrap_or_else(|| "en".to_string());
    Json(LanguagePreference { language })
}

/// POST /api/user/language
///
/// Validates the code (2-5 lowercase ASCII letters) and sets a 1-year cookie.
pub async fn handle_set_language(
    Json(request): Json<LanguagePreference>,
) -> Result<impl IntoResponse, AppError> {
    let lang = request.language;
    if !is_valid_language_code(&lang) {
        return Err(AppError::Validation(format!(
            "Invalid language code: {lang}"
        )));
    }

    let cookie = format!("{COOKIE_NAME}={lang}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LanguagePreference { language: lang }),
    ))
}

fn is_valid_language_code(code: &str) -> bool {
    (2..=5).contains(&code.len()) && code.chars().all(|c| c.is_ascii_lowercase())
}

fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_valid_language_codes() {
        assert!(is_valid_language_code("en"));
        assert!(is_valid_language_code("hi"));
        assert!(is_valid_language_code("tagal"));
    }

    #[test]
    fn test_invalid_language_codes() {
        assert!(!is_valid_language_code(""));
        assert!(!is_valid_language_code("e"));
        assert!(!is_valid_language_code("english"));
        assert!(!is_valid_language_code("EN"));
        assert!(!is_valid_language_code("e1"));
    }

    #[test]
    fn test_read_cookie_finds_value_among_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("session=abc; app_language=fr; other=1"),
        );
        assert_eq!(read_cookie(&headers, COOKIE_NAME).as_deref(), Some("fr"));
    }

    #[test]
    fn test_read_cookie_none_when_absent() {
        assert!(read_cookie(&HeaderMap::new(), COOKIE_NAME).is_none());
    }

    #[tokio::test]
    async fn test_get_language_defaults_to_en() {
        let Json(pref) = handle_get_language(HeaderMap::new()).await;
        assert_eq!(pref.language, "en");
    }

    #[tokio::test]
    async fn test_set_language_rejects_invalid_code() {
        let result = handle_set_language(Json(LanguagePreference {
            language: "English!".to_string(),
        }))
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
