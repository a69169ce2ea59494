//! Axum route handlers for the resume-analysis API.

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};

use crate::errors::AppError;
use crate::extraction::analyzer::analyze_resume;
use crate::models::analysis::AnalysisResponse;
use crate::routes::{effective_api_key, request_language};
use crate::state::AppState;

/// POST /api/resume/analyze
///
/// Multipart upload: `file` (the resume) and optional `roleId` (default
/// "backend"). `X-Gemini-API-Key` may override the configured key;
/// `Accept-Language` drives response localization. Extraction and transport
/// failures surface as HTTP errors; this endpoint never fabricates an
/// analysis.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut role_id = "backend".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((filename, data.to_vec()));
            }
            Some("roleId") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid roleId field: {e}")))?;
                if !value.trim().is_empty() {
                    role_id = value;
                }
            }
            _ => {} // unknown parts are ignored
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' part in upload".to_string()))?;

    let api_key = effective_api_key(&headers, &state.config);
    let language = request_language(&headers);

    let response = analyze_resume(
        &state.llm,
        &state.blueprint,
        &filename,
        &data,
        &role_id,
        api_key.as_deref(),
        &language,
    )
    .await?;

    Ok(Json(response))
}
