//! Resume text extraction. Dispatch is by filename extension, matching how
//! the upload form names its file part.

use anyhow::anyhow;

use crate::errors::AppError;

/// Extracts plain text from an uploaded resume.
///
/// Supported: `.pdf` (via pdf-extract) and `.txt` (lossy UTF-8). Anything
/// else is rejected up front; analysis must never run on garbage bytes and
/// silently succeed.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Internal(anyhow!("PDF extraction failed: {e}")))
    } else if lower.ends_with(".txt") {
        Ok(String::from_utf8_lossy(data).into_owned())
    } else {
        Err(AppError::UnprocessableEntity(format!(
            "Unsupported resume format: '{filename}'. Upload a .pdf or .txt file."
        )))
    }
}
