//! Axum route handler for PDF export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::identity::CurrentUser;
use crate::state::AppState;

const DEFAULT_FILE_NAME: &str = "resume";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    pub html: Option<String>,
    pub file_name: Option<String>,
}

/// Reduces a client-supplied name to something safe inside a quoted
/// `Content-Disposition` filename, without the extension.
pub fn sanitize_file_name(name: Option<&str>) -> String {
    let name = name.unwrap_or_default().trim();
    let name = name
        .strip_suffix(".pdf")
        .or_else(|| name.strip_suffix(".PDF"))
        .unwrap_or(name);
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '_' || c == '.');
    if cleaned.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// POST /pdf/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(request): AppJson<GeneratePdfRequest>,
) -> Result<Response, AppError> {
    let html = request
        .html
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| AppError::Validation("html is required".to_string()))?;
    let file_name = sanitize_file_name(request.file_name.as_deref());

    let bytes = state.pdf.render(&html).await?;
    info!("Generated {file_name}.pdf ({} bytes) for user {owner}", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_defaults_to_resume() {
        assert_eq!(sanitize_file_name(None), "resume");
        assert_eq!(sanitize_file_name(Some("  ")), "resume");
        assert_eq!(sanitize_file_name(Some("\"\"")), "resume");
    }

    #[test]
    fn test_file_name_strips_quotes_and_extension() {
        assert_eq!(sanitize_file_name(Some("My CV.pdf")), "My_CV");
        assert_eq!(sanitize_file_name(Some("a\"b/c")), "a_b_c");
        assert_eq!(sanitize_file_name(Some("ada-2024")), "ada-2024");
    }
}
