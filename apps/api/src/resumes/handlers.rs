//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::identity::CurrentUser;
use crate::models::resume::Resume;
use crate::render::render_resume;
use crate::resumes::service::{
    create_resume, delete_resume, get_resume, list_resumes, update_resume, ResumeInput,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub message: &'static str,
    pub resume: Resume,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub message: &'static str,
    pub resumes: Vec<Resume>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

/// POST /resume/create
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(input): AppJson<ResumeInput>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let resume = create_resume(state.resumes.as_ref(), owner, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ResumeResponse {
            message: "Resume created successfully",
            resume,
        }),
    ))
}

/// GET /resume/user-resumes
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = list_resumes(state.resumes.as_ref(), owner).await?;
    Ok(Json(ResumeListResponse {
        message: "Resumes fetched successfully",
        resumes,
    }))
}

/// GET /resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = get_resume(state.resumes.as_ref(), owner, id).await?;
    Ok(Json(ResumeResponse {
        message: "Resume fetched successfully",
        resume,
    }))
}

/// PUT /resume/:id
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<ResumeInput>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = update_resume(state.resumes.as_ref(), owner, id, input).await?;
    Ok(Json(ResumeResponse {
        message: "Resume updated successfully",
        resume,
    }))
}

/// DELETE /resume/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_resume(state.resumes.as_ref(), owner, id).await?;
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully",
    }))
}

/// GET /resume/:id/preview?template=
pub async fn handle_preview(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let resume = get_resume(state.resumes.as_ref(), owner, id).await?;
    let template = query
        .template
        .unwrap_or_else(|| resume.template_name.clone());
    Ok(Html(render_resume(&resume, &template)))
}
