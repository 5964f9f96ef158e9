//! Axum route handlers for the Persona API.

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
use crate::models::persona::Persona;
use crate::personas::service::{
    create_persona, delete_persona, get_persona, list_personas, update_persona, PersonaInput,
};
use crate::render::render_persona;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PersonaResponse {
    pub message: &'static str,
    pub persona: Persona,
}

#[derive(Debug, Serialize)]
pub struct PersonaListResponse {
    pub message: &'static str,
    pub personas: Vec<Persona>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

/// POST /persona/create
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(input): AppJson<PersonaInput>,
) -> Result<(StatusCode, Json<PersonaResponse>), AppError> {
    let persona = create_persona(state.personas.as_ref(), owner, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(PersonaResponse {
            message: "Persona created successfully",
            persona,
        }),
    ))
}

/// GET /persona/user-personas
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<PersonaListResponse>, AppError> {
    let personas = list_personas(state.personas.as_ref(), owner).await?;
    Ok(Json(PersonaListResponse {
        message: "Personas fetched successfully",
        personas,
    }))
}

/// GET /persona/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PersonaResponse>, AppError> {
    let persona = get_persona(state.personas.as_ref(), owner, id).await?;
    Ok(Json(PersonaResponse {
        message: "Persona fetched successfully",
        persona,
    }))
}

/// PUT /persona/:id
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<PersonaInput>,
) -> Result<Json<PersonaResponse>, AppError> {
    let persona = update_persona(state.personas.as_ref(), owner, id, input).await?;
    Ok(Json(PersonaResponse {
        message: "Persona updated successfully",
        persona,
    }))
}

/// DELETE /persona/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_persona(state.personas.as_ref(), owner, id).await?;
    Ok(Json(MessageResponse {
        message: "Persona deleted successfully",
    }))
}

/// GET /persona/:id/preview?template=
///
/// Renders the persona as a standalone HTML page. Defaults to the stored template.
pub async fn handle_preview(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let persona = get_persona(state.personas.as_ref(), owner, id).await?;
    let template = query
        .template
        .unwrap_or_else(|| persona.template_name.to_string());
    Ok(Html(render_persona(&persona, &template)))
}
