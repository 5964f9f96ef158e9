//! Axum route handlers for persona enrichment.

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enrichment::parse::{EnrichmentSource, SummaryFields};
use crate::enrichment::service::{enrich_from_resume, generate_summary, PersonaDraft, ProfileFields};
use crate::errors::{AppError, AppJson};
use crate::identity::CurrentUser;
use crate::models::persona::PersonaTemplate;
use crate::state::AppState;
use crate::validation::require;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryRequest {
    pub persona_name: Option<String>,
    pub professional_title: Option<String>,
    pub template_name: Option<String>,
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub key_skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub industry_expertise: Vec<String>,
    pub career_goals: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSummaryResponse {
    pub message: &'static str,
    pub summary: SummaryFields,
    pub source: EnrichmentSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromResumeRequest {
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FromResumeResponse {
    pub message: &'static str,
    pub persona_data: PersonaDraft,
    pub source: EnrichmentSource,
}

/// POST /persona/generate-summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    CurrentUser(_owner): CurrentUser,
    AppJson(request): AppJson<GenerateSummaryRequest>,
) -> Result<Json<GenerateSummaryResponse>, AppError> {
    let persona_name = require("personaName", request.persona_name.as_deref())?;
    let professional_title = require("professionalTitle", request.professional_title.as_deref())?;
    require("templateName", request.template_name.as_deref())?
        .parse::<PersonaTemplate>()
        .map_err(AppError::Validation)?;

    let fields = ProfileFields {
        persona_name,
        professional_title,
        years_of_experience: request.years_of_experience,
        specializations: request.specializations,
        key_skills: request.key_skills,
        achievements: request.achievements,
        industry_expertise: request.industry_expertise,
        career_goals: request.career_goals,
    };

    let (summary, source) = generate_summary(state.llm.as_ref(), &fields).await?;

    Ok(Json(GenerateSummaryResponse {
        message: "Persona summary generated successfully",
        summary,
        source,
    }))
}

/// POST /persona/from-resume
///
/// Produces a persona draft from one of the caller's resumes. Nothing is saved.
pub async fn handle_from_resume(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(request): AppJson<FromResumeRequest>,
) -> Result<Json<FromResumeResponse>, AppError> {
    let resume_id = request
        .resume_id
        .ok_or_else(|| AppError::Validation("resumeId is required".to_string()))?;

    let resume = state
        .resumes
        .find_owned(owner, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let (persona_data, source) =
        enrich_from_resume(state.llm.as_ref(), &resume, Utc::now().year()).await?;

    Ok(Json(FromResumeResponse {
        message: "Persona data extracted from resume successfully",
        persona_data,
        source,
    }))
}
