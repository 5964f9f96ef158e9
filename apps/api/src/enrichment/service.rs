use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::enrichment::experience::years_of_experience;
use crate::enrichment::parse::{lenient_list, Enrichment, EnrichmentSource, SummaryFields};
use crate::enrichment::prompts::{build_resume_prompt, build_summary_prompt};
use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_COACH_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::resume::Resume;

/// Structured profile input for the summary prompt.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub persona_name: String,
    pub professional_title: String,
    pub years_of_experience: Option<u32>,
    pub specializations: Vec<String>,
    pub key_skills: Vec<String>,
    pub achievements: Vec<String>,
    pub industry_expertise: Vec<String>,
    pub career_goals: Option<String>,
}

/// Full persona field set produced from a resume. Not persisted here; the client
/// merges it into the editor and saves it like any other persona.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDraft {
    pub persona_name: String,
    pub professional_title: String,
    pub years_of_experience: u32,
    pub specializations: Vec<String>,
    pub key_skills: Vec<String>,
    pub achievements: Vec<String>,
    pub industry_expertise: Vec<String>,
    pub career_goals: String,
    pub persona_summary: String,
    pub unique_value: String,
    pub recommendations: Vec<String>,
}

/// What the model returns for a resume. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DraftResponse {
    persona_name: Option<String>,
    professional_title: Option<String>,
    #[serde(deserialize_with = "lenient_years")]
    years_of_experience: Option<u32>,
    #[serde(deserialize_with = "lenient_list")]
    specializations: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list")]
    key_skills: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list")]
    achievements: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list")]
    industry_expertise: Option<Vec<String>>,
    career_goals: Option<String>,
    persona_summary: Option<String>,
    unique_value: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    recommendations: Option<Vec<String>>,
}

/// Accepts `7`, `7.5` or `"7 years"`; anything else reads as absent.
fn lenient_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u32),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .and_then(|digits| digits.parse().ok()),
        _ => None,
    })
}

fn text_or(value: Option<String>, fallback: String) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

fn list_or(value: Option<Vec<String>>, fallback: Vec<String>) -> Vec<String> {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn non_blank(values: impl Iterator<Item = String>) -> Vec<String> {
    values
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Field set derived from the resume alone, used wherever the model is silent.
pub fn derive_from_resume(resume: &Resume, current_year: i32) -> PersonaDraft {
    let content = &resume.content;
    PersonaDraft {
        persona_name: String::new(),
        professional_title: content.personal_info.job_title.trim().to_string(),
        years_of_experience: years_of_experience(&content.work_experience, current_year),
        specializations: non_blank(content.education.iter().map(|e| e.field.clone())),
        key_skills: content.skills.clone(),
        achievements: non_blank(content.work_experience.iter().map(|w| w.description.clone())),
        industry_expertise: Vec::new(),
        career_goals: String::new(),
        persona_summary: String::new(),
        unique_value: String::new(),
        recommendations: Vec::new(),
    }
}

fn merge_draft(enrichment: Enrichment<DraftResponse>, base: PersonaDraft) -> PersonaDraft {
    match enrichment {
        Enrichment::Structured(ai) => PersonaDraft {
            persona_name: text_or(ai.persona_name, base.persona_name),
            professional_title: text_or(ai.professional_title, base.professional_title),
            years_of_experience: ai.years_of_experience.unwrap_or(base.years_of_experience),
            specializations: list_or(ai.specializations, base.specializations),
            key_skills: list_or(ai.key_skills, base.key_skills),
            achievements: list_or(ai.achievements, base.achievements),
            industry_expertise: list_or(ai.industry_expertise, base.industry_expertise),
            career_goals: text_or(ai.career_goals, base.career_goals),
            persona_summary: text_or(ai.persona_summary, base.persona_summary),
            unique_value: text_or(ai.unique_value, base.unique_value),
            recommendations: list_or(ai.recommendations, base.recommendations),
        },
        Enrichment::Fallback(raw) => PersonaDraft {
            persona_summary: raw,
            ..base
        },
    }
}

/// One generator call for the three narrative fields.
pub async fn generate_summary(
    llm: &dyn TextGenerator,
    fields: &ProfileFields,
) -> Result<(SummaryFields, EnrichmentSource), AppError> {
    let prompt = build_summary_prompt(fields);
    let raw = llm.generate(&prompt, CAREER_COACH_SYSTEM).await?;

    let enrichment = Enrichment::<SummaryFields>::parse(&raw);
    let source = enrichment.source();
    info!(
        "Generated persona summary for '{}' ({source:?})",
        fields.persona_name
    );
    Ok((enrichment.into(), source))
}

/// One generator call that turns a resume into a full persona draft.
/// The result is a snapshot; later resume edits are not tracked.
pub async fn enrich_from_resume(
    llm: &dyn TextGenerator,
    resume: &Resume,
    current_year: i32,
) -> Result<(PersonaDraft, EnrichmentSource), AppError> {
    let base = derive_from_resume(resume, current_year);
    let prompt = build_resume_prompt(resume, base.years_of_experience);
    let raw = llm.generate(&prompt, CAREER_COACH_SYSTEM).await?;

    let enrichment = Enrichment::<DraftResponse>::parse(&raw);
    let source = enrichment.source();
    info!("Extracted persona draft from resume {} ({source:?})", resume.id);
    Ok((merge_draft(enrichment, base), source))
}
