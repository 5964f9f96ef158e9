use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Fixed set of persona layouts a user can pick when saving a persona.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PersonaTemplate {
    #[default]
    Professional,
    Creative,
    Technical,
    Leadership,
    Entrepreneur,
}

impl PersonaTemplate {
    pub const ALL: [PersonaTemplate; 5] = [
        PersonaTemplate::Professional,
        PersonaTemplate::Creative,
        PersonaTemplate::Technical,
        PersonaTemplate::Leadership,
        PersonaTemplate::Entrepreneur,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaTemplate::Professional => "professional",
            PersonaTemplate::Creative => "creative",
            PersonaTemplate::Technical => "technical",
            PersonaTemplate::Leadership => "leadership",
            PersonaTemplate::Entrepreneur => "entrepreneur",
        }
    }
}

impl fmt::Display for PersonaTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "templateName must be one of: {}",
                    PersonaTemplate::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

/// Everything a persona holds besides its identity, name and template.
/// The last four fields are normally written by the enrichment flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaProfile {
    pub professional_title: Option<String>,
    pub years_of_experience: Option<u32>,
    pub specializations: Vec<String>,
    pub key_skills: Vec<String>,
    pub achievements: Vec<String>,
    pub industry_expertise: Vec<String>,
    pub career_goals: Option<String>,
    pub persona_summary: Option<String>,
    pub professional_profile: Option<String>,
    pub unique_value: Option<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: Uuid,
    pub user_id: Uuid,
    pub persona_name: String,
    pub template_name: PersonaTemplate,
    #[serde(flatten)]
    pub profile: PersonaProfile,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct PersonaRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub persona_name: String,
    pub template_name: String,
    pub profile: Json<PersonaProfile>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl TryFrom<PersonaRow> for Persona {
    type Error = String;

    fn try_from(row: PersonaRow) -> Result<Self, Self::Error> {
        Ok(Persona {
            id: row.id,
            user_id: row.user_id,
            persona_name: row.persona_name,
            template_name: row.template_name.parse()?,
            profile: row.profile.0,
            created_at: row.created_at,
            last_modified: row.last_modified,
        })
    }
}
