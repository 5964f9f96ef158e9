use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioTheme {
    #[default]
    Dark,
    Light,
    Gradient,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioProject {
    pub name: String,
    pub description: String,
    pub date: String,
    /// Hosted image URL, if the user uploaded one.
    pub image: Option<String>,
    pub link: String,
    pub github: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

/// Editable part of a portfolio, stored as one JSONB document next to the slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioDocument {
    pub title: String,
    pub bio: Option<String>,
    pub projects: Vec<PortfolioProject>,
    pub skills: Vec<String>,
    pub social_links: SocialLinks,
    pub theme: PortfolioTheme,
    pub is_public: bool,
}

impl Default for PortfolioDocument {
    fn default() -> Self {
        PortfolioDocument {
            title: "My Portfolio".to_string(),
            bio: None,
            projects: Vec::new(),
            skills: Vec::new(),
            social_links: SocialLinks::default(),
            theme: PortfolioTheme::default(),
            is_public: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    #[serde(flatten)]
    pub document: PortfolioDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct PortfolioRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slug: String,
    pub document: Json<PortfolioDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PortfolioRow> for Portfolio {
    fn from(row: PortfolioRow) -> Self {
        Portfolio {
            id: row.id,
            user_id: row.user_id,
            slug: row.slug,
            document: row.document.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
