use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Client-side list key for a resume sub-entry.
/// Only unique within its list; the editor uses it to add, remove and reorder rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub location: String,
    pub objective: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub id: Option<EntryId>,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<EntryId>,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub additional_info: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeProject {
    pub id: Option<EntryId>,
    pub name: String,
    pub date: String,
    pub description: String,
}

/// The editable body of a resume. Stored as a single JSONB document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub projects: Vec<ResumeProject>,
    pub skills: Vec<String>,
}

impl ResumeContent {
    /// Normalizes a submitted body before it is persisted:
    /// skills are trimmed and blanks dropped, and entries without a list key
    /// receive the next free numeric key of their list.
    pub fn normalize(&mut self) {
        self.skills = self
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        assign_missing_ids(self.work_experience.iter_mut().map(|e| &mut e.id));
        assign_missing_ids(self.education.iter_mut().map(|e| &mut e.id));
        assign_missing_ids(self.projects.iter_mut().map(|e| &mut e.id));
    }
}

fn assign_missing_ids<'a>(ids: impl Iterator<Item = &'a mut Option<EntryId>>) {
    let mut ids: Vec<&mut Option<EntryId>> = ids.collect();
    let mut next = ids
        .iter()
        .filter_map(|id| match id {
            Some(EntryId::Number(n)) => Some(*n),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        + 1;

    for id in ids.iter_mut().filter(|id| id.is_none()) {
        **id = Some(EntryId::Number(next));
        next += 1;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_name: String,
    pub template_name: String,
    #[serde(flatten)]
    pub content: ResumeContent,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_name: String,
    pub template_name: String,
    pub content: Json<ResumeContent>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            user_id: row.user_id,
            resume_name: row.resume_name,
            template_name: row.template_name,
            content: row.content.0,
            created_at: row.created_at,
            last_modified: row.last_modified,
        }
    }
}
