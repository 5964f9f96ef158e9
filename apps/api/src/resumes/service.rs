use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    Education, PersonalInfo, Resume, ResumeContent, ResumeProject, WorkExperience,
};
use crate::store::ResumeStore;
use crate::validation::{max_chars, require, trimmed};

const NAME_MAX: usize = 100;

/// Body of `POST /resume/create` and `PUT /resume/:id`.
/// Each supplied top-level field replaces the stored one wholesale.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub resume_name: Option<String>,
    pub template_name: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub work_experience: Option<Vec<WorkExperience>>,
    pub education: Option<Vec<Education>>,
    pub projects: Option<Vec<ResumeProject>>,
    pub skills: Option<Vec<String>>,
}

impl ResumeInput {
    fn apply_content(&mut self, content: &mut ResumeContent) {
        if let Some(v) = self.personal_info.take() {
            content.personal_info = v;
        }
        if let Some(v) = self.work_experience.take() {
            content.work_experience = v;
        }
        if let Some(v) = self.education.take() {
            content.education = v;
        }
        if let Some(v) = self.projects.take() {
            content.projects = v;
        }
        if let Some(v) = self.skills.take() {
            content.skills = v;
        }
        content.normalize();
    }
}

pub async fn create_resume(
    store: &dyn ResumeStore,
    owner: Uuid,
    mut input: ResumeInput,
) -> Result<Resume, AppError> {
    let resume_name = require("resumeName", input.resume_name.as_deref())?;
    max_chars("resumeName", &resume_name, NAME_MAX)?;
    let template_name = require("templateName", input.template_name.as_deref())?;

    let mut content = ResumeContent::default();
    input.apply_content(&mut content);

    let now = Utc::now();
    let resume = Resume {
        id: Uuid::new_v4(),
        user_id: owner,
        resume_name,
        template_name,
        content,
        created_at: now,
        last_modified: now,
    };
    store.insert(&resume).await?;
    info!("Created resume '{}' for user {owner}", resume.resume_name);
    Ok(resume)
}

pub async fn get_resume(store: &dyn ResumeStore, owner: Uuid, id: Uuid) -> Result<Resume, AppError> {
    store
        .find_owned(owner, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

pub async fn list_resumes(store: &dyn ResumeStore, owner: Uuid) -> Result<Vec<Resume>, AppError> {
    Ok(store.list_by_owner(owner).await?)
}

pub async fn update_resume(
    store: &dyn ResumeStore,
    owner: Uuid,
    id: Uuid,
    mut input: ResumeInput,
) -> Result<Resume, AppError> {
    let mut resume = get_resume(store, owner, id).await?;

    if let Some(name) = trimmed(input.resume_name.take()) {
        max_chars("resumeName", &name, NAME_MAX)?;
        resume.resume_name = name;
    }
    if let Some(template) = trimmed(input.template_name.take()) {
        resume.template_name = template;
    }
    input.apply_content(&mut resume.content);
    resume.last_modified = Utc::now();

    // Last write wins; there is no version check between concurrent editors.
    if !store.replace(&resume).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    info!("Updated resume {id} for user {owner}");
    Ok(resume)
}

pub async fn delete_resume(store: &dyn ResumeStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    if !store.delete_owned(owner, id).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    info!("Deleted resume {id} for user {owner}");
    Ok(())
}
