//! Collects portfolio material from every resume a user owns.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::portfolio::PortfolioProject;
use crate::models::resume::{EntryId, PersonalInfo, Resume};

/// A resume project lifted into portfolio shape, keeping its list key so the
/// client can track selections.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CandidateProject {
    pub id: Option<EntryId>,
    #[serde(flatten)]
    pub project: PortfolioProject,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMaterial {
    pub projects: Vec<CandidateProject>,
    pub skills: Vec<String>,
    pub personal_info: Option<PersonalInfo>,
    /// Project names that appeared again after their first occurrence and were skipped.
    pub dropped_duplicates: Vec<String>,
}

/// Scans `resumes` oldest-modified first, ties broken by creation time and
/// then id so the outcome never depends on store order. The first project with a given name
/// wins; skills keep first-seen order; personal info comes from the last
/// resume that has a full name.
pub fn collect_material(resumes: &[Resume]) -> PortfolioMaterial {
    let mut ordered: Vec<&Resume> = resumes.iter().collect();
    ordered.sort_by_key(|r| (r.last_modified, r.created_at, r.id));

    let mut material = PortfolioMaterial::default();
    let mut seen_projects = HashSet::new();
    let mut seen_skills = HashSet::new();

    for resume in ordered {
        let content = &resume.content;

        for project in &content.projects {
            if project.name.trim().is_empty() {
                continue;
            }
            if !seen_projects.insert(project.name.clone()) {
                if !material.dropped_duplicates.contains(&project.name) {
                    material.dropped_duplicates.push(project.name.clone());
                }
                continue;
            }
            material.projects.push(CandidateProject {
                id: project.id.clone(),
                project: PortfolioProject {
                    name: project.name.clone(),
                    description: project.description.clone(),
                    date: project.date.clone(),
                    ..Default::default()
                },
            });
        }

        for skill in &content.skills {
            if seen_skills.insert(skill.as_str()) {
                material.skills.push(skill.clone());
            }
        }

        if !content.personal_info.full_name.trim().is_empty() {
            material.personal_info = Some(content.personal_info.clone());
        }
    }

    material
}
