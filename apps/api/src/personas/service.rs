use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::persona::{Persona, PersonaProfile, PersonaTemplate};
use crate::store::{PersonaStore, StoreError, PERSONA_NAME_CONSTRAINT};
use crate::validation::{clean_list, max_chars, max_chars_opt, require, trimmed};

pub const PERSONA_NAME_TAKEN: &str =
    "A persona with this name already exists. Please choose a different name.";

const NAME_MAX: usize = 100;
const SHORT_TEXT_MAX: usize = 100;
const ITEM_MAX: usize = 500;
const GOALS_MAX: usize = 1000;
const SUMMARY_MAX: usize = 2000;
const UNIQUE_VALUE_MAX: usize = 1000;

/// Body of `POST /persona/create` and `PUT /persona/:id`.
/// On update every field is optional and only supplied fields are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaInput {
    pub persona_name: Option<String>,
    pub template_name: Option<String>,
    #[serde(flatten)]
    pub profile: ProfilePatch,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub professional_title: Option<String>,
    pub years_of_experience: Option<u32>,
    pub specializations: Option<Vec<String>>,
    pub key_skills: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    pub industry_expertise: Option<Vec<String>>,
    pub career_goals: Option<String>,
    pub persona_summary: Option<String>,
    pub professional_profile: Option<String>,
    pub unique_value: Option<String>,
    pub recommendations: Option<Vec<String>>,
}

impl ProfilePatch {
    /// Applies every supplied field onto `profile`, normalizing as it goes.
    fn apply(self, profile: &mut PersonaProfile) -> Result<(), AppError> {
        if let Some(v) = self.professional_title {
            profile.professional_title = trimmed(Some(v));
        }
        if let Some(v) = self.years_of_experience {
            profile.years_of_experience = Some(v);
        }
        if let Some(v) = self.specializations {
            profile.specializations = clean_list("specializations", v, SHORT_TEXT_MAX)?;
        }
        if let Some(v) = self.key_skills {
            profile.key_skills = clean_list("keySkills", v, SHORT_TEXT_MAX)?;
        }
        if let Some(v) = self.achievements {
            profile.achievements = clean_list("achievements", v, ITEM_MAX)?;
        }
        if let Some(v) = self.industry_expertise {
            profile.industry_expertise = clean_list("industryExpertise", v, SHORT_TEXT_MAX)?;
        }
        if let Some(v) = self.career_goals {
            profile.career_goals = trimmed(Some(v));
        }
        if let Some(v) = self.persona_summary {
            profile.persona_summary = trimmed(Some(v));
        }
        if let Some(v) = self.professional_profile {
            profile.professional_profile = trimmed(Some(v));
        }
        if let Some(v) = self.unique_value {
            profile.unique_value = trimmed(Some(v));
        }
        if let Some(v) = self.recommendations {
            profile.recommendations = clean_list("recommendations", v, ITEM_MAX)?;
        }

        max_chars_opt(
            "professionalTitle",
            profile.professional_title.as_deref(),
            SHORT_TEXT_MAX,
        )?;
        max_chars_opt("careerGoals", profile.career_goals.as_deref(), GOALS_MAX)?;
        max_chars_opt("personaSummary", profile.persona_summary.as_deref(), SUMMARY_MAX)?;
        max_chars_opt(
            "professionalProfile",
            profile.professional_profile.as_deref(),
            SUMMARY_MAX,
        )?;
        max_chars_opt("uniqueValue", profile.unique_value.as_deref(), UNIQUE_VALUE_MAX)?;
        Ok(())
    }
}

fn parse_template(name: &str) -> Result<PersonaTemplate, AppError> {
    name.parse().map_err(AppError::Validation)
}

fn name_conflict(err: StoreError) -> AppError {
    match err {
        StoreError::Duplicate { constraint } if constraint == PERSONA_NAME_CONSTRAINT => {
            AppError::Conflict(PERSONA_NAME_TAKEN.to_string())
        }
        other => other.into(),
    }
}

pub async fn create_persona(
    store: &dyn PersonaStore,
    owner: Uuid,
    input: PersonaInput,
) -> Result<Persona, AppError> {
    let persona_name = require("personaName", input.persona_name.as_deref())?;
    max_chars("personaName", &persona_name, NAME_MAX)?;
    let template_name = parse_template(&require("templateName", input.template_name.as_deref())?)?;

    let mut profile = PersonaProfile::default();
    input.profile.apply(&mut profile)?;

    if store.find_by_name(owner, &persona_name).await?.is_some() {
        return Err(AppError::Conflict(PERSONA_NAME_TAKEN.to_string()));
    }

    let now = Utc::now();
    let persona = Persona {
        id: Uuid::new_v4(),
        user_id: owner,
        persona_name,
        template_name,
        profile,
        created_at: now,
        last_modified: now,
    };

    // The unique index still guards against a concurrent create with the same name.
    store.insert(&persona).await.map_err(name_conflict)?;
    info!("Created persona '{}' for user {owner}", persona.persona_name);
    Ok(persona)
}

pub async fn get_persona(store: &dyn PersonaStore, owner: Uuid, id: Uuid) -> Result<Persona, AppError> {
    store
        .find_owned(owner, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Persona not found".to_string()))
}

pub async fn list_personas(store: &dyn PersonaStore, owner: Uuid) -> Result<Vec<Persona>, AppError> {
    Ok(store.list_by_owner(owner).await?)
}

pub async fn update_persona(
    store: &dyn PersonaStore,
    owner: Uuid,
    id: Uuid,
    input: PersonaInput,
) -> Result<Persona, AppError> {
    let mut persona = get_persona(store, owner, id).await?;

    if let Some(new_name) = trimmed(input.persona_name) {
        max_chars("personaName", &new_name, NAME_MAX)?;
        if new_name != persona.persona_name {
            if let Some(existing) = store.find_by_name(owner, &new_name).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(PERSONA_NAME_TAKEN.to_string()));
                }
            }
            persona.persona_name = new_name;
        }
    }
    if let Some(template) = trimmed(input.template_name) {
        persona.template_name = parse_template(&template)?;
    }
    input.profile.apply(&mut persona.profile)?;
    persona.last_modified = Utc::now();

    if !store.replace(&persona).await.map_err(name_conflict)? {
        return Err(AppError::NotFound("Persona not found".to_string()));
    }
    info!("Updated persona {id} for user {owner}");
    Ok(persona)
}

pub async fn delete_persona(store: &dyn PersonaStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    if !store.delete_owned(owner, id).await? {
        return Err(AppError::NotFound("Persona not found".to_string()));
    }
    info!("Deleted persona {id} for user {owner}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(name: &str, template: &str) -> PersonaInput {
        PersonaInput {
            persona_name: Some(name.to_string()),
            template_name: Some(template.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_same_name_rejected_for_same_owner_only() {
        let store = MemoryStore::default();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

        create_persona(&store, alice, input("Leader", "professional"))
            .await
            .unwrap();
        let err = create_persona(&store, alice, input("Leader", "creative"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        create_persona(&store, bob, input("Leader", "professional"))
            .await
            .unwrap();
    }

    #[test]
    fn test_only_the_name_index_reads_as_name_taken() {
        let taken = name_conflict(StoreError::Duplicate {
            constraint: PERSONA_NAME_CONSTRAINT.to_string(),
        });
        assert!(matches!(taken, AppError::Conflict(msg) if msg == PERSONA_NAME_TAKEN));

        let other = name_conflict(StoreError::Duplicate {
            constraint: "personas_pkey".to_string(),
        });
        assert!(matches!(other, AppError::Conflict(msg) if msg != PERSONA_NAME_TAKEN));
    }

    #[tokio::test]
    async fn test_create_requires_name_and_known_template() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        assert!(matches!(
            create_persona(&store, owner, input("  ", "professional")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            create_persona(&store, owner, input("A", "baroque")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_rechecks_name() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let first = create_persona(&store, owner, input("First", "professional"))
            .await
            .unwrap();
        create_persona(&store, owner, input("Second", "professional"))
            .await
            .unwrap();

        let renamed = update_persona(&store, owner, first.id, input("Second", "technical")).await;
        assert!(matches!(renamed, Err(AppError::Conflict(_))));

        let updated = update_persona(
            &store,
            owner,
            first.id,
            PersonaInput {
                profile: ProfilePatch {
                    key_skills: Some(vec!["Rust".into(), " ".into()]),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.persona_name, "First");
        assert_eq!(updated.template_name, PersonaTemplate::Professional);
        assert_eq!(updated.profile.key_skills, vec!["Rust"]);
        assert!(updated.last_modified >= first.last_modified);
    }

    #[tokio::test]
    async fn test_other_owner_sees_not_found() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let persona = create_persona(&store, owner, input("Mine", "creative"))
            .await
            .unwrap();
        let stranger = Uuid::new_v4();

        assert!(matches!(
            get_persona(&store, stranger, persona.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_persona(&store, stranger, persona.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(get_persona(&store, owner, persona.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_deleted_persona_leaves_listing() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        let persona = create_persona(&store, owner, input("Gone", "technical"))
            .await
            .unwrap();
        delete_persona(&store, owner, persona.id).await.unwrap();

        assert!(list_personas(&store, owner).await.unwrap().is_empty());
        assert!(matches!(
            get_persona(&store, owner, persona.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_length_is_enforced() {
        let store = MemoryStore::default();
        let mut body = input("Verbose", "professional");
        body.profile.persona_summary = Some("x".repeat(SUMMARY_MAX + 1));
        assert!(matches!(
            create_persona(&store, Uuid::new_v4(), body).await,
            Err(AppError::Validation(msg)) if msg.contains("personaSummary")
        ));
    }
}
