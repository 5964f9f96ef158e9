use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::persona::Persona;
use crate::models::portfolio::Portfolio;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::store::{
    PersonaStore, PortfolioStore, ResumeStore, StoreError, StoreResult, UserStore,
    PERSONA_NAME_CONSTRAINT, PORTFOLIO_OWNER_CONSTRAINT, PORTFOLIO_SLUG_CONSTRAINT,
};

/// In-process store used by tests. Enforces the same unique constraints as the schema.
#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<Vec<Resume>>,
    personas: Mutex<Vec<Persona>>,
    portfolios: Mutex<Vec<Portfolio>>,
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    pub fn portfolio_count(&self) -> usize {
        self.portfolios.lock().unwrap().len()
    }
}

fn duplicate(constraint: &str) -> StoreError {
    StoreError::Duplicate {
        constraint: constraint.to_string(),
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert(&self, resume: &Resume) -> StoreResult<()> {
        self.resumes.lock().unwrap().push(resume.clone());
        Ok(())
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Resume>> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.user_id == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Resume>> {
        let mut found: Vec<Resume> = self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == owner)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(found)
    }

    async fn replace(&self, resume: &Resume) -> StoreResult<bool> {
        let mut resumes = self.resumes.lock().unwrap();
        match resumes
            .iter_mut()
            .find(|r| r.id == resume.id && r.user_id == resume.user_id)
        {
            Some(slot) => {
                *slot = resume.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut resumes = self.resumes.lock().unwrap();
        let before = resumes.len();
        resumes.retain(|r| !(r.id == id && r.user_id == owner));
        Ok(resumes.len() < before)
    }
}

#[async_trait]
impl PersonaStore for MemoryStore {
    async fn insert(&self, persona: &Persona) -> StoreResult<()> {
        let mut personas = self.personas.lock().unwrap();
        if personas
            .iter()
            .any(|p| p.user_id == persona.user_id && p.persona_name == persona.persona_name)
        {
            return Err(duplicate(PERSONA_NAME_CONSTRAINT));
        }
        personas.push(persona.clone());
        Ok(())
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Persona>> {
        Ok(self
            .personas
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.user_id == owner)
            .cloned())
    }

    async fn find_by_name(&self, owner: Uuid, name: &str) -> StoreResult<Option<Persona>> {
        Ok(self
            .personas
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == owner && p.persona_name == name)
            .cloned())
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Persona>> {
        let mut found: Vec<Persona> = self
            .personas
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == owner)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(found)
    }

    async fn replace(&self, persona: &Persona) -> StoreResult<bool> {
        let mut personas = self.personas.lock().unwrap();
        if personas.iter().any(|p| {
            p.id != persona.id
                && p.user_id == persona.user_id
                && p.persona_name == persona.persona_name
        }) {
            return Err(duplicate(PERSONA_NAME_CONSTRAINT));
        }
        match personas
            .iter_mut()
            .find(|p| p.id == persona.id && p.user_id == persona.user_id)
        {
            Some(slot) => {
                *slot = persona.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut personas = self.personas.lock().unwrap();
        let before = personas.len();
        personas.retain(|p| !(p.id == id && p.user_id == owner));
        Ok(personas.len() < before)
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn insert(&self, portfolio: &Portfolio) -> StoreResult<()> {
        let mut portfolios = self.portfolios.lock().unwrap();
        if portfolios.iter().any(|p| p.user_id == portfolio.user_id) {
            return Err(duplicate(PORTFOLIO_OWNER_CONSTRAINT));
        }
        if portfolios.iter().any(|p| p.slug == portfolio.slug) {
            return Err(duplicate(PORTFOLIO_SLUG_CONSTRAINT));
        }
        portfolios.push(portfolio.clone());
        Ok(())
    }

    async fn find_by_owner(&self, owner: Uuid) -> StoreResult<Option<Portfolio>> {
        Ok(self
            .portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == owner)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Portfolio>> {
        Ok(self
            .portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn replace(&self, portfolio: &Portfolio) -> StoreResult<bool> {
        let mut portfolios = self.portfolios.lock().unwrap();
        match portfolios
            .iter_mut()
            .find(|p| p.id == portfolio.id && p.user_id == portfolio.user_id)
        {
            Some(slot) => {
                slot.document = portfolio.document.clone();
                slot.updated_at = portfolio.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn set_portfolio_slug(&self, id: Uuid, slug: &str) -> StoreResult<()> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.portfolio_slug = Some(slug.to_string());
        }
        Ok(())
    }
}
