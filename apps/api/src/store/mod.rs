//! Document storage seams.
//!
//! Each entity lives in its own table keyed by an opaque UUID plus the owner
//! reference. Handlers only see these traits; `PgStore` backs them in
//! production and `MemoryStore` in tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::persona::Persona;
use crate::models::portfolio::Portfolio;
use crate::models::resume::Resume;
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key violates {constraint}")]
    Duplicate { constraint: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document no longer matches the current schema.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert(&self, resume: &Resume) -> StoreResult<()>;
    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Resume>>;
    /// Most recently modified first.
    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Resume>>;
    /// Overwrites the stored record. Returns false if it no longer exists.
    async fn replace(&self, resume: &Resume) -> StoreResult<bool>;
    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait PersonaStore: Send + Sync {
    async fn insert(&self, persona: &Persona) -> StoreResult<()>;
    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Persona>>;
    async fn find_by_name(&self, owner: Uuid, name: &str) -> StoreResult<Option<Persona>>;
    /// Most recently modified first.
    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Persona>>;
    async fn replace(&self, persona: &Persona) -> StoreResult<bool>;
    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn insert(&self, portfolio: &Portfolio) -> StoreResult<()>;
    async fn find_by_owner(&self, owner: Uuid) -> StoreResult<Option<Portfolio>>;
    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Portfolio>>;
    async fn replace(&self, portfolio: &Portfolio) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn set_portfolio_slug(&self, id: Uuid, slug: &str) -> StoreResult<()>;
}

pub const PERSONA_NAME_CONSTRAINT: &str = "personas_user_name_key";
pub const PORTFOLIO_OWNER_CONSTRAINT: &str = "portfolios_user_key";
pub const PORTFOLIO_SLUG_CONSTRAINT: &str = "portfolios_slug_key";
