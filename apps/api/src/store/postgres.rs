use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::persona::{Persona, PersonaRow};
use crate::models::portfolio::{Portfolio, PortfolioRow};
use crate::models::resume::{Resume, ResumeRow};
use crate::models::user::User;
use crate::store::{
    PersonaStore, PortfolioStore, ResumeStore, StoreError, StoreResult, UserStore,
};

/// Postgres-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns unique-constraint violations into `StoreError::Duplicate`.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate {
                constraint: db_err.constraint().unwrap_or("unique").to_string(),
            };
        }
    }
    StoreError::Database(err)
}

fn persona_from_row(row: PersonaRow) -> StoreResult<Persona> {
    let id = row.id;
    Persona::try_from(row).map_err(|e| StoreError::Corrupt(format!("persona {id}: {e}")))
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert(&self, resume: &Resume) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO resumes
                (id, user_id, resume_name, template_name, content, created_at, last_modified)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(&resume.resume_name)
        .bind(&resume.template_name)
        .bind(Json(&resume.content))
        .bind(resume.created_at)
        .bind(resume.last_modified)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        info!("Inserted resume {} for user {}", resume.id, resume.user_id);
        Ok(())
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Resume>> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Resume>> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY last_modified DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn replace(&self, resume: &Resume) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET resume_name = $1, template_name = $2, content = $3, last_modified = $4
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(&resume.resume_name)
        .bind(&resume.template_name)
        .bind(Json(&resume.content))
        .bind(resume.last_modified)
        .bind(resume.id)
        .bind(resume.user_id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl PersonaStore for PgStore {
    async fn insert(&self, persona: &Persona) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO personas
                (id, user_id, persona_name, template_name, profile, created_at, last_modified)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(persona.id)
        .bind(persona.user_id)
        .bind(&persona.persona_name)
        .bind(persona.template_name.as_str())
        .bind(Json(&persona.profile))
        .bind(persona.created_at)
        .bind(persona.last_modified)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        info!("Inserted persona {} for user {}", persona.id, persona.user_id);
        Ok(())
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Persona>> {
        sqlx::query_as::<_, PersonaRow>("SELECT * FROM personas WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .map(persona_from_row)
            .transpose()
    }

    async fn find_by_name(&self, owner: Uuid, name: &str) -> StoreResult<Option<Persona>> {
        sqlx::query_as::<_, PersonaRow>(
            "SELECT * FROM personas WHERE user_id = $1 AND persona_name = $2",
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .map(persona_from_row)
        .transpose()
    }

    async fn list_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Persona>> {
        sqlx::query_as::<_, PersonaRow>(
            "SELECT * FROM personas WHERE user_id = $1 ORDER BY last_modified DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(persona_from_row)
        .collect()
    }

    async fn replace(&self, persona: &Persona) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE personas
            SET persona_name = $1, template_name = $2, profile = $3, last_modified = $4
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(&persona.persona_name)
        .bind(persona.template_name.as_str())
        .bind(Json(&persona.profile))
        .bind(persona.last_modified)
        .bind(persona.id)
        .bind(persona.user_id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_owned(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM personas WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl PortfolioStore for PgStore {
    async fn insert(&self, portfolio: &Portfolio) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO portfolios (id, user_id, slug, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(portfolio.id)
        .bind(portfolio.user_id)
        .bind(&portfolio.slug)
        .bind(Json(&portfolio.document))
        .bind(portfolio.created_at)
        .bind(portfolio.updated_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        info!(
            "Inserted portfolio {} ({}) for user {}",
            portfolio.id, portfolio.slug, portfolio.user_id
        );
        Ok(())
    }

    async fn find_by_owner(&self, owner: Uuid) -> StoreResult<Option<Portfolio>> {
        let row = sqlx::query_as::<_, PortfolioRow>("SELECT * FROM portfolios WHERE user_id = $1")
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Portfolio::from))
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Portfolio>> {
        let row = sqlx::query_as::<_, PortfolioRow>("SELECT * FROM portfolios WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Portfolio::from))
    }

    async fn replace(&self, portfolio: &Portfolio) -> StoreResult<bool> {
        // slug never changes after publishing
        let result = sqlx::query(
            "UPDATE portfolios SET document = $1, updated_at = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(Json(&portfolio.document))
        .bind(portfolio.updated_at)
        .bind(portfolio.id)
        .bind(portfolio.user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set_portfolio_slug(&self, id: Uuid, slug: &str) -> StoreResult<()> {
        sqlx::query("UPDATE users SET portfolio_slug = $1 WHERE id = $2")
            .bind(slug)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
