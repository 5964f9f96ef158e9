use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::portfolio::{Portfolio, PortfolioDocument, PortfolioProject, PortfolioTheme, SocialLinks};
use crate::models::user::PublicUser;
use crate::portfolio::slug::generate_slug;
use crate::store::{
    PortfolioStore, StoreError, UserStore, PORTFOLIO_OWNER_CONSTRAINT, PORTFOLIO_SLUG_CONSTRAINT,
};
use crate::validation::{clean_list, max_chars, max_chars_opt, trimmed};

const TITLE_MAX: usize = 100;
const BIO_MAX: usize = 500;
const PROJECT_NAME_MAX: usize = 100;
const PROJECT_DESCRIPTION_MAX: usize = 1000;
const PROJECT_DATE_MAX: usize = 50;
const PROJECT_URL_MAX: usize = 200;
const SKILL_MAX: usize = 100;

/// Body of `POST /portfolio/create`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioInput {
    pub projects: Option<Vec<PortfolioProject>>,
    pub skills: Option<Vec<String>>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<SocialLinks>,
}

/// Body of `PUT /portfolio/update`. `bio` distinguishes an omitted field
/// (keep) from an explicit `null` (clear).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioInput {
    pub projects: Option<Vec<PortfolioProject>>,
    pub skills: Option<Vec<String>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub bio: Option<Option<String>>,
    pub social_links: Option<SocialLinks>,
    pub theme: Option<PortfolioTheme>,
    pub is_public: Option<bool>,
}

/// Wraps whatever was supplied, `null` included, in `Some`. Combined with
/// `#[serde(default)]` an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A published portfolio as served on its public page.
#[derive(Debug, Serialize)]
pub struct PublicPortfolio {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub user: Option<PublicUser>,
}

fn clean_projects(projects: Vec<PortfolioProject>) -> Result<Vec<PortfolioProject>, AppError> {
    projects
        .into_iter()
        .enumerate()
        .map(|(i, mut p)| {
            p.name = p.name.trim().to_string();
            if p.name.is_empty() {
                return Err(AppError::Validation(format!("projects[{i}].name is required")));
            }
            p.description = p.description.trim().to_string();
            p.date = p.date.trim().to_string();
            p.link = p.link.trim().to_string();
            p.github = p.github.trim().to_string();
            p.image = trimmed(p.image);
            max_chars("project name", &p.name, PROJECT_NAME_MAX)?;
            max_chars("project description", &p.description, PROJECT_DESCRIPTION_MAX)?;
            max_chars("project date", &p.date, PROJECT_DATE_MAX)?;
            max_chars("project link", &p.link, PROJECT_URL_MAX)?;
            max_chars("project github", &p.github, PROJECT_URL_MAX)?;
            p.technologies = clean_list("technologies", p.technologies, SKILL_MAX)?;
            Ok(p)
        })
        .collect()
}

fn clean_bio(bio: Option<String>) -> Result<Option<String>, AppError> {
    let bio = trimmed(bio);
    max_chars_opt("bio", bio.as_deref(), BIO_MAX)?;
    Ok(bio)
}

/// Creates the caller's one portfolio. A second call reports the existing slug
/// instead of writing anything.
pub async fn create_portfolio(
    portfolios: &dyn PortfolioStore,
    users: &dyn UserStore,
    owner: Uuid,
    input: CreatePortfolioInput,
) -> Result<Portfolio, AppError> {
    let user = users
        .find(owner)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(existing) = portfolios.find_by_owner(owner).await? {
        return Err(AppError::PortfolioExists {
            slug: existing.slug,
        });
    }

    let title = match trimmed(input.title) {
        Some(title) => title,
        None => format!("{}'s Portfolio", user.fullname),
    };
    max_chars("title", &title, TITLE_MAX)?;

    let document = PortfolioDocument {
        title,
        bio: clean_bio(input.bio)?,
        projects: clean_projects(input.projects.unwrap_or_default())?,
        skills: clean_list("skills", input.skills.unwrap_or_default(), SKILL_MAX)?,
        social_links: input.social_links.unwrap_or_default(),
        ..Default::default()
    };

    let now = Utc::now();
    let portfolio = Portfolio {
        id: Uuid::new_v4(),
        user_id: owner,
        slug: generate_slug(&user.fullname),
        document,
        created_at: now,
        updated_at: now,
    };

    match portfolios.insert(&portfolio).await {
        Ok(()) => {}
        Err(StoreError::Duplicate { constraint }) if constraint == PORTFOLIO_OWNER_CONSTRAINT => {
            // Lost a race with a concurrent create for the same user.
            warn!("Concurrent portfolio create for user {owner}");
            let existing = portfolios
                .find_by_owner(owner)
                .await?
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("portfolio vanished after conflict")))?;
            return Err(AppError::PortfolioExists {
                slug: existing.slug,
            });
        }
        Err(StoreError::Duplicate { constraint }) if constraint == PORTFOLIO_SLUG_CONSTRAINT => {
            warn!("Slug collision on {} for user {owner}", portfolio.slug);
            return Err(AppError::Conflict(
                "Could not reserve a portfolio address, please try again".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    // The portfolio row is authoritative; `my_portfolio` reads its slug when
    // the user back-reference is missing.
    if let Err(e) = users.set_portfolio_slug(owner, &portfolio.slug).await {
        warn!("Could not record slug {} on user {owner}: {e}", portfolio.slug);
    }
    info!("Published portfolio {} for user {owner}", portfolio.slug);
    Ok(portfolio)
}

pub async fn update_portfolio(
    portfolios: &dyn PortfolioStore,
    owner: Uuid,
    input: UpdatePortfolioInput,
) -> Result<Portfolio, AppError> {
    let mut portfolio = portfolios
        .find_by_owner(owner)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    let doc = &mut portfolio.document;

    if let Some(projects) = input.projects {
        doc.projects = clean_projects(projects)?;
    }
    if let Some(skills) = input.skills {
        doc.skills = clean_list("skills", skills, SKILL_MAX)?;
    }
    if let Some(title) = trimmed(input.title) {
        max_chars("title", &title, TITLE_MAX)?;
        doc.title = title;
    }
    if let Some(bio) = input.bio {
        doc.bio = clean_bio(bio)?;
    }
    if let Some(links) = input.social_links {
        doc.social_links = links;
    }
    if let Some(theme) = input.theme {
        doc.theme = theme;
    }
    if let Some(is_public) = input.is_public {
        doc.is_public = is_public;
    }
    portfolio.updated_at = Utc::now();

    if !portfolios.replace(&portfolio).await? {
        return Err(AppError::NotFound("Portfolio not found".to_string()));
    }
    info!("Updated portfolio {} for user {owner}", portfolio.slug);
    Ok(portfolio)
}

/// The caller's slug and portfolio; both `None` until one is published.
pub async fn my_portfolio(
    portfolios: &dyn PortfolioStore,
    users: &dyn UserStore,
    owner: Uuid,
) -> Result<(Option<String>, Option<Portfolio>), AppError> {
    let portfolio = portfolios.find_by_owner(owner).await?;
    let slug = match users.find(owner).await? {
        Some(user) => user.portfolio_slug,
        None => None,
    }
    .or_else(|| portfolio.as_ref().map(|p| p.slug.clone()));
    Ok((slug, portfolio))
}

/// Anonymous read by slug. Hidden portfolios are indistinguishable from missing ones.
pub async fn public_portfolio(
    portfolios: &dyn PortfolioStore,
    users: &dyn UserStore,
    slug: &str,
) -> Result<PublicPortfolio, AppError> {
    let portfolio = portfolios
        .find_by_slug(slug)
        .await?
        .filter(|p| p.document.is_public)
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;

    let user = users.find(portfolio.user_id).await?.map(|u| PublicUser::from(&u));
    Ok(PublicPortfolio { portfolio, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::sample_user;

    fn store_with_user(fullname: &str) -> (MemoryStore, Uuid) {
        let user = sample_user(fullname);
        let id = user.id;
        (MemoryStore::with_users(vec![user]), id)
    }

    #[tokio::test]
    async fn test_second_create_returns_first_slug_without_writing() {
        let (store, owner) = store_with_user("Ada Lovelace");
        let first = create_portfolio(&store, &store, owner, CreatePortfolioInput::default())
            .await
            .unwrap();
        assert!(first.slug.starts_with("ada-lovelace-"));
        assert_eq!(first.document.title, "Ada Lovelace's Portfolio");

        let err = create_portfolio(&store, &store, owner, CreatePortfolioInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PortfolioExists { slug } if slug == first.slug));
        assert_eq!(store.portfolio_count(), 1);

        let (slug, _) = my_portfolio(&store, &store, owner).await.unwrap();
        assert_eq!(slug.as_deref(), Some(first.slug.as_str()));
    }

    /// User store whose back-reference write always fails.
    struct ReadOnlyUsers<'a>(&'a MemoryStore);

    #[async_trait::async_trait]
    impl UserStore for ReadOnlyUsers<'_> {
        async fn find(&self, id: Uuid) -> crate::store::StoreResult<Option<crate::models::user::User>> {
            self.0.find(id).await
        }

        async fn set_portfolio_slug(&self, _id: Uuid, _slug: &str) -> crate::store::StoreResult<()> {
            Err(StoreError::Corrupt("users table is read-only".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_slug_back_reference_still_publishes() {
        let (store, owner) = store_with_user("Ada Lovelace");
        let users = ReadOnlyUsers(&store);

        let created = create_portfolio(&store, &users, owner, CreatePortfolioInput::default())
            .await
            .unwrap();
        assert_eq!(store.portfolio_count(), 1);

        let (slug, portfolio) = my_portfolio(&store, &users, owner).await.unwrap();
        assert_eq!(slug.as_deref(), Some(created.slug.as_str()));
        assert!(portfolio.is_some());
    }

    #[tokio::test]
    async fn test_create_without_user_record_is_not_found() {
        let store = MemoryStore::default();
        let err = create_portfolio(&store, &store, Uuid::new_v4(), CreatePortfolioInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bio_null_clears_and_omitted_keeps() {
        let (store, owner) = store_with_user("Grace Hopper");
        create_portfolio(
            &store,
            &store,
            owner,
            CreatePortfolioInput {
                bio: Some("Compilers".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let omitted: UpdatePortfolioInput = serde_json::from_str(r#"{"title":"Grace"}"#).unwrap();
        let kept = update_portfolio(&store, owner, omitted).await.unwrap();
        assert_eq!(kept.document.bio.as_deref(), Some("Compilers"));
        assert_eq!(kept.document.title, "Grace");

        let cleared: UpdatePortfolioInput = serde_json::from_str(r#"{"bio":null}"#).unwrap();
        let updated = update_portfolio(&store, owner, cleared).await.unwrap();
        assert_eq!(updated.document.bio, None);
        assert_eq!(updated.document.title, "Grace");
    }

    #[tokio::test]
    async fn test_blank_title_keeps_existing() {
        let (store, owner) = store_with_user("Alan Turing");
        create_portfolio(&store, &store, owner, CreatePortfolioInput::default())
            .await
            .unwrap();
        let updated = update_portfolio(
            &store,
            owner,
            UpdatePortfolioInput {
                title: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.document.title, "Alan Turing's Portfolio");
    }

    #[tokio::test]
    async fn test_update_without_portfolio_is_not_found() {
        let (store, owner) = store_with_user("Nobody");
        let err = update_portfolio(&store, owner, UpdatePortfolioInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_public_read_joins_user_and_hides_private() {
        let (store, owner) = store_with_user("Edsger Dijkstra");
        let portfolio = create_portfolio(&store, &store, owner, CreatePortfolioInput::default())
            .await
            .unwrap();

        let public = public_portfolio(&store, &store, &portfolio.slug).await.unwrap();
        assert_eq!(public.user.unwrap().fullname, "Edsger Dijkstra");

        update_portfolio(
            &store,
            owner,
            UpdatePortfolioInput {
                is_public: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(matches!(
            public_portfolio(&store, &store, &portfolio.slug).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            public_portfolio(&store, &store, "no-such-slug").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_project_without_name_is_rejected() {
        let (store, owner) = store_with_user("Barbara Liskov");
        let err = create_portfolio(
            &store,
            &store,
            owner,
            CreatePortfolioInput {
                projects: Some(vec![PortfolioProject::default()]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "projects[0].name is required"));
    }
}
