//! Axum route handlers for the Portfolio API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppJson};
use crate::identity::CurrentUser;
use crate::media::store_project_image;
use crate::models::portfolio::Portfolio;
use crate::portfolio::aggregate::{collect_material, PortfolioMaterial};
use crate::portfolio::service::{
    create_portfolio, my_portfolio, public_portfolio, update_portfolio, CreatePortfolioInput,
    PublicPortfolio, UpdatePortfolioInput,
};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct MaterialResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub material: PortfolioMaterial,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub slug: String,
    pub portfolio: Portfolio,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub message: &'static str,
    pub portfolio: Portfolio,
}

#[derive(Debug, Serialize)]
pub struct MyPortfolioResponse {
    pub slug: Option<String>,
    pub portfolio: Option<Portfolio>,
}

#[derive(Debug, Serialize)]
pub struct PublicPortfolioResponse {
    pub portfolio: PublicPortfolio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
}

/// GET /portfolio/projects
pub async fn handle_projects(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<MaterialResponse>, AppError> {
    let resumes = state.resumes.list_by_owner(owner).await?;
    Ok(Json(MaterialResponse {
        message: "Projects fetched successfully",
        material: collect_material(&resumes),
    }))
}

/// POST /portfolio/create
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(input): AppJson<CreatePortfolioInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let portfolio =
        create_portfolio(state.portfolios.as_ref(), state.users.as_ref(), owner, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Portfolio created successfully",
            slug: portfolio.slug.clone(),
            portfolio,
        }),
    ))
}

/// PUT /portfolio/update
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    AppJson(input): AppJson<UpdatePortfolioInput>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let portfolio = update_portfolio(state.portfolios.as_ref(), owner, input).await?;
    Ok(Json(PortfolioResponse {
        message: "Portfolio updated successfully",
        portfolio,
    }))
}

/// GET /portfolio/my
pub async fn handle_my(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<MyPortfolioResponse>, AppError> {
    let (slug, portfolio) = my_portfolio(state.portfolios.as_ref(), state.users.as_ref(), owner).await?;
    Ok(Json(MyPortfolioResponse { slug, portfolio }))
}

/// POST /portfolio/upload-image
///
/// Expects a single multipart field named `image`.
pub async fn handle_upload_image(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;

        let image_url =
            store_project_image(state.images.as_ref(), owner, &content_type, body).await?;
        return Ok(Json(ImageResponse { image_url }));
    }

    Err(AppError::Validation("No image file provided".to_string()))
}

/// GET /portfolio/:slug (public)
pub async fn handle_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicPortfolioResponse>, AppError> {
    let portfolio = public_portfolio(state.portfolios.as_ref(), state.users.as_ref(), &slug).await?;
    Ok(Json(PublicPortfolioResponse { portfolio }))
}
