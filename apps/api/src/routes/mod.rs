pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::media::MAX_IMAGE_BYTES;
use crate::state::AppState;
use crate::{enrichment, export, personas, portfolio, resumes};

/// Room for multipart framing around a maximum-size image.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/resume/create", post(resumes::handlers::handle_create))
        .route("/resume/user-resumes", get(resumes::handlers::handle_list))
        .route(
            "/resume/:id",
            get(resumes::handlers::handle_get)
                .put(resumes::handlers::handle_update)
                .delete(resumes::handlers::handle_delete),
        )
        .route("/resume/:id/preview", get(resumes::handlers::handle_preview))
        // Persona API
        .route("/persona/create", post(personas::handlers::handle_create))
        .route("/persona/user-personas", get(personas::handlers::handle_list))
        .route(
            "/persona/generate-summary",
            post(enrichment::handlers::handle_generate_summary),
        )
        .route(
            "/persona/from-resume",
            post(enrichment::handlers::handle_from_resume),
        )
        .route(
            "/persona/:id",
            get(personas::handlers::handle_get)
                .put(personas::handlers::handle_update)
                .delete(personas::handlers::handle_delete),
        )
        .route("/persona/:id/preview", get(personas::handlers::handle_preview))
        // Portfolio API
        .route("/portfolio/projects", get(portfolio::handlers::handle_projects))
        .route("/portfolio/create", post(portfolio::handlers::handle_create))
        .route("/portfolio/update", put(portfolio::handlers::handle_update))
        .route("/portfolio/my", get(portfolio::handlers::handle_my))
        .route(
            "/portfolio/upload-image",
            post(portfolio::handlers::handle_upload_image)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/portfolio/:slug", get(portfolio::handlers::handle_public))
        // Export API
        .route("/pdf/generate", post(export::handlers::handle_generate))
        .with_state(state)
}
