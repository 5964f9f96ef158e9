use std::sync::Arc;

use crate::export::PdfRenderer;
use crate::llm_client::TextGenerator;
use crate::media::ImageHost;
use crate::store::{PersonaStore, PortfolioStore, ResumeStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub personas: Arc<dyn PersonaStore>,
    pub portfolios: Arc<dyn PortfolioStore>,
    pub users: Arc<dyn UserStore>,
    pub llm: Arc<dyn TextGenerator>,
    /// Headless-browser PDF renderer. Each call owns its own browser process.
    pub pdf: Arc<dyn PdfRenderer>,
    pub images: Arc<dyn ImageHost>,
}
