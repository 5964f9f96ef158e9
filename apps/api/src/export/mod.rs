//! HTML to PDF export.
//!
//! Rendering is delegated to a [`PdfRenderer`]. Production uses a headless
//! Chromium launched once per request; tests substitute a fake.

pub mod chromium;
pub mod handlers;

use async_trait::async_trait;
use thiserror::Error;

pub use chromium::ChromiumRenderer;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to prepare render workspace: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser exited with {status}: {stderr}")]
    Browser { status: String, stderr: String },

    #[error("browser did not finish within {0}s")]
    Timeout(u64),

    #[error("browser produced an empty document")]
    Empty,
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Prints a complete HTML document to PDF bytes.
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError>;
}
