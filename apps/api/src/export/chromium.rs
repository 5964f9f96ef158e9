use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use super::{PdfError, PdfRenderer};

const PAGE_RULE: &str = "<style>@page{size:A4;margin:0}html,body{-webkit-print-color-adjust:exact;print-color-adjust:exact}</style>";

/// Prints through a headless Chromium binary. One process and one temp
/// directory per call; both are gone when `render` returns.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    settle_timeout: Duration,
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>, settle_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            settle_timeout,
        }
    }
}

/// Inserts the A4 page rule into `<head>`, or in front of the document when
/// there is no head to put it in.
pub fn with_page_rule(html: &str) -> String {
    match html.find("</head>").or_else(|| html.find("</HEAD>")) {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + PAGE_RULE.len());
            out.push_str(&html[..pos]);
            out.push_str(PAGE_RULE);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{PAGE_RULE}{html}"),
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("document.html");
        let output = workdir.path().join("document.pdf");
        tokio::fs::write(&input, with_page_rule(html)).await?;

        let child = Command::new(&self.binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--user-data-dir={}", workdir.path().join("profile").display()))
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!("Failed to spawn {}: {e}", self.binary.display());
                PdfError::Launch(e.to_string())
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let finished = tokio::time::timeout(self.settle_timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                error!("PDF render timed out after {:?}", self.settle_timeout);
                PdfError::Timeout(self.settle_timeout.as_secs())
            })??;

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr).trim().to_string();
            error!("Browser exited with {}: {stderr}", finished.status);
            return Err(PdfError::Browser {
                status: finished.status.to_string(),
                stderr,
            });
        }

        let bytes = tokio::fs::read(&output).await.unwrap_or_default();
        if bytes.is_empty() {
            return Err(PdfError::Empty);
        }
        debug!("Rendered PDF of {} bytes", bytes.len());
        Ok(bytes)
    }
}
