mod config;
mod db;
mod enrichment;
mod errors;
mod export;
mod identity;
mod llm_client;
mod media;
mod models;
mod personas;
mod portfolio;
mod render;
mod resumes;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::export::ChromiumRenderer;
use crate::llm_client::LlmClient;
use crate::media::S3ImageHost;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(PgStore::new(create_pool(&config.database_url).await?));

    let s3 = build_s3_client(&config).await;
    let images = S3ImageHost::new(s3, config.s3_bucket.clone(), config.s3_public_url.clone());
    info!("Image host ready (bucket: {})", config.s3_bucket);

    let llm = LlmClient::new(config.anthropic_api_key.clone())?
        .with_api_url(config.anthropic_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let pdf = ChromiumRenderer::new(&config.chrome_path, config.pdf_settle_timeout);
    info!(
        "PDF renderer: {} (settle timeout {:?})",
        config.chrome_path, config.pdf_settle_timeout
    );

    let state = AppState {
        resumes: store.clone(),
        personas: store.clone(),
        portfolios: store.clone(),
        users: store,
        llm: Arc::new(llm),
        pdf: Arc::new(pdf),
        images: Arc::new(images),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "folio-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
