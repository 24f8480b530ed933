//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::domain::domain_policy::DomainRule;
use auth::presentation::handlers::PortalAppState;
use auth::{PortalConfig, StrapiIdentityClient, portal_router_with_state};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use content::{ContentConfig, content_router};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_PORT: u16 = 31113;

/// Decode a base64 32-byte secret
fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("PORTAL_TAB_SECRET is not valid base64")?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow::anyhow!("PORTAL_TAB_SECRET must be 32 bytes, got {}", bytes.len()))
}

fn portal_config() -> anyhow::Result<PortalConfig> {
    let mut config = if cfg!(debug_assertions) {
        PortalConfig::development()
    } else {
        PortalConfig::default()
    };

    match env::var("PORTAL_TAB_SECRET") {
        Ok(secret) => config.tab_secret = decode_secret(&secret)?,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("PORTAL_TAB_SECRET not set, using a random secret");
        }
        Err(_) => anyhow::bail!("PORTAL_TAB_SECRET must be set in production"),
    }

    if let Ok(url) = env::var("CMS_BASE_URL") {
        config.cms_base_url = url;
    }
    if let Ok(raw) = env::var("PORTAL_ALLOWED_EXCEPTIONS") {
        let exceptions = DomainRule::parse_exceptions(&raw)?;
        tracing::info!(count = exceptions.len(), "Loaded allowed email exceptions");
        config.domain_policy = config.domain_policy.with_rules(exceptions);
    }
    config.google_client_id = env::var("GOOGLE_CLIENT_ID").ok().filter(|id| !id.is_empty());

    Ok(config)
}

fn content_config(portal: &PortalConfig) -> ContentConfig {
    ContentConfig {
        cms_base_url: portal.cms_base_url.clone(),
        blog_base_url: env::var("BLOG_BASE_URL")
            .unwrap_or_else(|_| content::application::config::DEFAULT_BLOG_BASE_URL.to_string()),
        ..ContentConfig::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let portal_config = portal_config()?;
    let content_config = content_config(&portal_config);
    tracing::info!(
        cms = %portal_config.cms_base_url,
        blog = %content_config.blog_base_url,
        "Upstreams configured"
    );

    let identity = StrapiIdentityClient::new(portal_config.cms_base_url.clone())?;
    let portal = PortalAppState::new(identity, portal_config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = portal_router_with_state(portal.clone()).merge(content_router(content_config, portal)?);
    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(decode_secret(&encoded).unwrap(), [7u8; 32]);

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }
}
