//! Caprate Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::{App, SiteConfig};
use infrastructure::{
    ports::{AuthPort, CaptionRepo, VoteRepo},
    supabase::{GoTrueClient, PostgrestClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is usually run from
    // `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caprate_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Caprate Engine");

    // Load configuration
    let supabase_url = std::env::var("SUPABASE_URL")
        .unwrap_or_else(|_| "http://localhost:54321".into());
    let supabase_anon_key = std::env::var("SUPABASE_ANON_KEY").unwrap_or_default();
    if supabase_anon_key.is_empty() {
        tracing::warn!("SUPABASE_ANON_KEY is not set; backend calls will be rejected");
    }
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let site_url =
        std::env::var("SITE_URL").unwrap_or_else(|_| format!("http://localhost:{server_port}"));
    let oauth_provider = std::env::var("OAUTH_PROVIDER").unwrap_or_else(|_| "github".into());

    // Create backend clients
    tracing::info!("Using Supabase project at {}", supabase_url);
    let auth: Arc<dyn AuthPort> = Arc::new(GoTrueClient::new(&supabase_url, &supabase_anon_key));
    let rest = Arc::new(PostgrestClient::new(&supabase_url, &supabase_anon_key));
    let captions: Arc<dyn CaptionRepo> = rest.clone();
    let votes: Arc<dyn VoteRepo> = rest;

    // Create application
    let app = Arc::new(App::new(
        auth,
        captions,
        votes,
        SiteConfig {
            site_url,
            oauth_provider,
        },
    ));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
