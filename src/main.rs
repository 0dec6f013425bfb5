//! InBuddy relay server
//!
//! Serves the completion relay and the formatting endpoint.

use inbuddy::api::{create_router, AppState, CompletionBackend};
use inbuddy::config::{load_dotenv, RelayConfig};
use inbuddy::llm::COMPLETION_MODEL;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inbuddy=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    load_dotenv();
    let config = RelayConfig::from_env();

    let completion = CompletionBackend::from_config(&config)?;
    if completion.is_configured() {
        tracing::info!(
            model = COMPLETION_MODEL,
            base_url = %config.openai_base_url,
            credential_configured = true,
            "Completion provider initialized"
        );
    } else {
        tracing::warn!(
            credential_configured = false,
            "No OpenAI API key configured. Set OPENAI_API_KEY; chat requests will fail until then."
        );
    }

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(AppState::new(completion))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("InBuddy relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
