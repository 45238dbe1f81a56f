use std::sync::Arc;

use lead_sms::config::AppConfig;
use lead_sms::gateway::{AfricasTalkingGateway, MessageGateway};
use lead_sms::store::{LeadStore, LibSqlBackend};
use lead_sms::webhook::{AppState, webhook_routes};

#[tokio::main]
async fn main() -> lead_sms::error::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export AT_API_KEY=...");
        std::process::exit(1);
    });

    eprintln!("📨 Lead SMS v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/webhook/sms", config.port);
    eprintln!(
        "   Gateway: {} ({})",
        config.gateway.username, config.gateway.base_url
    );

    // ── Database ─────────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let store: Arc<dyn LeadStore> =
        Arc::new(LibSqlBackend::new_local(db_path).await.unwrap_or_else(|e| {
            eprintln!("Error: Failed to open database at {}: {}", config.db_path, e);
            std::process::exit(1);
        }));
    eprintln!("   Database: {}", config.db_path);

    // ── Gateway ──────────────────────────────────────────────────────────
    let gateway: Arc<dyn MessageGateway> =
        Arc::new(AfricasTalkingGateway::new(config.gateway.clone()));

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = webhook_routes(AppState::new(store, gateway));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
