use anyhow::Result;
use axum::{routing::get, Json, Router};
use crisis_response::{CrisisOrchestrator, GeminiClient, GeminiConfig};
use geo_zones::ZoneRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracking_core::{EpochTime, SafetyCore, TrackingStore, TICK_PERIOD};

mod routes;

/// Tourists seeded for the simulated deployment
const SEED_ROSTER_SIZE: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub core: Arc<SafetyCore>,
    pub orchestrator: Arc<CrisisOrchestrator>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "toursafe_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let zones = Arc::new(ZoneRegistry::himalayan_defaults());
    tracing::info!("   Loaded {} risk zones", zones.len());

    let mut rng = StdRng::from_entropy();
    let roster = TrackingStore::seed_himalayan(SEED_ROSTER_SIZE, &mut rng, EpochTime::now());
    let core = Arc::new(SafetyCore::new(zones, roster));

    // Recurring position/alert tick; handle kept alive for process lifetime
    let _tick = core.clone().start(TICK_PERIOD);

    let gemini = GeminiConfig::from_env().unwrap_or_else(|| {
        warn!("GEMINI_API_KEY not set - crisis generation will fail until configured");
        GeminiConfig::new(String::new())
    });
    let orchestrator = Arc::new(CrisisOrchestrator::new(
        core.clone(),
        Arc::new(GeminiClient::new(gemini)),
    ));

    let state = AppState { core, orchestrator };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", routes::api_routes(state))
        .layer(CorsLayer::permissive());

    let port = std::env::var("TOURSAFE_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8601".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🏔️  TourSafe Gateway starting on {}", addr);
    tracing::info!("   Region: Himalayan trekking zone (Uttarakhand)");
    tracing::info!("   Roster: {} simulated tourists", SEED_ROSTER_SIZE);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "toursafe-gateway",
        "region": "himalayan",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
