use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{Config, StoreBackend},
    routes::init_routes,
    store::{DebateStore, MemoryStore, MongoStore},
};

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod store;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health_check,
        routes::debates::list_debates,
        routes::debates::get_debate,
        routes::debates::create_debate,
        routes::debates::join_debate,
        routes::joined::get_joined_debates,
        routes::leaderboard::get_leaderboard,
        routes::leaderboard::cast_vote,
    ),
    components(
        schemas(
            models::debate::CreateDebateRequest,
            models::debate::DebateResponse,
            models::debate::JoinRequest,
            models::debate::JoinResponse,
            models::debate::Side,
            models::joined_debate::JoinedDebateResponse,
            models::leaderboard::LeaderboardEntry,
            models::leaderboard::CastVoteRequest,
            models::leaderboard::VoteResponse,
            error::ErrorResponse,
        )
    )
)]
struct ApiDoc;

type StartupError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let store = init_store(&config).await?;

    let app = Router::new()
        .merge(init_routes(store))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn init_store(config: &Config) -> Result<Arc<dyn DebateStore>, StartupError> {
    match &config.store_backend {
        StoreBackend::Mongo { uri } => {
            info!("Connecting to MongoDB database {}", config.database_name);
            let db = db::init_db(uri, &config.database_name).await?;
            let store = MongoStore::new(&db);
            store.ensure_indexes().await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store, data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests;
