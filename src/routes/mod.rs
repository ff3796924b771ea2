use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{
    services::{
        debate_service::DebateService, join_service::JoinService,
        leaderboard_service::LeaderboardService,
    },
    store::DebateStore,
};

pub mod debates;
pub mod joined;
pub mod leaderboard;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check OK")
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}

pub fn init_routes(store: Arc<dyn DebateStore>) -> Router {
    let debate_service = Arc::new(DebateService::new(store.clone()));
    let join_service = Arc::new(JoinService::new(store.clone()));
    let leaderboard_service = Arc::new(LeaderboardService::new(store));

    Router::new()
        .route("/health", get(health_check))
        .merge(debates::debate_routes(debate_service.clone(), join_service))
        .merge(joined::joined_routes(debate_service))
        .merge(leaderboard::leaderboard_routes(leaderboard_service))
}
