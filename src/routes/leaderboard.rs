use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{AppError, ErrorResponse};
use crate::models::leaderboard::{CastVoteRequest, LeaderboardEntry, VoteResponse};
use crate::services::leaderboard_service::{LeaderboardFilter, LeaderboardService};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// `all` (default), `weekly` or `monthly`. Anything else is treated as `all`.
    filter: Option<String>,
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Users ranked by total votes", body = [LeaderboardEntry]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_leaderboard(
    State(leaderboard_service): State<Arc<LeaderboardService>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let filter = LeaderboardFilter::parse(query.filter.as_deref());
    let leaderboard = leaderboard_service.get_leaderboard(filter).await?;
    Ok(Json(leaderboard))
}

#[utoipa::path(
    post,
    path = "/debates/{id}/votes",
    params(
        ("id" = String, Path, description = "Debate ID")
    ),
    request_body = CastVoteRequest,
    responses(
        (status = 201, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Blank userName or non-positive votes", body = ErrorResponse),
        (status = 404, description = "Debate not found", body = ErrorResponse)
    )
)]
pub async fn cast_vote(
    State(leaderboard_service): State<Arc<LeaderboardService>>,
    Path(id): Path<String>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), AppError> {
    let Json(req) = payload?;
    let vote = leaderboard_service.record_vote(&id, req).await?;
    Ok((StatusCode::CREATED, Json(vote.into())))
}

pub fn leaderboard_routes(leaderboard_service: Arc<LeaderboardService>) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .route("/debates/{id}/votes", post(cast_vote))
        .with_state(leaderboard_service)
}
